//! Validator contract, leaves and combinators.
//!
//! This module provides the [`Validator`] trait and every built-in
//! implementation, plus the [`Rule`] factory that is the usual entry point for
//! building validator trees.

mod absent;
mod array;
mod count;
mod expect;
mod lazy;
mod logical;
mod numeric;
mod object;
mod string;
mod traits;
mod types;
mod value;

use serde_json::Value;

use crate::error::InvalidArgument;

pub use absent::{absent, is_absent, Absent};
pub use array::{FixedArray, Items};
pub use count::{item_count, MaxCount, MinCount};
pub use expect::{Expect, Message};
pub use lazy::{lazy, Lazy};
pub use logical::{And, Not, Or};
pub use numeric::{Between, Bound, Comparison, Ordinal};
pub use object::{Dictionary, Presence, Properties, PropertyKeys, PropertyValues};
pub use string::Pattern;
pub use traits::{BoxedValidator, Failures, SharedValidator, Validator, ValidatorExt};
pub use types::{Container, InstanceOf, JsonType, TypeValidator};
pub use value::{Enumerated, Equal, NotEqual};

/// Entry point for creating validators.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{Rule, Validator, ValidatorExt};
///
/// let order = Rule::object().and(
///     Rule::properties()
///         .property("id", Rule::integer().and(Rule::gt(0)))
///         .property("status", Rule::enumeration(["open", "closed"]))
///         .property("lines", Rule::items(Rule::number()).and(Rule::min_count(1))),
/// );
///
/// assert!(order.is(&json!({"id": 7, "status": "open", "lines": [1.5]})));
/// assert!(!order.is(&json!({"id": 7, "status": "void", "lines": [1.5]})));
/// ```
pub struct Rule;

impl Rule {
    /// Any JSON string.
    pub fn string() -> TypeValidator {
        TypeValidator::new(JsonType::String)
    }

    /// Any JSON number.
    pub fn number() -> TypeValidator {
        TypeValidator::new(JsonType::Number)
    }

    /// A JSON number with no fractional part.
    pub fn integer() -> TypeValidator {
        TypeValidator::new(JsonType::Integer)
    }

    /// `true` or `false`.
    pub fn boolean() -> TypeValidator {
        TypeValidator::new(JsonType::Boolean)
    }

    /// `null`.
    pub fn null() -> TypeValidator {
        TypeValidator::new(JsonType::Null)
    }

    /// Any JSON array.
    pub fn array() -> TypeValidator {
        TypeValidator::new(JsonType::Array)
    }

    /// Any JSON object.
    pub fn object() -> TypeValidator {
        TypeValidator::new(JsonType::Object)
    }

    /// A missing member.
    pub fn absent() -> Absent {
        Absent
    }

    /// A missing member or a value accepted by `child`.
    pub fn optional<V: Validator + 'static>(child: V) -> Or {
        Or::new(Absent, child)
    }

    /// A value of the given JSON type.
    pub fn type_of(expected: JsonType) -> TypeValidator {
        TypeValidator::new(expected)
    }

    /// A value of the given container kind.
    pub fn instance_of(container: Container) -> InstanceOf {
        InstanceOf::new(container)
    }

    /// Exactly `expected`.
    pub fn eq(expected: impl Into<Value>) -> Equal {
        Equal::new(expected)
    }

    /// Anything but `rejected`.
    pub fn ne(rejected: impl Into<Value>) -> NotEqual {
        NotEqual::new(rejected)
    }

    /// One of `members`.
    pub fn enumeration<I, T>(members: I) -> Enumerated
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Enumerated::new(members)
    }

    /// Strictly greater than `bound`.
    pub fn gt(bound: impl Into<Bound>) -> Comparison {
        Comparison::new(Ordinal::GreaterThan, bound)
    }

    /// Greater than or equal to `bound`.
    pub fn gte(bound: impl Into<Bound>) -> Comparison {
        Comparison::new(Ordinal::GreaterThanOrEqual, bound)
    }

    /// Strictly less than `bound`.
    pub fn lt(bound: impl Into<Bound>) -> Comparison {
        Comparison::new(Ordinal::LessThan, bound)
    }

    /// Less than or equal to `bound`.
    pub fn lte(bound: impl Into<Bound>) -> Comparison {
        Comparison::new(Ordinal::LessThanOrEqual, bound)
    }

    /// Within `[min, max]`.
    ///
    /// # Errors
    ///
    /// Fails if `max <= min` or the bounds are of different kinds.
    pub fn between(
        min: impl Into<Bound>,
        max: impl Into<Bound>,
    ) -> Result<Between, InvalidArgument> {
        Between::new(min, max)
    }

    /// A string matched by `pattern`.
    ///
    /// # Errors
    ///
    /// Fails if `pattern` is not a valid regular expression.
    pub fn pattern(pattern: &str) -> Result<Pattern, InvalidArgument> {
        Pattern::new(pattern)
    }

    /// At most `max` items.
    pub fn max_count(max: usize) -> MaxCount {
        MaxCount::new(max)
    }

    /// At least `min` items.
    pub fn min_count(min: usize) -> MinCount {
        MinCount::new(min)
    }

    /// Declared properties, all of them checked.
    pub fn properties() -> Properties {
        Properties::new(Presence::All)
    }

    /// Declared properties, checked only when present.
    pub fn optional_properties() -> Properties {
        Properties::new(Presence::Present)
    }

    /// Declared properties and nothing else.
    pub fn dictionary(presence: Presence) -> Dictionary {
        Dictionary::new(presence)
    }

    /// One validator per array position.
    pub fn fixed_array() -> FixedArray {
        FixedArray::new()
    }

    /// One validator for every array element.
    pub fn items<V: Validator + 'static>(child: V) -> Items {
        Items::new(child)
    }

    /// One validator for every object key.
    pub fn property_keys<V: Validator + 'static>(child: V) -> PropertyKeys {
        PropertyKeys::new(child)
    }

    /// One validator for every object value.
    pub fn property_values<V: Validator + 'static>(child: V) -> PropertyValues {
        PropertyValues::new(child)
    }

    /// `left`, then `right` if `left` passed.
    pub fn and<L, R>(left: L, right: R) -> And
    where
        L: Validator + 'static,
        R: Validator + 'static,
    {
        And::new(left, right)
    }

    /// `left` or `right`.
    pub fn or<L, R>(left: L, right: R) -> Or
    where
        L: Validator + 'static,
        R: Validator + 'static,
    {
        Or::new(left, right)
    }

    /// The inverse of `inner`.
    pub fn not<V: Validator>(inner: V) -> Not<V> {
        Not::new(inner)
    }

    /// A validator built by `init` on first use.
    pub fn lazy<V, F>(init: F) -> Lazy<V, F>
    where
        V: Validator,
        F: Fn() -> V + Send + Sync,
    {
        Lazy::new(init)
    }
}
