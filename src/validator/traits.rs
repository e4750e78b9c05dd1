//! The validator contract.
//!
//! This module provides the [`Validator`] trait every leaf and combinator
//! implements, plus [`ValidatorExt`] for fluent composition.

use std::fmt::Display;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ValidationFailure;

use super::expect::{Expect, Message};
use super::logical::{And, Not, Or};

/// A lazily produced sequence of failures.
///
/// Consumers may stop pulling at any point; nothing past the last pulled
/// failure is evaluated.
pub type Failures<'a> = Box<dyn Iterator<Item = ValidationFailure> + 'a>;

/// An owned, type-erased validator.
pub type BoxedValidator = Box<dyn Validator>;

/// A shared, type-erased validator.
pub type SharedValidator = Arc<dyn Validator>;

/// A rule that can be checked against an input.
///
/// Implementations must be pure and total: an input that breaks the rule yields
/// failures, never a panic or an error. `is` must agree with `validate`, i.e.
/// `v.is(x) == v.validate(x).next().is_none()`; the provided implementation
/// guarantees that and implementations may override it with something cheaper.
///
/// The `Display` supertrait is the rule's canonical description (`string`,
/// `between 1 and 10`, `instance of Array`) and is used to build messages.
///
/// The `Send + Sync` bounds let a built tree be shared across threads.
///
/// # Example
///
/// ```rust
/// use std::fmt;
/// use serde_json::{json, Value};
/// use verdict::message::{describe_input, interpolate, messages};
/// use verdict::{Failures, ValidationFailure, Validator};
///
/// struct Even;
///
/// impl fmt::Display for Even {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str("even")
///     }
/// }
///
/// impl Validator for Even {
///     fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
///         if input.as_i64().is_some_and(|n| n % 2 == 0) {
///             Box::new(std::iter::empty())
///         } else {
///             let message = interpolate(
///                 messages::SHOULD_BE_BUT,
///                 &[self.to_string(), describe_input(input)],
///             );
///             Box::new(std::iter::once(ValidationFailure::new(message)))
///         }
///     }
/// }
///
/// assert!(Even.is(&json!(4)));
/// assert_eq!(
///     Even.validate(&json!(3)).next().unwrap().message,
///     "should be even, but 3"
/// );
/// ```
pub trait Validator: Display + Send + Sync {
    /// Checks `input` and returns every failure, lazily.
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a>;

    /// Returns true when `input` satisfies the rule.
    fn is(&self, input: &Value) -> bool {
        self.validate(input).next().is_none()
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        (**self).validate(input)
    }

    fn is(&self, input: &Value) -> bool {
        (**self).is(input)
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        (**self).validate(input)
    }

    fn is(&self, input: &Value) -> bool {
        (**self).is(input)
    }
}

impl<V: Validator + ?Sized> Validator for &V {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        (**self).validate(input)
    }

    fn is(&self, input: &Value) -> bool {
        (**self).is(input)
    }
}

/// Fluent composition for any `'static` validator.
///
/// ```rust
/// use serde_json::json;
/// use verdict::{Rule, Validator, ValidatorExt};
///
/// let byte = Rule::integer().and(Rule::between(-128, 127).unwrap());
/// assert!(byte.is(&json!(12)));
/// assert!(!byte.is(&json!(200)));
///
/// let not_zero = Rule::eq(0).not();
/// assert!(not_zero.is(&json!(1)));
/// ```
pub trait ValidatorExt: Validator + Sized + 'static {
    /// Runs `self`, then `next` only if `self` passed.
    fn and<V: Validator + 'static>(self, next: V) -> And {
        And::new(self, next)
    }

    /// Passes when either `self` or `other` passes.
    fn or<V: Validator + 'static>(self, other: V) -> Or {
        Or::new(self, other)
    }

    /// Passes exactly when `self` fails.
    fn not(self) -> Not<Self> {
        Not::new(self)
    }

    /// Replaces the message of every failure `self` yields.
    fn expect(self, message: impl Into<Message>) -> Expect<Self> {
        Expect::new(self, message)
    }

    /// Erases the concrete type into a [`BoxedValidator`].
    fn boxed(self) -> BoxedValidator {
        Box::new(self)
    }

    /// Erases the concrete type into a [`SharedValidator`].
    fn shared(self) -> SharedValidator {
        Arc::new(self)
    }
}

impl<V: Validator + 'static> ValidatorExt for V {}

/// An empty failure sequence.
pub(crate) fn pass<'a>() -> Failures<'a> {
    Box::new(std::iter::empty())
}

/// A failure sequence holding exactly one failure.
pub(crate) fn fail<'a>(failure: ValidationFailure) -> Failures<'a> {
    Box::new(std::iter::once(failure))
}
