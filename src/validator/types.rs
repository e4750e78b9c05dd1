//! Type-tag leaves.
//!
//! [`TypeValidator`] checks the JSON kind of an input (`string`, `integer`, ...)
//! and [`InstanceOf`] checks container membership (`instance of Array`).

use std::fmt;

use serde_json::Value;

use crate::error::ValidationFailure;
use crate::message::{describe_input, interpolate, messages};

use super::absent::is_absent;
use super::traits::{fail, pass, Failures, Validator};

/// The kind of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    /// `null`. A missing member is not `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// Any number.
    Number,
    /// A number without a fractional part (`1` and `1.0`, not `1.5`).
    Integer,
    /// A string.
    String,
    /// An array.
    Array,
    /// An object.
    Object,
}

impl JsonType {
    /// Returns true if `value` is of this kind.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            JsonType::Null => value.is_null() && !is_absent(value),
            JsonType::Boolean => value.is_boolean(),
            JsonType::Number => value.is_number(),
            JsonType::Integer => match value {
                Value::Number(n) if n.is_i64() || n.is_u64() => true,
                Value::Number(n) => n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0),
                _ => false,
            },
            JsonType::String => value.is_string(),
            JsonType::Array => value.is_array(),
            JsonType::Object => value.is_object(),
        }
    }

    /// The kind name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Number => "number",
            JsonType::Integer => "integer",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Requires the input to be of a given [`JsonType`].
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{Rule, Validator};
///
/// let validator = Rule::integer();
/// assert!(validator.is(&json!(3)));
///
/// let failure = validator.validate(&json!(1.5)).next().unwrap();
/// assert_eq!(failure.message, "should be integer, but 1.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeValidator {
    expected: JsonType,
}

impl TypeValidator {
    /// Creates a validator for `expected`.
    pub fn new(expected: JsonType) -> Self {
        Self { expected }
    }

    /// The kind this validator requires.
    pub fn expected(&self) -> JsonType {
        self.expected
    }
}

impl Validator for TypeValidator {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        if self.expected.matches(input) {
            return pass();
        }
        fail(ValidationFailure::new(interpolate(
            messages::SHOULD_BE_BUT,
            &[self.to_string(), describe_input(input)],
        )))
    }

    fn is(&self, input: &Value) -> bool {
        self.expected.matches(input)
    }
}

impl fmt::Display for TypeValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expected)
    }
}

/// A container class an input can be an instance of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// Ordered sequences.
    Array,
    /// Keyed records.
    Object,
}

/// Requires the input to be an instance of a container class.
///
/// Unlike [`TypeValidator`], the description names the class (`instance of
/// Array`) and the printed input names the class it actually has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceOf {
    container: Container,
}

impl InstanceOf {
    /// Creates a validator for `container`.
    pub fn new(container: Container) -> Self {
        Self { container }
    }

    fn matches(&self, input: &Value) -> bool {
        match self.container {
            Container::Array => input.is_array(),
            Container::Object => input.is_object(),
        }
    }
}

impl Validator for InstanceOf {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        if self.matches(input) {
            return pass();
        }
        fail(ValidationFailure::new(interpolate(
            messages::SHOULD_BE_BUT,
            &[self.to_string(), describe_input(input)],
        )))
    }

    fn is(&self, input: &Value) -> bool {
        self.matches(input)
    }
}

impl fmt::Display for InstanceOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.container {
            Container::Array => f.write_str("instance of Array"),
            Container::Object => f.write_str("instance of Object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_accepts_whole_floats() {
        let integer = TypeValidator::new(JsonType::Integer);
        assert!(integer.is(&json!(1)));
        assert!(integer.is(&json!(1.0)));
        assert!(integer.is(&json!(u64::MAX)));
        assert!(!integer.is(&json!(1.5)));
        assert!(!integer.is(&json!("1")));
    }

    #[test]
    fn test_is_agrees_with_validate() {
        let inputs = [
            json!(null),
            json!(true),
            json!(0),
            json!(-2.5),
            json!("s"),
            json!([1]),
            json!({"k": 1}),
        ];
        let kinds = [
            JsonType::Null,
            JsonType::Boolean,
            JsonType::Number,
            JsonType::Integer,
            JsonType::String,
            JsonType::Array,
            JsonType::Object,
        ];

        for kind in kinds {
            let validator = TypeValidator::new(kind);
            for input in &inputs {
                assert_eq!(
                    validator.is(input),
                    validator.validate(input).next().is_none(),
                    "{} on {}",
                    kind,
                    input
                );
            }
        }
    }

    #[test]
    fn test_type_failure_message() {
        let failure = TypeValidator::new(JsonType::String)
            .validate(&json!(0))
            .next()
            .unwrap();
        assert_eq!(failure.message, "should be string, but 0");
        assert!(failure.instance_path.is_root());
    }

    #[test]
    fn test_instance_of() {
        let array = InstanceOf::new(Container::Array);
        assert_eq!(array.to_string(), "instance of Array");
        assert!(array.is(&json!([])));

        let failures: Vec<_> = array.validate(&json!({"a": 1})).collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].message, "should be instance of Array, but object");
    }
}
