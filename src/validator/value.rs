//! Value leaves: strict equality, inequality and enumerated sets.

use std::fmt;

use serde_json::Value;

use crate::error::ValidationFailure;
use crate::message::{describe_input, interpolate, list_alternatives, messages};

use super::absent::is_absent;
use super::traits::{fail, pass, Failures, Validator};

/// JSON equality that never matches a missing member.
fn same(input: &Value, expected: &Value) -> bool {
    !is_absent(input) && input == expected
}

/// Requires the input to equal a fixed value.
///
/// Equality is JSON equality: `1` and `1.0` are different values.
#[derive(Debug, Clone, PartialEq)]
pub struct Equal {
    expected: Value,
}

impl Equal {
    /// Creates a validator accepting exactly `expected`.
    pub fn new(expected: impl Into<Value>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl Validator for Equal {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        if same(input, &self.expected) {
            return pass();
        }
        fail(ValidationFailure::new(interpolate(
            messages::SHOULD_BE_BUT,
            &[self.to_string(), describe_input(input)],
        )))
    }

    fn is(&self, input: &Value) -> bool {
        same(input, &self.expected)
    }
}

impl fmt::Display for Equal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expected)
    }
}

/// Rejects one fixed value.
#[derive(Debug, Clone, PartialEq)]
pub struct NotEqual {
    rejected: Value,
}

impl NotEqual {
    /// Creates a validator accepting anything but `rejected`.
    pub fn new(rejected: impl Into<Value>) -> Self {
        Self {
            rejected: rejected.into(),
        }
    }
}

impl Validator for NotEqual {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        if !same(input, &self.rejected) {
            return pass();
        }
        fail(ValidationFailure::new(interpolate(
            messages::SHOULD_BE_BUT,
            &[self.to_string(), describe_input(input)],
        )))
    }

    fn is(&self, input: &Value) -> bool {
        !same(input, &self.rejected)
    }
}

impl fmt::Display for NotEqual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not {}", self.rejected)
    }
}

/// Requires the input to be a member of a fixed set of values.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{Rule, Validator};
///
/// let role = Rule::enumeration(["admin", "user", "guest"]);
/// assert!(role.is(&json!("user")));
///
/// let failure = role.validate(&json!("root")).next().unwrap();
/// assert_eq!(
///     failure.message,
///     r#"should be "admin", "user", or "guest", but "root""#
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Enumerated {
    members: Vec<Value>,
}

impl Enumerated {
    /// Creates a validator accepting any of `members`.
    pub fn new<I, T>(members: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// The accepted values in declaration order.
    pub fn members(&self) -> &[Value] {
        &self.members
    }
}

impl Validator for Enumerated {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        if self.is(input) {
            return pass();
        }
        fail(ValidationFailure::new(interpolate(
            messages::SHOULD_BE_BUT,
            &[self.to_string(), describe_input(input)],
        )))
    }

    fn is(&self, input: &Value) -> bool {
        self.members.iter().any(|member| same(input, member))
    }
}

impl fmt::Display for Enumerated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&list_alternatives(&self.members))
    }
}
