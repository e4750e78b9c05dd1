//! Missing members.
//!
//! A property the input does not have is handed to its child validator as
//! [`absent()`]. It reads as `null` through the `serde_json` API but is told
//! apart from a real `null` by address, so children can accept or reject
//! absence on its own. Cloning it yields an ordinary `null`.

use std::fmt;

use serde_json::Value;

use crate::error::ValidationFailure;
use crate::message::{describe_input, interpolate, messages};

use super::traits::{fail, pass, Failures, Validator};

static ABSENT: Value = Value::Null;

/// The value structural validators pass for a missing member.
pub fn absent() -> &'static Value {
    &ABSENT
}

/// True if `value` stands for a missing member rather than real data.
pub fn is_absent(value: &Value) -> bool {
    std::ptr::eq(value, &ABSENT)
}

/// Accepts only a missing member.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{Rule, Validator};
///
/// let closed = Rule::properties().property("legacy", Rule::absent());
/// assert!(closed.is(&json!({})));
///
/// let failure = closed.validate(&json!({"legacy": null})).next().unwrap();
/// assert_eq!(failure.message, "should be absent, but null");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Absent;

impl Validator for Absent {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        if is_absent(input) {
            return pass();
        }
        fail(ValidationFailure::new(interpolate(
            messages::SHOULD_BE_BUT,
            &[self.to_string(), describe_input(input)],
        )))
    }

    fn is(&self, input: &Value) -> bool {
        is_absent(input)
    }
}

impl fmt::Display for Absent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("absent")
    }
}
