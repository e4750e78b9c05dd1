//! Regular-expression leaf.

use std::fmt;

use regex::Regex;
use serde_json::Value;

use crate::error::{InvalidArgument, ValidationFailure};
use crate::message::{describe_input, interpolate, messages};

use super::traits::{fail, pass, Failures, Validator};

/// Requires the input to be a string matched by a regular expression.
///
/// The expression is unanchored; use `^...$` to match the whole string.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{Rule, Validator};
///
/// let digits = Rule::pattern(r"^\d+$").unwrap();
/// assert!(digits.is(&json!("12345")));
///
/// let failure = digits.validate(&json!("12a")).next().unwrap();
/// assert_eq!(failure.message, r#"should be matched by /^\d+$/, but "12a""#);
///
/// assert!(Rule::pattern("(").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles `pattern` into a validator.
    pub fn new(pattern: &str) -> Result<Self, InvalidArgument> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Wraps an already compiled expression.
    pub fn from_regex(regex: Regex) -> Self {
        Self { regex }
    }

    /// The source of the expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    fn matches(&self, input: &Value) -> bool {
        input.as_str().is_some_and(|s| self.regex.is_match(s))
    }
}

impl Validator for Pattern {
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

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "matched by /{}/", self.regex.as_str())
    }
}
