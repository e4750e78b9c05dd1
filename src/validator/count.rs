//! Item-count leaves.
//!
//! Counts are array items, object entries, or string characters (Unicode scalar
//! values). Any other input has no items and counts as zero.

use std::fmt;

use serde_json::Value;

use crate::error::ValidationFailure;
use crate::message::{interpolate, messages};

use super::traits::{fail, pass, Failures, Validator};

/// Number of items in `input`.
pub fn item_count(input: &Value) -> usize {
    match input {
        Value::Array(items) => items.len(),
        Value::Object(entries) => entries.len(),
        Value::String(s) => s.chars().count(),
        _ => 0,
    }
}

/// Requires at most `max` items.
///
/// ```rust
/// use serde_json::json;
/// use verdict::{Rule, Validator};
///
/// let failure = Rule::max_count(2).validate(&json!([1, 2, 3])).next().unwrap();
/// assert_eq!(
///     failure.message,
///     "item count should be less than or equal to 2, but 3"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxCount {
    max: usize,
}

impl MaxCount {
    /// Creates a validator allowing up to `max` items.
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Validator for MaxCount {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        let count = item_count(input);
        if count <= self.max {
            return pass();
        }
        fail(ValidationFailure::new(interpolate(
            messages::MAX_COUNT,
            &[self.max, count],
        )))
    }

    fn is(&self, input: &Value) -> bool {
        item_count(input) <= self.max
    }
}

impl fmt::Display for MaxCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item count less than or equal to {}", self.max)
    }
}

/// Requires at least `min` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinCount {
    min: usize,
}

impl MinCount {
    /// Creates a validator requiring at least `min` items.
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Validator for MinCount {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        let count = item_count(input);
        if count >= self.min {
            return pass();
        }
        fail(ValidationFailure::new(interpolate(
            messages::MIN_COUNT,
            &[self.min, count],
        )))
    }

    fn is(&self, input: &Value) -> bool {
        item_count(input) >= self.min
    }
}

impl fmt::Display for MinCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item count greater than or equal to {}", self.min)
    }
}
