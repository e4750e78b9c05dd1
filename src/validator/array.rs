//! Array traversal.
//!
//! This module provides [`FixedArray`] (one validator per position) and
//! [`Items`] (one validator for every element). Child failures are re-homed
//! under the position that produced them. Non-array inputs have no elements.

use std::fmt;

use serde_json::Value;

use super::traits::{pass, BoxedValidator, Failures, Validator};

/// Validates position `i` of an array against the `i`-th validator.
///
/// Length is not this validator's concern: positions the input does not have
/// are skipped and extra positions are ignored. Combine with
/// [`Rule::min_count`](crate::Rule::min_count) / [`Rule::max_count`](crate::Rule::max_count)
/// to pin the length.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{JsonPath, Rule, Validator};
///
/// let pair = Rule::fixed_array()
///     .position(Rule::string())
///     .position(Rule::integer());
///
/// let failure = pair.validate(&json!(["a", "b"])).next().unwrap();
/// assert_eq!(failure.instance_path, JsonPath::from_index(1));
/// ```
#[derive(Default)]
pub struct FixedArray {
    positions: Vec<BoxedValidator>,
}

impl FixedArray {
    /// Creates a tuple validator with no positions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the validator for the next position.
    pub fn position<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.positions.push(Box::new(validator));
        self
    }

    /// Number of declared positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if no positions are declared.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl Validator for FixedArray {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        let Some(items) = input.as_array() else {
            return pass();
        };

        Box::new(
            self.positions
                .iter()
                .zip(items)
                .enumerate()
                .flat_map(|(index, (child, item))| {
                    child
                        .validate(item)
                        .map(move |failure| failure.prepend_index(index))
                }),
        )
    }

    fn is(&self, input: &Value) -> bool {
        input.as_array().map_or(true, |items| {
            self.positions
                .iter()
                .zip(items)
                .all(|(child, item)| child.is(item))
        })
    }
}

impl fmt::Display for FixedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positions: Vec<String> = self.positions.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", positions.join(", "))
    }
}

/// Validates every element of an array against one validator.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{Rule, Validator};
///
/// let tags = Rule::items(Rule::string());
/// let paths: Vec<String> = tags
///     .validate(&json!(["a", 1, "b", null]))
///     .map(|f| f.instance_path.to_string())
///     .collect();
/// assert_eq!(paths, vec!["[1]", "[3]"]);
/// ```
pub struct Items {
    child: BoxedValidator,
}

impl Items {
    /// Creates a validator checking each element against `child`.
    pub fn new<V: Validator + 'static>(child: V) -> Self {
        Self {
            child: Box::new(child),
        }
    }
}

impl Validator for Items {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        let Some(items) = input.as_array() else {
            return pass();
        };

        Box::new(items.iter().enumerate().flat_map(move |(index, item)| {
            self.child
                .validate(item)
                .map(move |failure| failure.prepend_index(index))
        }))
    }

    fn is(&self, input: &Value) -> bool {
        input
            .as_array()
            .map_or(true, |items| items.iter().all(|item| self.child.is(item)))
    }
}

impl fmt::Display for Items {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "items {}", self.child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::JsonPath;
    use crate::validator::Rule;
    use serde_json::json;

    #[test]
    fn test_fixed_array_positions() {
        let validator = FixedArray::new()
            .position(Rule::string())
            .position(Rule::number());

        assert!(validator.is(&json!(["a", 1])));

        let failures: Vec<_> = validator.validate(&json!([1, "b"])).collect();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].instance_path, JsonPath::from_index(0));
        assert_eq!(failures[1].instance_path, JsonPath::from_index(1));
    }

    #[test]
    fn test_fixed_array_ignores_length() {
        let validator = FixedArray::new()
            .position(Rule::string())
            .position(Rule::string());

        assert!(validator.is(&json!(["a"])));
        assert!(validator.is(&json!(["a", "b", 3])));
        assert_eq!(validator.validate(&json!([])).count(), 0);
    }

    #[test]
    fn test_fixed_array_display() {
        let validator = FixedArray::new()
            .position(Rule::string())
            .position(Rule::integer());
        assert_eq!(validator.to_string(), "[string, integer]");
        assert_eq!(validator.len(), 2);
    }

    #[test]
    fn test_items_nested_paths() {
        let validator = Items::new(Rule::properties().property("id", Rule::integer()));
        let failure = validator
            .validate(&json!([{"id": 1}, {"id": "x"}]))
            .next()
            .unwrap();
        assert_eq!(failure.instance_path.to_string(), "[1].id");
    }

    #[test]
    fn test_items_non_array_has_no_elements() {
        let validator = Items::new(Rule::string());
        assert!(validator.is(&json!({"0": 1})));
        assert_eq!(validator.validate(&json!(42)).count(), 0);
    }

    #[test]
    fn test_items_is_lazy() {
        let validator = Items::new(Rule::string());
        let input = json!([1, 2, 3, 4, 5]);
        let first_two: Vec<_> = validator.validate(&input).take(2).collect();
        assert_eq!(first_two.len(), 2);
        assert_eq!(first_two[1].instance_path, JsonPath::from_index(1));
    }
}
