//! Running a validator against an input.
//!
//! This module provides [`validate`], which drains a bounded number of
//! failures from a validator tree and converts the outcome into a
//! [`ValidationResult`], and the [`ValidateOptions`] that bound it.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{InvalidArgument, ValidationFailures};
use crate::validator::Validator;
use crate::ValidationResult;

/// Options for [`validate`].
///
/// # Example
///
/// ```rust
/// use verdict::ValidateOptions;
///
/// let options = ValidateOptions::default().with_max_errors(5).unwrap();
/// assert_eq!(options.max_errors(), 5);
///
/// // The cap must be positive.
/// assert!(ValidateOptions::default().with_max_errors(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateOptions {
    max_errors: usize,
}

impl ValidateOptions {
    /// Unbounded options.
    pub fn new() -> Self {
        Self {
            max_errors: usize::MAX,
        }
    }

    /// Caps the number of failures collected.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::MaxErrors`] if `max_errors` is zero.
    pub fn with_max_errors(mut self, max_errors: usize) -> Result<Self, InvalidArgument> {
        if max_errors == 0 {
            return Err(InvalidArgument::MaxErrors(max_errors));
        }
        self.max_errors = max_errors;
        Ok(self)
    }

    /// The failure cap; `usize::MAX` when unbounded.
    pub fn max_errors(&self) -> usize {
        self.max_errors
    }
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates `input`, collecting at most `options.max_errors()` failures.
///
/// Evaluation stops as soon as the cap is reached; no part of the tree beyond
/// the last collected failure runs. On success the input is handed back.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use stillwater::Validation;
/// use verdict::{validate, Rule, ValidateOptions};
///
/// let tags = Rule::items(Rule::string());
/// let input = json!([1, 2, 3]);
///
/// let options = ValidateOptions::default().with_max_errors(2).unwrap();
/// match validate(&tags, &input, &options) {
///     Validation::Failure(failures) => assert_eq!(failures.len(), 2),
///     Validation::Success(_) => unreachable!(),
/// }
///
/// let ok = json!(["a"]);
/// assert!(validate(&tags, &ok, &ValidateOptions::default()).is_success());
/// ```
pub fn validate<'a, V>(
    validator: &V,
    input: &'a Value,
    options: &ValidateOptions,
) -> ValidationResult<&'a Value>
where
    V: Validator + ?Sized,
{
    let collected: Vec<_> = validator
        .validate(input)
        .take(options.max_errors)
        .collect();

    match ValidationFailures::from_vec(collected) {
        None => Validation::Success(input),
        Some(failures) => {
            tracing::debug!(
                validator = %validator,
                failures = failures.len(),
                max_errors = options.max_errors,
                "validation failed"
            );
            Validation::Failure(failures)
        }
    }
}
