//! Parallel validation of many inputs.

use rayon::prelude::*;
use serde_json::Value;

use crate::validation::{validate, ValidateOptions};
use crate::validator::Validator;
use crate::ValidationResult;

/// Validates every input against `validator` on the rayon thread pool.
///
/// Results are returned in input order.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{validate_batch, Rule, ValidateOptions};
///
/// let inputs = vec![json!(1), json!("two"), json!(3)];
/// let results = validate_batch(&Rule::integer(), &inputs, &ValidateOptions::default());
///
/// let ok: Vec<bool> = results.iter().map(|r| r.is_success()).collect();
/// assert_eq!(ok, vec![true, false, true]);
/// ```
pub fn validate_batch<'a, V>(
    validator: &V,
    inputs: &'a [Value],
    options: &ValidateOptions,
) -> Vec<ValidationResult<&'a Value>>
where
    V: Validator + ?Sized,
{
    tracing::debug!(validator = %validator, inputs = inputs.len(), "validating batch");

    inputs
        .par_iter()
        .map(|input| validate(validator, input, options))
        .collect()
}
