//! Assert-style validation.
//!
//! This module provides [`assert`] and [`assert_with`], which run
//! [`validate`](crate::validate) and escalate failures into an [`AssertError`].
//! It is the only place where validation failures become errors.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{
    AggregateAssertionError, AssertError, AssertionError, InvalidArgument, ValidationFailure,
};
use crate::validation::{validate, ValidateOptions};
use crate::validator::Validator;

/// How failures are escalated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssertMode {
    /// One [`AssertionError`] per failure, bundled in an aggregate.
    #[default]
    Aggregate,
    /// Only the first failure, as a single [`AssertionError`].
    Once,
}

/// Options for [`assert`].
///
/// # Example
///
/// ```rust
/// use verdict::{AssertMode, AssertOptions};
///
/// let options = AssertOptions::default()
///     .once()
///     .with_object_name("order")
///     .with_message("order rejected");
///
/// assert_eq!(options.mode(), AssertMode::Once);
/// assert_eq!(options.object_name(), "order");
/// assert_eq!(options.message(), Some("order rejected"));
/// ```
#[derive(Debug, Clone)]
pub struct AssertOptions {
    validate: ValidateOptions,
    message: Option<String>,
    object_name: String,
    release_stack_trace: bool,
    mode: AssertMode,
}

impl AssertOptions {
    /// Aggregate mode, no message override, object name `input`.
    pub fn new() -> Self {
        Self {
            validate: ValidateOptions::default(),
            message: None,
            object_name: "input".to_string(),
            release_stack_trace: false,
            mode: AssertMode::Aggregate,
        }
    }

    /// Switches to single-error mode.
    pub fn once(mut self) -> Self {
        self.mode = AssertMode::Once;
        self
    }

    /// Sets the escalation mode.
    pub fn with_mode(mut self, mode: AssertMode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the message.
    ///
    /// In aggregate mode this is the aggregate's top-level message; in
    /// single-error mode it replaces the failure's own message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the name index-rooted paths are rendered under.
    pub fn with_object_name(mut self, name: impl Into<String>) -> Self {
        self.object_name = name.into();
        self
    }

    /// Captures a backtrace in every produced [`AssertionError`].
    pub fn with_stack_trace(mut self, release: bool) -> Self {
        self.release_stack_trace = release;
        self
    }

    /// Caps the number of failures collected.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::MaxErrors`] if `max_errors` is zero.
    pub fn with_max_errors(mut self, max_errors: usize) -> Result<Self, InvalidArgument> {
        self.validate = self.validate.with_max_errors(max_errors)?;
        Ok(self)
    }

    /// Replaces the underlying validate options.
    pub fn with_validate_options(mut self, options: ValidateOptions) -> Self {
        self.validate = options;
        self
    }

    /// The escalation mode.
    pub fn mode(&self) -> AssertMode {
        self.mode
    }

    /// The name index-rooted paths are rendered under.
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// The message override, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether produced errors carry a backtrace.
    pub fn stack_trace(&self) -> bool {
        self.release_stack_trace
    }

    /// Options used to collect failures.
    pub fn validate_options(&self) -> &ValidateOptions {
        &self.validate
    }

    fn render(&self, failure: ValidationFailure) -> AssertionError {
        let error = AssertionError::new(failure, &self.object_name);
        if self.release_stack_trace {
            error.with_trace()
        } else {
            error
        }
    }
}

impl Default for AssertOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates `input` and returns an error describing every collected failure.
///
/// # Errors
///
/// Returns [`AssertError::Aggregate`] in aggregate mode and
/// [`AssertError::Single`] in single-error mode when `input` is rejected.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{assert, AssertError, AssertOptions, Rule};
///
/// let pair = Rule::fixed_array()
///     .position(Rule::string())
///     .position(Rule::integer());
///
/// let err = assert(&pair, &json!([1, "x"]), &AssertOptions::default()).unwrap_err();
/// let AssertError::Aggregate(aggregate) = err else { unreachable!() };
/// assert_eq!(aggregate.len(), 2);
/// assert_eq!(
///     aggregate.errors()[1].message(),
///     "should be integer, but \"x\"\ninstance path: input[1]"
/// );
/// ```
pub fn assert<V>(validator: &V, input: &Value, options: &AssertOptions) -> Result<(), AssertError>
where
    V: Validator + ?Sized,
{
    let failures = match validate(validator, input, &options.validate) {
        Validation::Success(_) => return Ok(()),
        Validation::Failure(failures) => failures,
    };

    tracing::debug!(
        validator = %validator,
        mode = ?options.mode,
        failures = failures.len(),
        "assertion failed"
    );

    match options.mode {
        AssertMode::Once => {
            let mut first = failures.first().clone();
            if let Some(message) = &options.message {
                first = first.with_message(message.clone());
            }
            Err(AssertError::Single(options.render(first)))
        }
        AssertMode::Aggregate => {
            let errors = failures
                .into_iter()
                .map(|failure| options.render(failure))
                .collect();
            let message = options.message.clone().unwrap_or_default();
            Err(AssertError::Aggregate(AggregateAssertionError::new(
                message, errors,
            )))
        }
    }
}

/// Like [`assert`], but builds the returned error with `make_error`.
///
/// # Errors
///
/// Returns `make_error(e)` where `e` is the error [`assert`] would return.
///
/// ```rust
/// use serde_json::json;
/// use verdict::{assert_with, AssertOptions, Rule};
///
/// #[derive(Debug)]
/// struct BadRequest(String);
///
/// let err = assert_with(&Rule::string(), &json!(1), &AssertOptions::default().once(), |e| {
///     BadRequest(e.to_string())
/// })
/// .unwrap_err();
/// assert_eq!(err.0, "should be string, but 1");
/// ```
pub fn assert_with<V, E, F>(
    validator: &V,
    input: &Value,
    options: &AssertOptions,
    make_error: F,
) -> Result<(), E>
where
    V: Validator + ?Sized,
    F: FnOnce(AssertError) -> E,
{
    assert(validator, input, options).map_err(make_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::JsonPath;
    use crate::validator::{Failures, Rule};
    use serde_json::json;
    use std::fmt;

    /// Fails with `test1` at the root and `test2` at `a.b.c`.
    struct TwoFailures;

    impl Validator for TwoFailures {
        fn validate<'a>(&'a self, _input: &'a Value) -> Failures<'a> {
            let deep: JsonPath = JsonPath::from_field("a").push_field("b").push_field("c");
            Box::new(
                vec![
                    ValidationFailure::new("test1"),
                    ValidationFailure::at(deep, "test2"),
                ]
                .into_iter(),
            )
        }
    }

    impl fmt::Display for TwoFailures {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("two failures")
        }
    }

    #[test]
    fn test_assert_success() {
        assert!(super::assert(&Rule::string(), &json!("ok"), &AssertOptions::new()).is_ok());
    }

    #[test]
    fn test_assert_aggregate() {
        let err = super::assert(&TwoFailures, &json!(null), &AssertOptions::new()).unwrap_err();
        let AssertError::Aggregate(aggregate) = err else {
            panic!("expected aggregate error");
        };

        assert_eq!(aggregate.message(), "");
        assert_eq!(aggregate.len(), 2);
        assert_eq!(aggregate.errors()[0].message(), "test1");
        assert!(aggregate.errors()[1]
            .message()
            .ends_with("\ninstance path: a.b.c"));
        assert!(aggregate.errors()[0].trace().is_none());
    }

    #[test]
    fn test_assert_aggregate_message_override() {
        let options = AssertOptions::new().with_message("rejected");
        let err = super::assert(&TwoFailures, &json!(null), &options).unwrap_err();
        assert_eq!(err.to_string(), "rejected");
        assert_eq!(err.instance_paths().len(), 2);
    }

    #[test]
    fn test_assert_once_takes_first() {
        let options = AssertOptions::new().once();
        let err = super::assert(&TwoFailures, &json!(null), &options).unwrap_err();
        let AssertError::Single(single) = err else {
            panic!("expected single error");
        };
        assert_eq!(single.message(), "test1");
        assert!(single.instance_path().is_root());
    }

    #[test]
    fn test_assert_once_message_override_keeps_path() {
        let validator = Rule::properties().property("a", Rule::string());
        let options = AssertOptions::new().once().with_message("a must be text");
        let err = super::assert(&validator, &json!({"a": 1}), &options).unwrap_err();
        assert_eq!(err.to_string(), "a must be text\ninstance path: a");
    }

    #[test]
    fn test_assert_object_name() {
        let options = AssertOptions::new().once().with_object_name("rows");
        let err = super::assert(&Rule::items(Rule::number()), &json!([1, "x"]), &options)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "should be number, but \"x\"\ninstance path: rows[1]"
        );
    }

    #[test]
    fn test_assert_release_stack_trace() {
        let options = AssertOptions::new().once().with_stack_trace(true);
        let err = super::assert(&Rule::string(), &json!(1), &options).unwrap_err();
        let AssertError::Single(single) = err else {
            panic!("expected single error");
        };
        assert!(single.trace().is_some());
    }

    #[test]
    fn test_assert_max_errors() {
        let options = AssertOptions::new().with_max_errors(1).unwrap();
        let err = super::assert(&TwoFailures, &json!(null), &options).unwrap_err();
        assert_eq!(err.instance_paths().len(), 1);
        assert!(AssertOptions::new().with_max_errors(0).is_err());
    }

    #[test]
    fn test_options_accessors() {
        let defaults = AssertOptions::default();
        assert_eq!(defaults.mode(), AssertMode::Aggregate);
        assert_eq!(defaults.object_name(), "input");
        assert_eq!(defaults.message(), None);
        assert!(!defaults.stack_trace());

        let options = AssertOptions::new()
            .with_mode(AssertMode::Once)
            .with_object_name("rows")
            .with_message("bad rows")
            .with_stack_trace(true)
            .with_max_errors(3)
            .unwrap();
        assert_eq!(options.mode(), AssertMode::Once);
        assert_eq!(options.object_name(), "rows");
        assert_eq!(options.message(), Some("bad rows"));
        assert!(options.stack_trace());
        assert_eq!(options.validate_options().max_errors(), 3);
    }

    #[test]
    fn test_assert_with_custom_error() {
        let result: Result<(), Vec<String>> =
            assert_with(&TwoFailures, &json!(null), &AssertOptions::new(), |e| match e {
                AssertError::Aggregate(a) => a
                    .into_errors()
                    .into_iter()
                    .map(|e| e.into_failure().message)
                    .collect(),
                AssertError::Single(s) => vec![s.into_failure().message],
            });
        assert_eq!(result.unwrap_err(), vec!["test1", "test2"]);
    }
}
