//! Errors raised by [`assert`](crate::assert).
//!
//! Validation failures only become errors when a caller opts into the
//! assert-style entry point. The errors keep the original failures so callers
//! can still inspect which part of the input was rejected.

use std::backtrace::Backtrace;
use std::fmt;

use crate::error::ValidationFailure;
use crate::message::{interpolate, messages};
use crate::path::JsonPath;

/// One failure rendered as an error.
///
/// The rendered message is the failure message followed, when the failure is
/// not at the root, by a line of the form `instance path: a.b.c`.
pub struct AssertionError {
    message: String,
    failure: ValidationFailure,
    trace: Option<Backtrace>,
}

impl AssertionError {
    /// Renders `failure` as an error, rooting index paths at `object_name`.
    pub fn new(failure: ValidationFailure, object_name: &str) -> Self {
        let message = if failure.instance_path.is_root() {
            failure.message.clone()
        } else {
            let path = interpolate(
                messages::INSTANCE_PATH,
                &[failure.instance_path.render(object_name)],
            );
            format!("{}\n{}", failure.message, path)
        };

        Self {
            message,
            failure,
            trace: None,
        }
    }

    /// Returns this error with a backtrace captured at the call site.
    ///
    /// Capturing respects `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`.
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Backtrace::capture());
        self
    }

    /// The rendered, path-qualified message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The failure this error was built from.
    pub fn failure(&self) -> &ValidationFailure {
        &self.failure
    }

    /// Where in the input the failure occurred.
    pub fn instance_path(&self) -> &JsonPath {
        &self.failure.instance_path
    }

    /// The captured backtrace, if the caller asked for one.
    pub fn trace(&self) -> Option<&Backtrace> {
        self.trace.as_ref()
    }

    /// Consumes the error and returns the underlying failure.
    pub fn into_failure(self) -> ValidationFailure {
        self.failure
    }
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// Implemented by hand: a derive would treat the `Backtrace` field specially.
impl std::error::Error for AssertionError {}

impl fmt::Debug for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssertionError")
            .field("message", &self.message)
            .field("instance_path", &self.failure.instance_path)
            .field("traced", &self.trace.is_some())
            .finish()
    }
}

/// Every collected failure bundled into one error.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct AggregateAssertionError {
    message: String,
    errors: Vec<AssertionError>,
}

impl AggregateAssertionError {
    /// Bundles `errors` under a top-level `message`.
    pub fn new(message: impl Into<String>, errors: Vec<AssertionError>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }

    /// The top-level message (caller override, or empty).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The bundled errors in encounter order.
    pub fn errors(&self) -> &[AssertionError] {
        &self.errors
    }

    /// Returns the number of bundled errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if nothing is bundled.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consumes the aggregate and returns the bundled errors.
    pub fn into_errors(self) -> Vec<AssertionError> {
        self.errors
    }
}

/// The error returned by [`assert`](crate::assert).
#[derive(Debug, thiserror::Error)]
pub enum AssertError {
    /// Single-error mode: the first failure only.
    #[error(transparent)]
    Single(AssertionError),

    /// Aggregate mode: one error per collected failure.
    #[error(transparent)]
    Aggregate(AggregateAssertionError),
}

impl AssertError {
    /// Instance paths of every failure carried by this error, in order.
    pub fn instance_paths(&self) -> Vec<&JsonPath> {
        match self {
            AssertError::Single(error) => vec![error.instance_path()],
            AssertError::Aggregate(aggregate) => aggregate
                .errors()
                .iter()
                .map(AssertionError::instance_path)
                .collect(),
        }
    }
}
