//! Failure records and error types.
//!
//! Validation failures are plain data ([`ValidationFailure`]); the types in this
//! module that implement `std::error::Error` cover misuse at construction time
//! ([`InvalidArgument`]) and the caller-opted escalation done by `assert`.

mod argument;
mod assert_error;
mod failure;

pub use argument::InvalidArgument;
pub use assert_error::{AggregateAssertionError, AssertError, AssertionError};
pub use failure::{ValidationFailure, ValidationFailures};
