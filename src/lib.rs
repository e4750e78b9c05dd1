//! # Verdict
//!
//! Composable validators for JSON-shaped data, with precise, path-qualified
//! failure reporting.
//!
//! ## Overview
//!
//! Small validators check one rule each (a type, a range, a pattern, a set of
//! allowed values). Structural combinators fan containers out into their
//! members and re-home child failures under the member's key or index; logical
//! combinators (`and`, `or`, `not`) compose rules. Failure sequences are lazy,
//! so a caller that only wants the first few failures never evaluates the rest
//! of the tree.
//!
//! Results use stillwater's `Validation` type: a rejected input carries a
//! non-empty, ordered [`ValidationFailures`] collection.
//!
//! ## Core Types
//!
//! - [`Validator`]: the contract every rule implements
//! - [`Rule`]: entry point for creating validators
//! - [`ValidationFailure`]: one violation (message + instance path)
//! - [`JsonPath`]: where in the input a failure occurred (e.g., `users[0].email`)
//! - [`validate`] / [`assert`]: the execution layer
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use verdict::{validate, JsonPath, Rule, ValidateOptions, ValidatorExt};
//!
//! let user = Rule::object().and(
//!     Rule::properties()
//!         .property("name", Rule::string().and(Rule::min_count(1)))
//!         .property("age", Rule::integer().and(Rule::between(0, 150).unwrap())),
//! );
//!
//! let input = json!({"name": "Ada", "age": 36});
//! assert!(validate(&user, &input, &ValidateOptions::default()).is_success());
//!
//! let input = json!({"name": "", "age": 36.5});
//! let failures = validate(&user, &input, &ValidateOptions::default())
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(failures.len(), 2);
//! assert_eq!(failures.first().instance_path, JsonPath::from_field("name"));
//! ```

pub mod assertion;
pub mod batch;
pub mod error;
pub mod message;
pub mod path;
pub mod registry;
pub mod validation;
pub mod validator;

pub use assertion::{assert, assert_with, AssertMode, AssertOptions};
pub use batch::validate_batch;
pub use error::{
    AggregateAssertionError, AssertError, AssertionError, InvalidArgument, ValidationFailure,
    ValidationFailures,
};
pub use path::{JsonPath, PathSegment};
pub use registry::{Reference, RegistryError, ValidatorRegistry};
pub use validation::{validate, ValidateOptions};
pub use validator::{
    BoxedValidator, Container, Failures, JsonType, Message, Presence, Rule, SharedValidator,
    Validator, ValidatorExt,
};

/// Type alias for validation results using ValidationFailures
pub type ValidationResult<T> = stillwater::Validation<T, ValidationFailures>;
