//! Construction-time misuse errors.

/// A validator or option was configured with a value it cannot work with.
///
/// These errors are raised while building a validator tree or the options for
/// an execution call, never while validating. They indicate a programming
/// mistake and are never coerced into something usable.
///
/// # Example
///
/// ```rust
/// use verdict::{InvalidArgument, Rule};
///
/// let err = Rule::between(10, 1).unwrap_err();
/// assert!(matches!(err, InvalidArgument::Range { .. }));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum InvalidArgument {
    /// `max_errors` was zero.
    #[error("max_errors must be a positive integer, got {0}")]
    MaxErrors(usize),

    /// A range was built with a maximum that is not above its minimum.
    #[error("range maximum must be greater than minimum, got min {min} and max {max}")]
    Range {
        /// Rendered lower bound.
        min: String,
        /// Rendered upper bound.
        max: String,
    },

    /// A range was built from a numeric bound and a string bound.
    #[error("range bounds must both be numbers or both be strings, got {min} and {max}")]
    MixedBounds {
        /// Rendered lower bound.
        min: String,
        /// Rendered upper bound.
        max: String,
    },

    /// A pattern validator was given an invalid regular expression.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A logical combinator was built from too few children.
    #[error("{combinator} requires at least 2 validators, got {got}")]
    Arity {
        /// The combinator being built (`and`, `or`).
        combinator: &'static str,
        /// Number of validators supplied.
        got: usize,
    },
}
