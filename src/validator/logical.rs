//! Logical combinators.
//!
//! This module provides:
//! - [`And`]: children run left to right; the first failing child's failures
//!   are reported and later children never run
//! - [`Or`]: passes as soon as one child passes; if all fail, one synthesized
//!   failure is reported at the deepest path any child reached
//! - [`Not`]: passes exactly when its child fails
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use verdict::{Rule, Validator, ValidatorExt};
//!
//! let byte = Rule::integer().and(Rule::between(-127, 128).unwrap());
//!
//! // `between` never runs for a non-integer
//! let failures: Vec<_> = byte.validate(&json!(1.5)).collect();
//! assert_eq!(failures.len(), 1);
//! assert_eq!(failures[0].message, "should be integer, but 1.5");
//!
//! let id = Rule::string().or(Rule::integer());
//! let failure = id.validate(&json!(true)).next().unwrap();
//! assert_eq!(failure.message, "should be string or integer");
//! ```

use std::fmt;

use serde_json::Value;

use crate::error::{InvalidArgument, ValidationFailure};
use crate::message::{interpolate, list_alternatives, messages};
use crate::path::JsonPath;

use super::traits::{BoxedValidator, Failures, Validator};

/// Logical AND over two or more validators.
///
/// Construction through [`And::new`] / [`And::and`] guarantees at least two
/// children; [`And::from_vec`] checks it at run time.
pub struct And {
    children: Vec<BoxedValidator>,
}

impl And {
    /// Combines two validators.
    pub fn new<L, R>(left: L, right: R) -> Self
    where
        L: Validator + 'static,
        R: Validator + 'static,
    {
        Self {
            children: vec![Box::new(left), Box::new(right)],
        }
    }

    /// Combines a runtime list of validators.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Arity`] if fewer than two are given.
    pub fn from_vec(children: Vec<BoxedValidator>) -> Result<Self, InvalidArgument> {
        if children.len() < 2 {
            return Err(InvalidArgument::Arity {
                combinator: "and",
                got: children.len(),
            });
        }
        Ok(Self { children })
    }

    /// Appends `next`, run only if every earlier child passed.
    pub fn and<V: Validator + 'static>(mut self, next: V) -> Self {
        self.children.push(Box::new(next));
        self
    }

    /// The children in evaluation order.
    pub fn children(&self) -> &[BoxedValidator] {
        &self.children
    }
}

/// Lazy state machine behind [`And::validate`].
///
/// Children are tried in order until one yields a failure; from then on only
/// that child's failures are drained.
struct AndFailures<'a> {
    remaining: std::slice::Iter<'a, BoxedValidator>,
    input: &'a Value,
    failing: Option<Failures<'a>>,
}

impl Iterator for AndFailures<'_> {
    type Item = ValidationFailure;

    fn next(&mut self) -> Option<ValidationFailure> {
        loop {
            if let Some(failing) = self.failing.as_mut() {
                return failing.next();
            }

            let child = self.remaining.next()?;
            let mut failures = child.validate(self.input).peekable();
            if failures.peek().is_some() {
                self.failing = Some(Box::new(failures));
            }
        }
    }
}

impl Validator for And {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        Box::new(AndFailures {
            remaining: self.children.iter(),
            input,
            failing: None,
        })
    }

    fn is(&self, input: &Value) -> bool {
        self.children.iter().all(|child| child.is(input))
    }
}

impl fmt::Display for And {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descriptions: Vec<String> = self.children.iter().map(ToString::to_string).collect();
        f.write_str(&descriptions.join(" and "))
    }
}

/// Logical OR over two or more validators.
///
/// If every child fails, exactly one failure is reported. Its message is
/// `should be <alternatives>` and its path is the longest path among all child
/// failures (the first one found on a tie), which usually points at the spot
/// where the closest alternative went wrong.
pub struct Or {
    children: Vec<BoxedValidator>,
}

impl Or {
    /// Combines two alternatives.
    pub fn new<L, R>(left: L, right: R) -> Self
    where
        L: Validator + 'static,
        R: Validator + 'static,
    {
        Self {
            children: vec![Box::new(left), Box::new(right)],
        }
    }

    /// Combines a runtime list of alternatives.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Arity`] if fewer than two are given.
    pub fn from_vec(children: Vec<BoxedValidator>) -> Result<Self, InvalidArgument> {
        if children.len() < 2 {
            return Err(InvalidArgument::Arity {
                combinator: "or",
                got: children.len(),
            });
        }
        Ok(Self { children })
    }

    /// Appends another alternative.
    pub fn or<V: Validator + 'static>(mut self, other: V) -> Self {
        self.children.push(Box::new(other));
        self
    }

    /// The alternatives in evaluation order.
    pub fn children(&self) -> &[BoxedValidator] {
        &self.children
    }

    /// The single failure reported when every alternative fails, or `None` if one passes.
    fn aggregate(&self, input: &Value) -> Option<ValidationFailure> {
        let mut deepest: Option<JsonPath> = None;

        for child in &self.children {
            let mut failed = false;
            for failure in child.validate(input) {
                failed = true;
                let deeper = deepest
                    .as_ref()
                    .map_or(true, |path| failure.instance_path.len() > path.len());
                if deeper {
                    deepest = Some(failure.instance_path);
                }
            }
            if !failed {
                return None;
            }
        }

        Some(ValidationFailure::at(
            deepest.unwrap_or_default(),
            interpolate(messages::SHOULD_BE, &[self.to_string()]),
        ))
    }
}

impl Validator for Or {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        Box::new(std::iter::once_with(move || self.aggregate(input)).flatten())
    }

    fn is(&self, input: &Value) -> bool {
        self.children.iter().any(|child| child.is(input))
    }
}

impl fmt::Display for Or {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descriptions: Vec<String> = self.children.iter().map(ToString::to_string).collect();
        f.write_str(&list_alternatives(&descriptions))
    }
}

/// Logical NOT of one validator.
///
/// Only the child's verdict matters; its failures are discarded. When the
/// child passes, one root-level failure `should be not <child>` is reported.
///
/// ```rust
/// use serde_json::json;
/// use verdict::{Rule, Validator};
///
/// let nonzero = Rule::not(Rule::eq(0));
/// assert!(nonzero.is(&json!(1)));
///
/// let failure = nonzero.validate(&json!(0)).next().unwrap();
/// assert_eq!(failure.message, "should be not 0");
/// assert!(failure.instance_path.is_root());
/// ```
pub struct Not<V> {
    inner: V,
}

impl<V: Validator> Not<V> {
    /// Inverts `inner`.
    pub fn new(inner: V) -> Self {
        Self { inner }
    }

    /// Returns a reference to the inverted validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// Extracts the inverted validator.
    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: Validator> Validator for Not<V> {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        Box::new(
            std::iter::once_with(move || {
                self.inner.is(input).then(|| {
                    ValidationFailure::new(interpolate(messages::SHOULD_BE, &[self.to_string()]))
                })
            })
            .flatten(),
        )
    }

    fn is(&self, input: &Value) -> bool {
        !self.inner.is(input)
    }
}

impl<V: Validator> fmt::Display for Not<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not {}", self.inner)
    }
}
