//! Deferred validator construction.

use std::cell::Cell;
use std::fmt;
use std::sync::OnceLock;

use serde_json::Value;

use super::traits::{Failures, Validator};

/// Deepest chain of nested lazy descriptions rendered before eliding with `...`.
const MAX_DISPLAY_DEPTH: usize = 8;

thread_local! {
    static DISPLAY_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Defers creation of a validator until first use.
///
/// The producer runs at most once per wrapper; `validate`, `is` and `Display`
/// all delegate to the memoized result. This is how recursive shapes are
/// expressed: each level builds the next one only when an input actually
/// reaches it.
///
/// A panicking producer propagates its panic and leaves the wrapper
/// unresolved.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{BoxedValidator, Rule, Validator, ValidatorExt};
///
/// // { value: number, children: [tree] }
/// fn tree() -> BoxedValidator {
///     Rule::properties()
///         .property("value", Rule::number())
///         .property("children", Rule::items(Rule::lazy(tree)))
///         .boxed()
/// }
///
/// let input = json!({
///     "value": 1,
///     "children": [{ "value": 2, "children": [{ "value": "x", "children": [] }] }]
/// });
/// let failure = tree().validate(&input).next().unwrap();
/// assert_eq!(failure.instance_path.to_string(), "children[0].children[0].value");
/// ```
pub struct Lazy<V, F = fn() -> V> {
    init: F,
    validator: OnceLock<V>,
}

impl<V, F> Lazy<V, F>
where
    V: Validator,
    F: Fn() -> V + Send + Sync,
{
    /// Wraps `init`, which runs on first use.
    pub fn new(init: F) -> Self {
        Self {
            init,
            validator: OnceLock::new(),
        }
    }

    /// Returns the resolved validator, if resolution already happened.
    pub fn get(&self) -> Option<&V> {
        self.validator.get()
    }

    /// Returns true once the producer has run.
    pub fn is_initialized(&self) -> bool {
        self.validator.get().is_some()
    }

    /// Resolves the validator if needed and returns it.
    pub fn force(&self) -> &V {
        self.validator.get_or_init(|| {
            tracing::trace!("resolving lazy validator");
            (self.init)()
        })
    }
}

impl<V, F> Validator for Lazy<V, F>
where
    V: Validator,
    F: Fn() -> V + Send + Sync,
{
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        self.force().validate(input)
    }

    fn is(&self, input: &Value) -> bool {
        self.force().is(input)
    }
}

impl<V, F> fmt::Display for Lazy<V, F>
where
    V: Validator,
    F: Fn() -> V + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = DISPLAY_DEPTH.with(Cell::get);
        if depth >= MAX_DISPLAY_DEPTH {
            return f.write_str("...");
        }

        DISPLAY_DEPTH.with(|d| d.set(depth + 1));
        let result = fmt::Display::fmt(self.force(), f);
        DISPLAY_DEPTH.with(|d| d.set(depth));
        result
    }
}

impl<V: fmt::Debug, F> fmt::Debug for Lazy<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy")
            .field("validator", &self.validator.get())
            .field("initialized", &self.validator.get().is_some())
            .finish()
    }
}

/// Creates a [`Lazy`] wrapper.
pub fn lazy<V, F>(init: F) -> Lazy<V, F>
where
    V: Validator,
    F: Fn() -> V + Send + Sync,
{
    Lazy::new(init)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{BoxedValidator, Rule, ValidatorExt};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_lazy_not_initialized_before_use() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let validator = Lazy::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Rule::string()
        });

        assert!(!validator.is_initialized());
        assert!(validator.get().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_lazy_producer_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let validator = lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Rule::string()
        });

        assert!(validator.is(&json!("a")));
        assert!(!validator.is(&json!(1)));
        assert_eq!(validator.validate(&json!(2)).count(), 1);
        assert_eq!(validator.validate(&json!("b")).count(), 0);
        assert_eq!(validator.to_string(), "string");

        assert!(validator.is_initialized());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lazy_producer_panic_leaves_cell_empty() {
        let validator = Lazy::new(|| -> BoxedValidator { panic!("cannot build") });

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            validator.is(&json!(1))
        }));

        assert!(outcome.is_err());
        assert!(!validator.is_initialized());
    }

    fn list() -> BoxedValidator {
        Rule::null()
            .or(Rule::properties()
                .property("head", Rule::integer())
                .property("tail", Rule::lazy(list)))
            .boxed()
    }

    #[test]
    fn test_lazy_recursive_list() {
        let validator = list();
        assert!(validator.is(&json!(null)));
        assert!(validator.is(&json!({"head": 1, "tail": {"head": 2, "tail": null}})));
        assert!(!validator.is(&json!({"head": 1, "tail": {"head": "x", "tail": null}})));
    }

    fn matrix() -> BoxedValidator {
        Rule::number().or(Rule::items(Rule::lazy(matrix))).boxed()
    }

    #[test]
    fn test_lazy_display_delegates() {
        assert_eq!(list().to_string(), "null or { head, tail }");
    }

    #[test]
    fn test_lazy_recursive_display_is_bounded() {
        let description = matrix().to_string();
        assert!(description.starts_with("number or items number or items"));
        assert!(description.ends_with("..."));
        assert!(matrix().is(&json!([[1, 2], [3, [4]]])));
    }
}
