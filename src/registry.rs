//! Named validators and references between them.
//!
//! This module provides the [`ValidatorRegistry`] type that stores validators
//! under names and hands out [`Reference`]s that resolve a name on first use.
//! References let validators refer to each other (or to themselves) in any
//! registration order.

use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::validation::{validate, ValidateOptions};
use crate::validator::{Failures, Lazy, SharedValidator, Validator};
use crate::ValidationResult;

/// Type alias for the validator storage map.
type ValidatorMap = Arc<RwLock<HashMap<String, SharedValidator>>>;

type Resolver = Box<dyn Fn() -> SharedValidator + Send + Sync>;

/// A thread-safe registry of named validators.
///
/// Cloning a registry is cheap and yields a handle to the same storage.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can look up and validate concurrently (read access)
/// - Registration operations are serialized (write access)
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{Rule, ValidateOptions, ValidatorRegistry};
///
/// let registry = ValidatorRegistry::new();
///
/// // `Node` refers to itself; the reference is resolved on first use.
/// registry.register("Node", Rule::properties()
///     .property("name", Rule::string())
///     .property("children", Rule::items(registry.reference("Node")))
/// ).unwrap();
///
/// let tree = json!({"name": "root", "children": [{"name": "leaf", "children": []}]});
/// let result = registry.validate("Node", &tree, &ValidateOptions::default()).unwrap();
/// assert!(result.is_success());
/// ```
pub struct ValidatorRegistry {
    validators: ValidatorMap,
    referenced: Arc<Mutex<Vec<String>>>,
}

impl ValidatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            validators: Arc::new(RwLock::new(HashMap::new())),
            referenced: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Registers a validator under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Rule, ValidatorRegistry};
    ///
    /// let registry = ValidatorRegistry::new();
    /// registry.register("Email", Rule::pattern("@").unwrap()).unwrap();
    ///
    /// // Duplicate registration fails
    /// assert!(registry.register("Email", Rule::string()).is_err());
    /// ```
    pub fn register<V>(&self, name: impl Into<String>, validator: V) -> Result<(), RegistryError>
    where
        V: Validator + 'static,
    {
        let name = name.into();
        let validator: SharedValidator = Arc::new(validator);

        let mut validators = self.validators.write();
        if validators.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        validators.insert(name.clone(), Arc::clone(&validator));
        drop(validators);

        // Must run unlocked: a validator's Display may read the registry.
        tracing::debug!(name = %name, validator = %validator, "registered validator");
        Ok(())
    }

    /// Retrieves a validator by name.
    ///
    /// Returns `None` if no validator with the given name is registered.
    pub fn get(&self, name: &str) -> Option<SharedValidator> {
        self.validators.read().get(name).cloned()
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.validators.read().contains_key(name)
    }

    /// Number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.read().len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.validators.read().is_empty()
    }

    /// Returns a validator that behaves like the one registered as `name`.
    ///
    /// The name is looked up the first time the reference is used and the
    /// result is memoized, so `name` may be registered after this call.
    ///
    /// # Panics
    ///
    /// Using the reference panics if `name` is still unregistered at that
    /// point, or if every handle to the registry has been dropped. Call
    /// [`unresolved`](Self::unresolved) after registration to catch missing
    /// names up front.
    pub fn reference(&self, name: impl Into<String>) -> Reference {
        let name = name.into();
        self.referenced.lock().push(name.clone());

        let validators = Arc::downgrade(&self.validators);
        let target_name = name.clone();
        let resolver: Resolver = Box::new(move || resolve(&validators, &target_name));

        Reference {
            name,
            target: Lazy::new(resolver),
        }
    }

    /// Names handed to [`reference`](Self::reference) that are not registered.
    ///
    /// The result is sorted and deduplicated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Rule, ValidatorRegistry};
    ///
    /// let registry = ValidatorRegistry::new();
    /// registry.register("User", Rule::properties()
    ///     .property("id", registry.reference("UserId"))  // UserId not registered!
    /// ).unwrap();
    ///
    /// assert_eq!(registry.unresolved(), vec!["UserId"]);
    /// ```
    pub fn unresolved(&self) -> Vec<String> {
        let validators = self.validators.read();
        let mut unresolved: Vec<String> = self
            .referenced
            .lock()
            .iter()
            .filter(|name| !validators.contains_key(*name))
            .cloned()
            .collect();

        unresolved.sort();
        unresolved.dedup();
        unresolved
    }

    /// Validates `input` against the validator registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if the name doesn't exist.
    pub fn validate<'a>(
        &self,
        name: &str,
        input: &'a Value,
        options: &ValidateOptions,
    ) -> Result<ValidationResult<&'a Value>, RegistryError> {
        let validator = self
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        Ok(validate(validator.as_ref(), input, options))
    }
}

fn resolve(
    validators: &Weak<RwLock<HashMap<String, SharedValidator>>>,
    name: &str,
) -> SharedValidator {
    let Some(validators) = validators.upgrade() else {
        panic!("cannot resolve reference to '{name}': registry was dropped");
    };
    let found = validators.read().get(name).cloned();
    match found {
        Some(validator) => {
            tracing::trace!(name, "resolved validator reference");
            validator
        }
        None => panic!(
            "cannot resolve reference to '{name}': no validator registered under that name"
        ),
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ValidatorRegistry {
    fn clone(&self) -> Self {
        Self {
            validators: Arc::clone(&self.validators),
            referenced: Arc::clone(&self.referenced),
        }
    }
}

/// A by-name reference into a [`ValidatorRegistry`].
///
/// Displays as the referenced name, which keeps descriptions of recursive
/// validators finite.
pub struct Reference {
    name: String,
    target: Lazy<SharedValidator, Resolver>,
}

impl Reference {
    /// The referenced name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true once the name has been looked up.
    pub fn is_resolved(&self) -> bool {
        self.target.is_initialized()
    }
}

impl Validator for Reference {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        self.target.validate(input)
    }

    fn is(&self, input: &Value) -> bool {
        self.target.is(input)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("name", &self.name)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a validator with a name that already exists.
    #[error("validator '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to validate with a name that doesn't exist.
    #[error("validator '{0}' not found")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{Rule, ValidatorExt};
    use serde_json::json;

    #[test]
    fn test_register_and_get() {
        let registry = ValidatorRegistry::new();
        registry.register("Name", Rule::string()).unwrap();

        assert!(registry.contains("Name"));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("Name").unwrap().is(&json!("x")));
        assert!(registry.get("Other").is_none());
    }

    #[test]
    fn test_duplicate_name() {
        let registry = ValidatorRegistry::new();
        registry.register("Name", Rule::string()).unwrap();
        let err = registry.register("Name", Rule::number()).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(ref n) if n == "Name"));
    }

    #[test]
    fn test_validate_unknown_name() {
        let registry = ValidatorRegistry::new();
        let input = json!(1);
        let result = registry.validate("Missing", &input, &ValidateOptions::default());
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[test]
    fn test_reference_resolves_late() {
        let registry = ValidatorRegistry::new();
        let id = registry.reference("Id");
        assert!(!id.is_resolved());

        registry.register("Id", Rule::integer().and(Rule::gt(0))).unwrap();
        assert!(id.is(&json!(3)));
        assert!(!id.is(&json!(-3)));
        assert!(id.is_resolved());
        assert_eq!(id.to_string(), "Id");
    }

    #[test]
    fn test_unresolved_sorted_and_deduplicated() {
        let registry = ValidatorRegistry::new();
        let _b = registry.reference("B");
        let _a = registry.reference("A");
        let _b_again = registry.reference("B");
        registry.register("A", Rule::null()).unwrap();

        assert_eq!(registry.unresolved(), vec!["B"]);
    }

    #[test]
    #[should_panic(expected = "no validator registered")]
    fn test_reference_to_unknown_name_panics() {
        let registry = ValidatorRegistry::new();
        let missing = registry.reference("Missing");
        missing.is(&json!(1));
    }

    #[test]
    #[should_panic(expected = "registry was dropped")]
    fn test_reference_outliving_registry_panics() {
        let reference = {
            let registry = ValidatorRegistry::new();
            registry.reference("Gone")
        };
        reference.is(&json!(1));
    }

    #[test]
    fn test_recursive_reference_paths() {
        let registry = ValidatorRegistry::new();
        registry
            .register(
                "List",
                Rule::null().or(Rule::properties()
                    .property("head", Rule::integer())
                    .property("tail", registry.reference("List"))),
            )
            .unwrap();

        let input = json!({"head": 1, "tail": {"head": 2, "tail": {"head": "x", "tail": null}}});
        let result = registry
            .validate("List", &input, &ValidateOptions::default())
            .unwrap();
        assert!(result.is_failure());
    }
}
