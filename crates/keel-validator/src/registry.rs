//! Validation scopes and the registry that names them.
//!
//! A [`ValidationScope`] is a complete table of validator factories, one per
//! [`ValidatorKind`]. Callers substitute behavior for any kind by registering
//! another scope; the dispatcher never changes. Factories receive the call's
//! `Options`, so instances are built per top-level call and never shared.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use keel_core::{Options, Schema};
use serde_json::Value;

use crate::dispatcher::SchemaValidator;
use crate::error::{RegistryError, ValidateError};
use crate::validators::{
    AllOfValidator, AnyOfValidator, ArrayValidator, BooleanValidator, FloatValidator,
    IntegerValidator, NullValidator, ObjectValidator, OneOfValidator, StringValidator,
    UnspecifiedTypeValidator, Validator,
};

/// Name of the scope every registry starts with.
pub const DEFAULT_SCOPE: &str = "default";

// ---------------------------------------------------------------------------
// ValidatorKind
// ---------------------------------------------------------------------------

/// Validation strategy category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorKind {
    String,
    Integer,
    Float,
    Boolean,
    Object,
    Array,
    AnyOf,
    AllOf,
    OneOf,
    Null,
    UnspecifiedType,
}

impl ValidatorKind {
    /// Every kind, in table order.
    pub const ALL: [Self; 11] = [
        Self::String,
        Self::Integer,
        Self::Float,
        Self::Boolean,
        Self::Object,
        Self::Array,
        Self::AnyOf,
        Self::AllOf,
        Self::OneOf,
        Self::Null,
        Self::UnspecifiedType,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::AnyOf => "any_of",
            Self::AllOf => "all_of",
            Self::OneOf => "one_of",
            Self::Null => "null",
            Self::UnspecifiedType => "unspecified_type",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ValidationScope
// ---------------------------------------------------------------------------

/// Builds a validator bound to one call's options.
pub type ValidatorFactory = Arc<dyn Fn(&Options) -> Box<dyn Validator> + Send + Sync>;

/// A named, complete set of validator factories.
pub struct ValidationScope {
    name: String,
    /// Indexed by `ValidatorKind::index`; always `ValidatorKind::ALL.len()` long.
    factories: Vec<ValidatorFactory>,
}

impl ValidationScope {
    /// The built-in validators under [`DEFAULT_SCOPE`].
    #[must_use]
    pub fn default_scope() -> Self {
        Self {
            name: DEFAULT_SCOPE.to_string(),
            factories: ValidatorKind::ALL.into_iter().map(default_factory).collect(),
        }
    }

    /// Start an empty scope; every kind must be registered before `build`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ScopeBuilder {
        ScopeBuilder {
            name: name.into(),
            factories: HashMap::new(),
        }
    }

    /// Start a scope pre-filled with the built-in validators, to override
    /// only some kinds.
    #[must_use]
    pub fn extend_default(name: impl Into<String>) -> ScopeBuilder {
        ScopeBuilder {
            name: name.into(),
            factories: ValidatorKind::ALL
                .into_iter()
                .map(|kind| (kind, default_factory(kind)))
                .collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build one validator per kind for a single top-level call.
    #[must_use]
    pub fn instantiate(&self, options: &Options) -> ValidatorSet {
        ValidatorSet {
            validators: self.factories.iter().map(|factory| factory(options)).collect(),
        }
    }
}

impl fmt::Debug for ValidationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationScope")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn default_factory(kind: ValidatorKind) -> ValidatorFactory {
    match kind {
        ValidatorKind::String => Arc::new(|o: &Options| -> Box<dyn Validator> {
            Box::new(StringValidator::new(o))
        }),
        ValidatorKind::Integer => Arc::new(|o: &Options| -> Box<dyn Validator> {
            Box::new(IntegerValidator::new(o))
        }),
        ValidatorKind::Float => Arc::new(|o: &Options| -> Box<dyn Validator> {
            Box::new(FloatValidator::new(o))
        }),
        ValidatorKind::Boolean => Arc::new(|o: &Options| -> Box<dyn Validator> {
            Box::new(BooleanValidator::new(o))
        }),
        ValidatorKind::Object => {
            Arc::new(|_: &Options| -> Box<dyn Validator> { Box::new(ObjectValidator) })
        }
        ValidatorKind::Array => {
            Arc::new(|_: &Options| -> Box<dyn Validator> { Box::new(ArrayValidator) })
        }
        ValidatorKind::AnyOf => {
            Arc::new(|_: &Options| -> Box<dyn Validator> { Box::new(AnyOfValidator) })
        }
        ValidatorKind::AllOf => {
            Arc::new(|_: &Options| -> Box<dyn Validator> { Box::new(AllOfValidator) })
        }
        ValidatorKind::OneOf => {
            Arc::new(|_: &Options| -> Box<dyn Validator> { Box::new(OneOfValidator) })
        }
        ValidatorKind::Null => {
            Arc::new(|_: &Options| -> Box<dyn Validator> { Box::new(NullValidator) })
        }
        ValidatorKind::UnspecifiedType => Arc::new(|_: &Options| -> Box<dyn Validator> {
            Box::new(UnspecifiedTypeValidator)
        }),
    }
}

// ---------------------------------------------------------------------------
// ScopeBuilder
// ---------------------------------------------------------------------------

/// Collects factories for a [`ValidationScope`].
pub struct ScopeBuilder {
    name: String,
    factories: HashMap<ValidatorKind, ValidatorFactory>,
}

impl ScopeBuilder {
    /// Use `factory` for `kind`, replacing any earlier registration.
    #[must_use]
    pub fn register<F>(mut self, kind: ValidatorKind, factory: F) -> Self
    where
        F: Fn(&Options) -> Box<dyn Validator> + Send + Sync + 'static,
    {
        self.factories.insert(kind, Arc::new(factory));
        self
    }

    /// Finish the scope.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::MissingValidators` naming every kind without
    /// a factory.
    pub fn build(mut self) -> Result<ValidationScope, RegistryError> {
        let missing: Vec<&'static str> = ValidatorKind::ALL
            .into_iter()
            .filter(|kind| !self.factories.contains_key(kind))
            .map(ValidatorKind::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(RegistryError::MissingValidators {
                scope: self.name,
                missing,
            });
        }

        let factories = ValidatorKind::ALL
            .into_iter()
            .filter_map(|kind| self.factories.remove(&kind))
            .collect();
        Ok(ValidationScope {
            name: self.name,
            factories,
        })
    }
}

// ---------------------------------------------------------------------------
// ValidatorSet
// ---------------------------------------------------------------------------

/// The validators instantiated for one top-level call.
pub struct ValidatorSet {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidatorSet {
    #[must_use]
    pub fn get(&self, kind: ValidatorKind) -> &dyn Validator {
        self.validators[kind.index()].as_ref()
    }
}

// ---------------------------------------------------------------------------
// ValidatorRegistry
// ---------------------------------------------------------------------------

/// Named validation scopes. Starts with [`DEFAULT_SCOPE`].
#[derive(Debug)]
pub struct ValidatorRegistry {
    scopes: HashMap<String, ValidationScope>,
}

impl ValidatorRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut scopes = HashMap::new();
        scopes.insert(DEFAULT_SCOPE.to_string(), ValidationScope::default_scope());
        Self { scopes }
    }

    /// Add `scope`, returning the scope it replaced under the same name.
    pub fn register(&mut self, scope: ValidationScope) -> Option<ValidationScope> {
        self.scopes.insert(scope.name.clone(), scope)
    }

    /// Get a scope by name. Returns `None` if not registered.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ValidationScope> {
        self.scopes.get(name)
    }

    /// List registered scope names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scopes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Validate `value` against `schema` with the validators of `scope`.
    ///
    /// # Errors
    ///
    /// Returns `ValidateError::UnknownScope` if `scope` is not registered, or
    /// `ValidateError::Invalid` with the first conformance failure.
    pub fn validate(
        &self,
        value: Value,
        schema: &Schema,
        options: &Options,
        scope: &str,
    ) -> Result<Value, ValidateError> {
        let scope = self
            .get(scope)
            .ok_or_else(|| ValidateError::UnknownScope(scope.to_string()))?;
        Ok(SchemaValidator::new(scope, options).validate_data(value, schema)?)
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::{Hints, Validatable, ValidationOutcome};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct Constant(Value);

    impl Validator for Constant {
        fn coerce_and_validate(
            &self,
            _cx: &dyn Validatable,
            _value: Value,
            _schema: &Schema,
            _hints: Hints,
        ) -> ValidationOutcome {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn kinds_are_in_table_order() {
        for (position, kind) in ValidatorKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), position);
        }
    }

    #[test]
    fn default_registry_has_default_scope() {
        let registry = ValidatorRegistry::default();
        assert_eq!(registry.list(), vec![DEFAULT_SCOPE]);
        assert_eq!(registry.get(DEFAULT_SCOPE).unwrap().name(), DEFAULT_SCOPE);
    }

    #[test]
    fn unknown_scope_is_reported() {
        let registry = ValidatorRegistry::default();
        let result = registry.validate(json!(1), &Schema::integer(), &Options::default(), "bogus");
        assert!(matches!(result, Err(ValidateError::UnknownScope(name)) if name == "bogus"));
    }

    #[test]
    fn incomplete_scope_fails_to_build() {
        let result = ValidationScope::builder("partial")
            .register(ValidatorKind::String, |_: &Options| -> Box<dyn Validator> {
                Box::new(Constant(json!("s")))
            })
            .build();
        let Err(RegistryError::MissingValidators { scope, missing }) = result else {
            panic!("expected MissingValidators");
        };
        assert_eq!(scope, "partial");
        assert_eq!(missing.len(), ValidatorKind::ALL.len() - 1);
        assert!(!missing.contains(&"string"));
    }

    #[test]
    fn extended_scope_overrides_one_kind() {
        let scope = ValidationScope::extend_default("loose-strings")
            .register(ValidatorKind::String, |_: &Options| -> Box<dyn Validator> {
                Box::new(Constant(json!("replaced")))
            })
            .build()
            .unwrap();

        let mut registry = ValidatorRegistry::default();
        assert!(registry.register(scope).is_none());
        assert_eq!(registry.list(), vec![DEFAULT_SCOPE, "loose-strings"]);

        let options = Options::default();
        let replaced = registry
            .validate(json!("x"), &Schema::string(), &options, "loose-strings")
            .unwrap();
        assert_eq!(replaced, json!("replaced"));

        // Other kinds still use the built-in validators.
        let result = registry.validate(json!("x"), &Schema::integer(), &options, "loose-strings");
        assert!(matches!(result, Err(ValidateError::Invalid(_))));
    }

    #[test]
    fn registering_same_name_replaces() {
        let mut registry = ValidatorRegistry::default();
        let replaced = registry.register(ValidationScope::default_scope());
        assert_eq!(replaced.map(|s| s.name().to_string()), Some(DEFAULT_SCOPE.to_string()));
    }
}
