//! Strategy selection and the recursive entry point.
//!
//! [`SchemaValidator`] owns the validator set for one top-level call. Every
//! strategy receives it back as a [`Validatable`] and uses it for any nested
//! `(value, schema)` pair, so the whole tree is walked in a single pass.

use keel_core::{Options, Schema, SchemaType};
use serde_json::Value;

use crate::error::ValidationError;
use crate::registry::{ValidationScope, ValidatorKind, ValidatorSet};

/// Result of validating one `(value, schema)` pair.
pub type ValidationOutcome = Result<Value, ValidationError>;

/// Per-call flags a strategy passes down for one child validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hints {
    /// The schema is a direct `allOf` sibling; the allOf node checks
    /// undeclared properties across all siblings instead.
    pub parent_all_of: bool,
}

impl Hints {
    #[must_use]
    pub const fn all_of_sibling() -> Self {
        Self {
            parent_all_of: true,
        }
    }
}

/// Re-entry point strategies use for nested values.
pub trait Validatable {
    /// Validate `value` against `schema`, choosing the strategy for the node.
    /// An absent schema accepts the value unchanged.
    fn validate_schema(&self, value: Value, schema: Option<&Schema>, hints: Hints) -> ValidationOutcome;

    /// Run the integer strategy directly. `number` nodes use this for
    /// integer-shaped values.
    fn validate_integer(&self, value: Value, schema: &Schema) -> ValidationOutcome;
}

/// Dispatcher for one top-level validation call.
pub struct SchemaValidator {
    validators: ValidatorSet,
}

impl SchemaValidator {
    /// Instantiate every validator in `scope` with `options`.
    #[must_use]
    pub fn new(scope: &ValidationScope, options: &Options) -> Self {
        Self {
            validators: scope.instantiate(options),
        }
    }

    /// Validate a whole value, returning the fully coerced result.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered.
    pub fn validate_data(&self, value: Value, schema: &Schema) -> ValidationOutcome {
        self.validate_schema(value, Some(schema), Hints::default())
            .inspect_err(|error| tracing::debug!(%error, code = error.code(), "value rejected"))
    }

    /// Strategy for `value` under `schema`.
    ///
    /// Composition keywords win over `type`; null is checked before `type`
    /// so every kind shares the same null handling.
    #[must_use]
    pub fn select(value: &Value, schema: &Schema) -> ValidatorKind {
        if schema.any_of.is_some() {
            return ValidatorKind::AnyOf;
        }
        if schema.all_of.is_some() {
            return ValidatorKind::AllOf;
        }
        if schema.one_of.is_some() {
            return ValidatorKind::OneOf;
        }
        if value.is_null() {
            return ValidatorKind::Null;
        }

        match schema.schema_type {
            Some(SchemaType::String) => ValidatorKind::String,
            Some(SchemaType::Integer) => ValidatorKind::Integer,
            Some(SchemaType::Boolean) => ValidatorKind::Boolean,
            Some(SchemaType::Number) => ValidatorKind::Float,
            Some(SchemaType::Object) => ValidatorKind::Object,
            Some(SchemaType::Array) => ValidatorKind::Array,
            Some(SchemaType::Other) | None => ValidatorKind::UnspecifiedType,
        }
    }
}

impl Validatable for SchemaValidator {
    fn validate_schema(&self, value: Value, schema: Option<&Schema>, hints: Hints) -> ValidationOutcome {
        let Some(schema) = schema else {
            return Ok(value);
        };

        let kind = Self::select(&value, schema);
        tracing::trace!(validator = %kind, "dispatching");
        self.validators
            .get(kind)
            .coerce_and_validate(self, value, schema, hints)
    }

    fn validate_integer(&self, value: Value, schema: &Schema) -> ValidationOutcome {
        self.validators
            .get(ValidatorKind::Integer)
            .coerce_and_validate(self, value, schema, Hints::default())
    }
}
