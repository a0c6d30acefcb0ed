//! Validation error types.
//!
//! A failed validation produces exactly one [`ValidationError`]: the first
//! violation found under the dispatch order. It carries the offending value,
//! the schema node's reference (when the loader attached one), and the path
//! from the root value to the failure.

use std::fmt;

use keel_core::value::json_type_name;
use keel_core::Schema;
use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// PathSegment
// ---------------------------------------------------------------------------

/// One step from a container to a child value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // JSON pointer escaping: `~` first, then `/`.
            Self::Key(key) => f.write_str(&key.replace('~', "~0").replace('/', "~1")),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

// ---------------------------------------------------------------------------
// CompositionOperator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositionOperator {
    AnyOf,
    AllOf,
    OneOf,
}

impl CompositionOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnyOf => "anyOf",
            Self::AllOf => "allOf",
            Self::OneOf => "oneOf",
        }
    }
}

impl fmt::Display for CompositionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ValidationErrorKind
// ---------------------------------------------------------------------------

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn lower_bound(exclusive: &bool) -> &'static str {
    if *exclusive { ">" } else { ">=" }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn upper_bound(exclusive: &bool) -> &'static str {
    if *exclusive { "<" } else { "<=" }
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationErrorKind {
    /// The value's runtime shape is incompatible with the declared type.
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        expected: String,
        actual: &'static str,
    },

    /// Right shape, but the value cannot be represented as the declared type.
    #[error("cannot use value as {expected}: {reason}")]
    UnsupportedValue { expected: String, reason: String },

    #[error("null is not allowed")]
    NotNullable,

    #[error("missing required properties: {}", .names.join(", "))]
    MissingRequiredProperty { names: Vec<String> },

    #[error("properties not permitted: {}", .names.join(", "))]
    UnpermittedAdditionalProperty { names: Vec<String> },

    #[error("{operator} failed: {detail}")]
    CompositionFailed {
        operator: CompositionOperator,
        detail: String,
    },

    #[error("invalid {format}: {reason}")]
    FormatParseFailure { format: String, reason: String },

    #[error("value is not one of the enumerated values")]
    NotEnumMember,

    #[error("value must be {} {minimum}", lower_bound(.exclusive))]
    LessThanMinimum { minimum: f64, exclusive: bool },

    #[error("value must be {} {maximum}", upper_bound(.exclusive))]
    MoreThanMaximum { maximum: f64, exclusive: bool },

    #[error("length {actual} is shorter than minLength {min_length}")]
    LessThanMinLength { min_length: usize, actual: usize },

    #[error("length {actual} is longer than maxLength {max_length}")]
    MoreThanMaxLength { max_length: usize, actual: usize },

    #[error("value does not match pattern {pattern}")]
    PatternMismatch { pattern: String },

    #[error("pattern {pattern} does not compile: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("{actual} items is fewer than minItems {min_items}")]
    LessThanMinItems { min_items: usize, actual: usize },

    #[error("{actual} items is more than maxItems {max_items}")]
    MoreThanMaxItems { max_items: usize, actual: usize },

    #[error("items at {first} and {second} are equal")]
    NotUniqueItems { first: usize, second: usize },

    #[error("{actual} properties is fewer than minProperties {min_properties}")]
    LessThanMinProperties { min_properties: usize, actual: usize },

    #[error("{actual} properties is more than maxProperties {max_properties}")]
    MoreThanMaxProperties { max_properties: usize, actual: usize },
}

impl ValidationErrorKind {
    /// Stable snake_case identifier for this kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::UnsupportedValue { .. } => "unsupported_value",
            Self::NotNullable => "not_nullable",
            Self::MissingRequiredProperty { .. } => "missing_required_property",
            Self::UnpermittedAdditionalProperty { .. } => "unpermitted_additional_property",
            Self::CompositionFailed { .. } => "composition_failed",
            Self::FormatParseFailure { .. } => "format_parse_failure",
            Self::NotEnumMember => "not_enum_member",
            Self::LessThanMinimum { .. } => "less_than_minimum",
            Self::MoreThanMaximum { .. } => "more_than_maximum",
            Self::LessThanMinLength { .. } => "less_than_min_length",
            Self::MoreThanMaxLength { .. } => "more_than_max_length",
            Self::PatternMismatch { .. } => "pattern_mismatch",
            Self::InvalidPattern { .. } => "invalid_pattern",
            Self::LessThanMinItems { .. } => "less_than_min_items",
            Self::MoreThanMaxItems { .. } => "more_than_max_items",
            Self::NotUniqueItems { .. } => "not_unique_items",
            Self::LessThanMinProperties { .. } => "less_than_min_properties",
            Self::MoreThanMaxProperties { .. } => "more_than_max_properties",
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A conformance failure located within the validated value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    kind: ValidationErrorKind,
    value: Value,
    schema_reference: Option<String>,
    path: Vec<PathSegment>,
}

impl ValidationError {
    /// Failure of `value` against `schema`, located at the current node.
    #[must_use]
    pub fn new(kind: ValidationErrorKind, value: Value, schema: &Schema) -> Self {
        Self {
            kind,
            value,
            schema_reference: schema.reference.clone(),
            path: Vec::new(),
        }
    }

    /// `value` does not have the shape `expected` names.
    #[must_use]
    pub fn type_mismatch(expected: impl fmt::Display, value: Value, schema: &Schema) -> Self {
        let kind = ValidationErrorKind::TypeMismatch {
            expected: expected.to_string(),
            actual: json_type_name(&value),
        };
        Self::new(kind, value, schema)
    }

    /// Prefix `segment` onto the path. Called while unwinding out of a
    /// container, so the outermost segment ends up first.
    #[must_use]
    pub fn within(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }

    /// Report against `original` when the failing check ran on a coerced
    /// form of it.
    #[must_use]
    pub(crate) fn with_original(mut self, original: Option<Value>) -> Self {
        if let Some(original) = original {
            self.value = original;
        }
        self
    }

    #[must_use]
    pub const fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// The offending value, as it was before any coercion at this node.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn schema_reference(&self) -> Option<&str> {
        self.schema_reference.as_deref()
    }

    #[must_use]
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Path rendered as a JSON pointer fragment, e.g. `#/items/1/n`.
    #[must_use]
    pub fn pointer(&self) -> String {
        let mut pointer = String::from("#");
        for segment in &self.path {
            pointer.push('/');
            pointer.push_str(&segment.to_string());
        }
        pointer
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pointer(), self.kind)?;
        if let Some(reference) = &self.schema_reference {
            write!(f, " (schema {reference})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// Registry-level errors
// ---------------------------------------------------------------------------

/// Errors from [`crate::ValidatorRegistry::validate`].
#[derive(Debug, Error)]
pub enum ValidateError {
    /// No scope with this name has been registered.
    #[error("Validation scope not registered: {0}")]
    UnknownScope(String),

    /// The value did not conform.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Errors raised while assembling a validation scope.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A scope must provide a validator for every kind.
    #[error("Scope '{scope}' is missing validators for: {}", .missing.join(", "))]
    MissingValidators {
        scope: String,
        missing: Vec<&'static str>,
    },
}
