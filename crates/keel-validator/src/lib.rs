//! # keel-validator
//!
//! Recursive validation and coercion of JSON values against keel schemas.
//!
//! A call walks the value and the schema together. Each schema node selects
//! one strategy ([`ValidatorKind`]); strategies for objects, arrays and the
//! composition keywords recurse through the same dispatcher. The result is
//! either the fully coerced value or the first [`ValidationError`], which
//! carries the offending value and the path to it.
//!
//! ```
//! use keel_core::{Options, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::object().with_property("n", Schema::integer());
//! let coerced = keel_validator::validate(json!({"n": "3"}), &schema, &Options::coercing()).unwrap();
//! assert_eq!(coerced, json!({"n": 3}));
//! ```
//!
//! Strategies can be swapped per kind by building a [`ValidationScope`] and
//! registering it in a [`ValidatorRegistry`].

pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod validators;

pub use dispatcher::{Hints, SchemaValidator, Validatable, ValidationOutcome};
pub use error::{
    CompositionOperator, PathSegment, RegistryError, ValidateError, ValidationError,
    ValidationErrorKind,
};
pub use registry::{
    DEFAULT_SCOPE, ScopeBuilder, ValidationScope, ValidatorFactory, ValidatorKind,
    ValidatorRegistry, ValidatorSet,
};
pub use validators::Validator;

use keel_core::{Options, Schema};
use serde_json::Value;

/// Validate `value` against `schema` with the built-in validators.
///
/// # Errors
///
/// Returns the first `ValidationError` encountered.
pub fn validate(value: Value, schema: &Schema, options: &Options) -> Result<Value, ValidationError> {
    SchemaValidator::new(&ValidationScope::default_scope(), options).validate_data(value, schema)
}
