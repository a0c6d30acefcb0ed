//! Strategy for null values, chosen for any non-composition node.

use keel_core::Schema;
use serde_json::Value;

use super::Validator;
use crate::dispatcher::{Hints, Validatable, ValidationOutcome};
use crate::error::{ValidationError, ValidationErrorKind};

/// Accepts null unless the node declares `nullable: false`.
pub struct NullValidator;

impl Validator for NullValidator {
    fn coerce_and_validate(
        &self,
        _cx: &dyn Validatable,
        value: Value,
        schema: &Schema,
        _hints: Hints,
    ) -> ValidationOutcome {
        if !value.is_null() {
            return Err(ValidationError::type_mismatch("null", value, schema));
        }
        if !schema.allows_null() {
            return Err(ValidationError::new(ValidationErrorKind::NotNullable, value, schema));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::test_support::{coercing, strict};
    use keel_core::SchemaType;
    use serde_json::json;

    #[test]
    fn null_passes_every_type_by_default() {
        for schema_type in [
            SchemaType::String,
            SchemaType::Integer,
            SchemaType::Number,
            SchemaType::Boolean,
            SchemaType::Object,
            SchemaType::Array,
        ] {
            let schema = Schema::of_type(schema_type);
            assert_eq!(strict(Value::Null, &schema).unwrap(), Value::Null);
            assert_eq!(coercing(Value::Null, &schema).unwrap(), Value::Null);
        }
    }

    #[test]
    fn explicit_non_nullable_rejects_null() {
        let schema = Schema::string().with_nullable(false);
        let error = strict(Value::Null, &schema).unwrap_err();
        assert_eq!(error.code(), "not_nullable");
    }

    #[test]
    fn rejects_non_null_when_called_directly() {
        let error = NullValidator
            .coerce_and_validate(
                &crate::SchemaValidator::new(
                    &crate::ValidationScope::default_scope(),
                    &keel_core::Options::default(),
                ),
                json!(1),
                &Schema::default(),
                Hints::default(),
            )
            .unwrap_err();
        assert_eq!(error.code(), "type_mismatch");
    }
}
