//! `anyOf` strategy.

use keel_core::Schema;
use serde_json::Value;

use super::Validator;
use crate::dispatcher::{Hints, Validatable, ValidationOutcome};
use crate::error::{CompositionOperator, ValidationError, ValidationErrorKind};

/// Tries siblings in declaration order and returns the first success.
///
/// When every sibling fails the result is one aggregate
/// `CompositionFailed`; individual branch errors are logged at `debug`.
pub struct AnyOfValidator;

impl Validator for AnyOfValidator {
    fn coerce_and_validate(
        &self,
        cx: &dyn Validatable,
        value: Value,
        schema: &Schema,
        _hints: Hints,
    ) -> ValidationOutcome {
        if value.is_null() && schema.is_explicitly_nullable() {
            return Ok(value);
        }

        let siblings = schema.any_of.as_deref().unwrap_or_default();
        for (branch, sibling) in siblings.iter().enumerate() {
            match cx.validate_schema(value.clone(), Some(sibling), Hints::default()) {
                Ok(coerced) => return Ok(coerced),
                Err(error) => tracing::debug!(branch, %error, "anyOf branch rejected value"),
            }
        }

        let kind = ValidationErrorKind::CompositionFailed {
            operator: CompositionOperator::AnyOf,
            detail: format!("value matched none of {} schemas", siblings.len()),
        };
        Err(ValidationError::new(kind, value, schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::test_support::{coercing, strict};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn first_matching_branch_wins() {
        let schema = Schema::any_of(vec![Schema::integer(), Schema::string()]);
        // Both branches accept "5" under coercion; the integer one comes first.
        assert_eq!(coercing(json!("5"), &schema).unwrap(), json!(5));
        assert_eq!(coercing(json!("five"), &schema).unwrap(), json!("five"));
    }

    #[test]
    fn all_branches_failing_is_one_aggregate_error() {
        let schema = Schema::any_of(vec![Schema::integer(), Schema::boolean()]);
        let error = strict(json!("x"), &schema).unwrap_err();
        assert_eq!(
            error.kind(),
            &ValidationErrorKind::CompositionFailed {
                operator: CompositionOperator::AnyOf,
                detail: "value matched none of 2 schemas".into(),
            }
        );
        assert_eq!(error.value(), &json!("x"));
    }

    #[test]
    fn explicit_nullable_short_circuits() {
        let schema = Schema::any_of(vec![Schema::integer().with_nullable(false)]).with_nullable(true);
        assert_eq!(strict(Value::Null, &schema).unwrap(), Value::Null);
    }

    #[test]
    fn null_goes_through_branches_otherwise() {
        let schema = Schema::any_of(vec![Schema::integer().with_nullable(false)]);
        assert_eq!(strict(Value::Null, &schema).unwrap_err().code(), "composition_failed");
    }

    #[test]
    fn empty_list_never_matches() {
        let schema = Schema::any_of(Vec::new());
        assert_eq!(strict(json!(1), &schema).unwrap_err().code(), "composition_failed");
    }
}
