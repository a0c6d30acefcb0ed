//! `oneOf` strategy.

use keel_core::Schema;
use serde_json::Value;

use super::Validator;
use crate::dispatcher::{Hints, Validatable, ValidationOutcome};
use crate::error::{CompositionOperator, ValidationError, ValidationErrorKind};

/// Evaluates every sibling; exactly one must accept the value.
///
/// Failure reporting matches `anyOf`: one aggregate error, branch errors at
/// `debug`.
pub struct OneOfValidator;

impl Validator for OneOfValidator {
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

        let siblings = schema.one_of.as_deref().unwrap_or_default();
        let mut matches: Vec<(usize, Value)> = Vec::new();
        for (branch, sibling) in siblings.iter().enumerate() {
            match cx.validate_schema(value.clone(), Some(sibling), Hints::default()) {
                Ok(coerced) => matches.push((branch, coerced)),
                Err(error) => tracing::debug!(branch, %error, "oneOf branch rejected value"),
            }
        }

        if matches.len() == 1 {
            let (_, coerced) = matches.swap_remove(0);
            return Ok(coerced);
        }

        let detail = if matches.is_empty() {
            format!("value matched none of {} schemas", siblings.len())
        } else {
            let branches: Vec<String> = matches.iter().map(|(branch, _)| branch.to_string()).collect();
            format!(
                "value matched {} of {} schemas (branches {})",
                matches.len(),
                siblings.len(),
                branches.join(", ")
            )
        };
        let kind = ValidationErrorKind::CompositionFailed {
            operator: CompositionOperator::OneOf,
            detail,
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
    fn single_match_returns_its_coercion() {
        let schema = Schema::one_of(vec![Schema::integer(), Schema::boolean()]);
        assert_eq!(coercing(json!("7"), &schema).unwrap(), json!(7));
    }

    #[test]
    fn two_matches_fail_and_name_the_branches() {
        let schema = Schema::one_of(vec![Schema::integer(), Schema::number(), Schema::string()]);
        let error = strict(json!(3), &schema).unwrap_err();
        assert_eq!(
            error.kind(),
            &ValidationErrorKind::CompositionFailed {
                operator: CompositionOperator::OneOf,
                detail: "value matched 2 of 3 schemas (branches 0, 1)".into(),
            }
        );
    }

    #[test]
    fn no_match_fails() {
        let schema = Schema::one_of(vec![Schema::integer(), Schema::boolean()]);
        let error = strict(json!("x"), &schema).unwrap_err();
        assert_eq!(
            error.kind(),
            &ValidationErrorKind::CompositionFailed {
                operator: CompositionOperator::OneOf,
                detail: "value matched none of 2 schemas".into(),
            }
        );
    }

    #[test]
    fn implicit_null_matches_every_branch() {
        // Every branch accepts null, so "exactly one" is violated unless the
        // oneOf node itself is nullable.
        let schema = Schema::one_of(vec![Schema::integer(), Schema::string()]);
        assert_eq!(strict(Value::Null, &schema).unwrap_err().code(), "composition_failed");
        let nullable = schema.with_nullable(true);
        assert_eq!(strict(Value::Null, &nullable).unwrap(), Value::Null);
    }
}
