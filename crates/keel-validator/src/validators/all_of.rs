//! `allOf` strategy.

use keel_core::{Schema, SchemaType};
use serde_json::Value;

use super::Validator;
use crate::dispatcher::{Hints, Validatable, ValidationOutcome};
use crate::error::{ValidationError, ValidationErrorKind};

/// Validates against every sibling in order, feeding each sibling the value
/// the previous one produced. The first failure is returned unchanged.
///
/// Object siblings skip their own `additionalProperties: false` check. Once
/// all siblings pass, keys declared by no object sibling are rejected if
/// every object sibling forbids additional properties.
pub struct AllOfValidator;

impl Validator for AllOfValidator {
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

        let mut undeclared: Vec<String> = value
            .as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default();
        let mut saw_object = false;
        let mut extras_allowed = false;

        let mut current = value;
        for sibling in schema.all_of.as_deref().unwrap_or_default() {
            current = cx.validate_schema(current, Some(sibling), Hints::all_of_sibling())?;

            if sibling.schema_type == Some(SchemaType::Object) {
                saw_object = true;
                undeclared.retain(|key| !sibling.declares_property(key));
                if !sibling.forbids_additional_properties() {
                    extras_allowed = true;
                }
            } else {
                // A nested composition or non-object sibling owns its own keys.
                undeclared.clear();
            }
        }

        if saw_object && !extras_allowed && !undeclared.is_empty() {
            let kind = ValidationErrorKind::UnpermittedAdditionalProperty { names: undeclared };
            return Err(ValidationError::new(kind, current, schema));
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::test_support::{coercing, strict};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn named() -> Schema {
        Schema::object()
            .with_property("name", Schema::string())
            .deny_additional_properties()
    }

    fn aged() -> Schema {
        Schema::object()
            .with_property("age", Schema::integer())
            .deny_additional_properties()
    }

    #[test]
    fn coercion_is_cumulative() {
        // The number sibling widens the integer produced by the first.
        let schema = Schema::all_of(vec![Schema::integer(), Schema::number()]);
        assert_eq!(coercing(json!("4"), &schema).unwrap(), json!(4.0));
    }

    #[test]
    fn first_failure_is_returned_as_is() {
        let schema = Schema::all_of(vec![Schema::integer(), Schema::integer().with_maximum(3.0, false)]);
        let error = strict(json!(5), &schema).unwrap_err();
        assert_eq!(error.code(), "more_than_maximum");
    }

    #[test]
    fn property_union_satisfies_closed_siblings() {
        let schema = Schema::all_of(vec![named(), aged()]);
        let coerced = coercing(json!({"name": "Ada", "age": "36"}), &schema).unwrap();
        assert_eq!(coerced, json!({"name": "Ada", "age": 36}));
    }

    #[test]
    fn keys_outside_the_union_are_rejected() {
        let schema = Schema::all_of(vec![named(), aged()]);
        let error = strict(json!({"name": "Ada", "age": 36, "extra": 1}), &schema).unwrap_err();
        assert_eq!(
            error.kind(),
            &ValidationErrorKind::UnpermittedAdditionalProperty {
                names: vec!["extra".into()]
            }
        );
    }

    #[test]
    fn one_open_sibling_allows_extras() {
        let open = Schema::object().with_property("age", Schema::integer());
        let schema = Schema::all_of(vec![named(), open]);
        assert!(strict(json!({"name": "Ada", "extra": 1}), &schema).is_ok());
    }

    #[test]
    fn empty_list_accepts() {
        let schema = Schema::all_of(Vec::new());
        assert_eq!(strict(json!({"a": 1}), &schema).unwrap(), json!({"a": 1}));
    }
}
