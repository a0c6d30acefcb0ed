//! `type: array` strategy.

use keel_core::value::loosely_equal;
use keel_core::{Schema, SchemaType};
use serde_json::Value;

use super::Validator;
use crate::dispatcher::{Hints, Validatable, ValidationOutcome};
use crate::error::{PathSegment, ValidationError, ValidationErrorKind};

/// Validates every element against `items`, in order, stopping at the first
/// failure.
pub struct ArrayValidator;

impl Validator for ArrayValidator {
    fn coerce_and_validate(
        &self,
        cx: &dyn Validatable,
        value: Value,
        schema: &Schema,
        _hints: Hints,
    ) -> ValidationOutcome {
        let items = match value {
            Value::Array(items) => items,
            other => return Err(ValidationError::type_mismatch(SchemaType::Array, other, schema)),
        };

        if let Some(kind) = node_violation(&items, schema) {
            return Err(ValidationError::new(kind, Value::Array(items), schema));
        }

        let item_schema = schema.items.as_deref();
        let mut coerced = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let item = cx
                .validate_schema(item, item_schema, Hints::default())
                .map_err(|e| e.within(PathSegment::Index(index)))?;
            coerced.push(item);
        }
        Ok(Value::Array(coerced))
    }
}

fn node_violation(items: &[Value], schema: &Schema) -> Option<ValidationErrorKind> {
    let actual = items.len();
    if let Some(min_items) = schema.min_items.filter(|min| actual < *min) {
        return Some(ValidationErrorKind::LessThanMinItems { min_items, actual });
    }
    if let Some(max_items) = schema.max_items.filter(|max| actual > *max) {
        return Some(ValidationErrorKind::MoreThanMaxItems { max_items, actual });
    }

    if schema.unique_items == Some(true) {
        for (first, a) in items.iter().enumerate() {
            if let Some(offset) = items[first + 1..].iter().position(|b| loosely_equal(a, b)) {
                return Some(ValidationErrorKind::NotUniqueItems {
                    first,
                    second: first + 1 + offset,
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::test_support::{coercing, strict};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn rejects_non_arrays() {
        let schema = Schema::array_of(Schema::integer());
        assert_eq!(strict(json!({"0": 1}), &schema).unwrap_err().code(), "type_mismatch");
    }

    #[test]
    fn coerces_every_element_in_order() {
        let schema = Schema::array_of(Schema::integer());
        assert_eq!(coercing(json!(["1", 2, 3.0]), &schema).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn missing_items_schema_passes_elements_through() {
        let schema = Schema::of_type(SchemaType::Array);
        let value = json!([1, "two", {"three": 3}]);
        assert_eq!(coercing(value.clone(), &schema).unwrap(), value);
    }

    #[test]
    fn first_bad_element_is_reported_with_its_index() {
        let schema = Schema::array_of(Schema::integer());
        let error = strict(json!([1, "x", "y"]), &schema).unwrap_err();
        assert_eq!(error.pointer(), "#/1");
        assert_eq!(error.value(), &json!("x"));
    }

    #[test]
    fn item_counts_are_enforced() {
        let schema = Schema::array_of(Schema::integer()).with_item_count(Some(1), Some(2));
        assert_eq!(strict(json!([]), &schema).unwrap_err().code(), "less_than_min_items");
        assert_eq!(strict(json!([1, 2, 3]), &schema).unwrap_err().code(), "more_than_max_items");
        assert!(strict(json!([1, 2]), &schema).is_ok());
    }

    #[test]
    fn unique_items_finds_the_duplicate_pair() {
        let schema = Schema::array_of(Schema::number()).with_unique_items();
        let error = strict(json!([1, 2, 3, 2.0]), &schema).unwrap_err();
        assert_eq!(
            error.kind(),
            &ValidationErrorKind::NotUniqueItems { first: 1, second: 3 }
        );
        assert!(strict(json!([1, 2, 3]), &schema).is_ok());
    }

    #[test]
    fn unique_items_keeps_tiny_distinct_floats_apart() {
        let schema = Schema::array_of(Schema::number()).with_unique_items();
        assert!(strict(json!([1e-20, 3e-20]), &schema).is_ok());
    }
}
