//! `type: object` strategy.

use keel_core::{Schema, SchemaType};
use serde_json::{Map, Value};

use super::Validator;
use crate::dispatcher::{Hints, Validatable, ValidationOutcome};
use crate::error::{PathSegment, ValidationError, ValidationErrorKind};

/// Checks node-level keywords, then recurses into every entry in key order.
///
/// Declared properties validate against their schema, undeclared ones
/// against an `additionalProperties` schema when there is one.
pub struct ObjectValidator;

impl Validator for ObjectValidator {
    fn coerce_and_validate(
        &self,
        cx: &dyn Validatable,
        value: Value,
        schema: &Schema,
        hints: Hints,
    ) -> ValidationOutcome {
        let map = match value {
            Value::Object(map) => map,
            other => return Err(ValidationError::type_mismatch(SchemaType::Object, other, schema)),
        };

        if let Some(kind) = node_violation(&map, schema, hints) {
            return Err(ValidationError::new(kind, Value::Object(map), schema));
        }

        let mut coerced = Map::with_capacity(map.len());
        for (key, child) in map {
            let child_schema = schema
                .property(&key)
                .or_else(|| schema.additional_properties_schema());
            let child = cx
                .validate_schema(child, child_schema, Hints::default())
                .map_err(|e| e.within(PathSegment::Key(key.clone())))?;
            coerced.insert(key, child);
        }
        Ok(Value::Object(coerced))
    }
}

/// First violation of a keyword on the object node itself.
fn node_violation(map: &Map<String, Value>, schema: &Schema, hints: Hints) -> Option<ValidationErrorKind> {
    let actual = map.len();
    if let Some(min_properties) = schema.min_properties.filter(|min| actual < *min) {
        return Some(ValidationErrorKind::LessThanMinProperties {
            min_properties,
            actual,
        });
    }
    if let Some(max_properties) = schema.max_properties.filter(|max| actual > *max) {
        return Some(ValidationErrorKind::MoreThanMaxProperties {
            max_properties,
            actual,
        });
    }

    let missing: Vec<String> = schema
        .required
        .iter()
        .filter(|name| !map.contains_key(name.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Some(ValidationErrorKind::MissingRequiredProperty { names: missing });
    }

    // allOf siblings each see only part of the properties; the allOf node
    // checks the union instead.
    if schema.forbids_additional_properties() && !hints.parent_all_of {
        let extra: Vec<String> = map
            .keys()
            .filter(|key| !schema.declares_property(key))
            .cloned()
            .collect();
        if !extra.is_empty() {
            return Some(ValidationErrorKind::UnpermittedAdditionalProperty { names: extra });
        }
    }

    None
}
