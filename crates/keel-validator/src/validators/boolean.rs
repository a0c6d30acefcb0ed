//! `type: boolean` strategy.

use keel_core::{Options, Schema, SchemaType};
use serde_json::Value;

use super::constraints::check_enum;
use super::Validator;
use crate::dispatcher::{Hints, Validatable, ValidationOutcome};
use crate::error::ValidationError;

pub struct BooleanValidator {
    coerce_value: bool,
}

impl BooleanValidator {
    #[must_use]
    pub const fn new(options: &Options) -> Self {
        Self {
            coerce_value: options.coerce_value,
        }
    }
}

impl Validator for BooleanValidator {
    fn coerce_and_validate(
        &self,
        _cx: &dyn Validatable,
        value: Value,
        schema: &Schema,
        _hints: Hints,
    ) -> ValidationOutcome {
        let original = self.coerce_value.then(|| value.clone());
        let value = if self.coerce_value { coerce(value) } else { value };

        if !value.is_boolean() {
            return Err(ValidationError::type_mismatch(SchemaType::Boolean, value, schema));
        }

        check_enum(&value, schema).map_err(|e| e.with_original(original))?;
        Ok(value)
    }
}

/// Literal forms a query string or form body uses for booleans.
fn coerce(value: Value) -> Value {
    let parsed = match &value {
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    };
    parsed.map_or(value, Value::Bool)
}
