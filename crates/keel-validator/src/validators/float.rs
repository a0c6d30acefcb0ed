//! `type: number` strategy.
//!
//! Numbers accept integers. Integer-shaped values are handed to the integer
//! strategy through [`Validatable::validate_integer`] and widened to a float
//! afterwards when coercion is on.

use keel_core::value::is_integer;
use keel_core::{Options, Schema, SchemaType};
use serde_json::{Number, Value};

use super::constraints::{check_bounds, check_enum};
use super::Validator;
use crate::dispatcher::{Hints, Validatable, ValidationOutcome};
use crate::error::ValidationError;

pub struct FloatValidator {
    coerce_value: bool,
}

impl FloatValidator {
    #[must_use]
    pub const fn new(options: &Options) -> Self {
        Self {
            coerce_value: options.coerce_value,
        }
    }
}

impl Validator for FloatValidator {
    fn coerce_and_validate(
        &self,
        cx: &dyn Validatable,
        value: Value,
        schema: &Schema,
        _hints: Hints,
    ) -> ValidationOutcome {
        let original = self.coerce_value.then(|| value.clone());
        let value = if self.coerce_value { coerce(value) } else { value };

        if is_integer(&value) {
            return match cx.validate_integer(value, schema) {
                Ok(validated) if self.coerce_value => Ok(widen(validated)),
                Ok(validated) => Ok(validated),
                Err(e) => Err(e.with_original(original)),
            };
        }

        if !value.is_f64() {
            return Err(ValidationError::type_mismatch(SchemaType::Number, value, schema));
        }

        check_enum(&value, schema)
            .and_then(|()| check_bounds(&value, schema))
            .map_err(|e| e.with_original(original))?;
        Ok(value)
    }
}

/// Parse numeric strings, integer form first.
fn coerce(value: Value) -> Value {
    let Value::String(s) = &value else {
        return value;
    };
    if let Ok(i) = s.parse::<i64>() {
        return Value::from(i);
    }
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or(value, Value::Number)
}

fn widen(value: Value) -> Value {
    value
        .as_f64()
        .and_then(Number::from_f64)
        .map_or(value, Value::Number)
}
