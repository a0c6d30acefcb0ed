//! `type: integer` strategy.

use keel_core::value::{exact_i64, is_integer};
use keel_core::{Options, Schema, SchemaType};
use serde_json::Value;

use super::constraints::{check_bounds, check_enum};
use super::Validator;
use crate::dispatcher::{Hints, Validatable, ValidationOutcome};
use crate::error::{ValidationError, ValidationErrorKind};

pub struct IntegerValidator {
    coerce_value: bool,
}

impl IntegerValidator {
    #[must_use]
    pub const fn new(options: &Options) -> Self {
        Self {
            coerce_value: options.coerce_value,
        }
    }
}

impl Validator for IntegerValidator {
    fn coerce_and_validate(
        &self,
        _cx: &dyn Validatable,
        value: Value,
        schema: &Schema,
        _hints: Hints,
    ) -> ValidationOutcome {
        let original = self.coerce_value.then(|| value.clone());
        let value = if self.coerce_value {
            coerce(value, schema)?
        } else {
            value
        };

        if !is_integer(&value) {
            return Err(ValidationError::type_mismatch(SchemaType::Integer, value, schema));
        }

        check_enum(&value, schema)
            .and_then(|()| check_bounds(&value, schema))
            .map_err(|e| e.with_original(original))?;
        Ok(value)
    }
}

/// Integer form of `value` when it denotes an exact integer. Values that are
/// numeric but fractional are rejected here; anything else is returned
/// unchanged for the type check to reject.
fn coerce(value: Value, schema: &Schema) -> ValidationOutcome {
    let float = match &value {
        Value::Number(n) if n.is_f64() => n.as_f64(),
        Value::String(s) => {
            if let Ok(i) = s.parse::<i64>() {
                return Ok(Value::from(i));
            }
            s.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    };

    let Some(f) = float else {
        return Ok(value);
    };
    match exact_i64(f) {
        Some(i) => Ok(Value::from(i)),
        None => {
            let reason = if f.fract() == 0.0 {
                format!("{f} is out of range")
            } else {
                format!("{f} has a fractional part")
            };
            let kind = ValidationErrorKind::UnsupportedValue {
                expected: SchemaType::Integer.to_string(),
                reason,
            };
            Err(ValidationError::new(kind, value, schema))
        }
    }
}
