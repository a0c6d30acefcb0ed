//! Keyword checks shared by several strategies: `enum`, numeric bounds,
//! string length, and `pattern`.

use std::cell::RefCell;
use std::collections::HashMap;

use keel_core::value::loosely_equal;
use keel_core::Schema;
use regex::Regex;
use serde_json::Value;

use crate::error::{ValidationError, ValidationErrorKind};

/// `enum` membership. Numbers compare by value, so `1` matches `1.0`.
pub(crate) fn check_enum(value: &Value, schema: &Schema) -> Result<(), ValidationError> {
    match &schema.enum_values {
        Some(allowed) if !allowed.iter().any(|candidate| loosely_equal(candidate, value)) => Err(
            ValidationError::new(ValidationErrorKind::NotEnumMember, value.clone(), schema),
        ),
        _ => Ok(()),
    }
}

/// `minimum` / `maximum` with their OpenAPI 3.0 boolean exclusive flags.
pub(crate) fn check_bounds(value: &Value, schema: &Schema) -> Result<(), ValidationError> {
    let Some(n) = value.as_f64() else {
        return Ok(());
    };

    if let Some(minimum) = schema.minimum {
        let exclusive = schema.exclusive_minimum.unwrap_or(false);
        if n < minimum || (exclusive && n <= minimum) {
            let kind = ValidationErrorKind::LessThanMinimum { minimum, exclusive };
            return Err(ValidationError::new(kind, value.clone(), schema));
        }
    }

    if let Some(maximum) = schema.maximum {
        let exclusive = schema.exclusive_maximum.unwrap_or(false);
        if n > maximum || (exclusive && n >= maximum) {
            let kind = ValidationErrorKind::MoreThanMaximum { maximum, exclusive };
            return Err(ValidationError::new(kind, value.clone(), schema));
        }
    }

    Ok(())
}

/// `minLength` / `maxLength`, counted in Unicode scalar values.
pub(crate) fn check_length(text: &str, schema: &Schema) -> Result<(), ValidationError> {
    if schema.min_length.is_none() && schema.max_length.is_none() {
        return Ok(());
    }

    let actual = text.chars().count();
    let kind = match (schema.min_length, schema.max_length) {
        (Some(min_length), _) if actual < min_length => {
            ValidationErrorKind::LessThanMinLength { min_length, actual }
        }
        (_, Some(max_length)) if actual > max_length => {
            ValidationErrorKind::MoreThanMaxLength { max_length, actual }
        }
        _ => return Ok(()),
    };
    Err(ValidationError::new(kind, Value::String(text.to_string()), schema))
}

/// Compiled `pattern` keywords, held by a validator for one top-level call.
#[derive(Debug, Default)]
pub(crate) struct PatternCache {
    compiled: RefCell<HashMap<String, Regex>>,
}

impl PatternCache {
    fn get_or_compile(&self, pattern: &str) -> Result<Regex, regex::Error> {
        if let Some(regex) = self.compiled.borrow().get(pattern) {
            return Ok(regex.clone());
        }
        let regex = Regex::new(pattern)?;
        self.compiled
            .borrow_mut()
            .insert(pattern.to_string(), regex.clone());
        Ok(regex)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.compiled.borrow().len()
    }
}

/// `pattern`, searched anywhere in the string as JSON Schema specifies.
pub(crate) fn check_pattern(
    text: &str,
    schema: &Schema,
    cache: &PatternCache,
) -> Result<(), ValidationError> {
    let Some(pattern) = &schema.pattern else {
        return Ok(());
    };

    let kind = match cache.get_or_compile(pattern) {
        Ok(regex) if regex.is_match(text) => return Ok(()),
        Ok(_) => ValidationErrorKind::PatternMismatch {
            pattern: pattern.clone(),
        },
        Err(e) => ValidationErrorKind::InvalidPattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        },
    };
    Err(ValidationError::new(kind, Value::String(text.to_string()), schema))
}
