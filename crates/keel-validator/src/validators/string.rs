//! `type: string` strategy.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use keel_core::{DatetimeCoerceClass, Options, Schema, SchemaType};
use regex::Regex;
use serde_json::Value;

use super::constraints::{PatternCache, check_enum, check_length, check_pattern};
use super::Validator;
use crate::dispatcher::{Hints, Validatable, ValidationOutcome};
use crate::error::{ValidationError, ValidationErrorKind};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email regex compiles")
});

static UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("uuid regex compiles")
});

static FULL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex compiles"));

pub struct StringValidator {
    coerce_value: bool,
    datetime_coerce_class: Option<DatetimeCoerceClass>,
    patterns: PatternCache,
}

impl StringValidator {
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            coerce_value: options.coerce_value,
            datetime_coerce_class: options.datetime_coerce_class,
            patterns: PatternCache::default(),
        }
    }

    /// Temporal target, only when coercion is enabled.
    const fn datetime_target(&self) -> Option<DatetimeCoerceClass> {
        if self.coerce_value {
            self.datetime_coerce_class
        } else {
            None
        }
    }

    /// Keyword checks on the string form, then `format`.
    fn check_text(&self, text: String, schema: &Schema) -> ValidationOutcome {
        check_enum(&Value::String(text.clone()), schema)?;
        check_length(&text, schema)?;
        check_pattern(&text, schema, &self.patterns)?;
        self.apply_format(text, schema)
    }

    /// Check `format` and, for date/date-time, convert to the configured
    /// representation.
    fn apply_format(&self, text: String, schema: &Schema) -> ValidationOutcome {
        let Some(format) = schema.format.as_deref() else {
            return Ok(Value::String(text));
        };

        match format {
            "email" if !EMAIL.is_match(&text) => {
                Err(format_error(format, "not an email address", text, schema))
            }
            "uuid" if !UUID.is_match(&text) => Err(format_error(format, "not a UUID", text, schema)),
            "date" => {
                let parsed = if FULL_DATE.is_match(&text) {
                    NaiveDate::parse_from_str(&text, "%Y-%m-%d").map_err(|e| e.to_string())
                } else {
                    Err("expected YYYY-MM-DD".to_string())
                };
                match (parsed, self.datetime_target()) {
                    (Ok(date), Some(class)) => Ok(coerce_date(date, class)),
                    (Ok(_), None) => Ok(Value::String(text)),
                    (Err(reason), _) => Err(format_error(format, &reason, text, schema)),
                }
            }
            "date-time" => match (DateTime::parse_from_rfc3339(&text), self.datetime_target()) {
                (Ok(datetime), Some(class)) => Ok(coerce_datetime(datetime, class)),
                (Ok(_), None) => Ok(Value::String(text)),
                (Err(e), _) => Err(format_error(format, &e.to_string(), text, schema)),
            },
            _ => Ok(Value::String(text)),
        }
    }
}

impl Validator for StringValidator {
    fn coerce_and_validate(
        &self,
        _cx: &dyn Validatable,
        value: Value,
        schema: &Schema,
        _hints: Hints,
    ) -> ValidationOutcome {
        let (text, original) = match value {
            Value::String(text) => (text, None),
            // Binary payloads are not strings once decoded; let them through.
            other if schema.has_format("binary") => return Ok(other),
            Value::Number(n) if self.coerce_value => (n.to_string(), Some(Value::Number(n))),
            Value::Bool(b) if self.coerce_value => (b.to_string(), Some(Value::Bool(b))),
            other => return Err(ValidationError::type_mismatch(SchemaType::String, other, schema)),
        };

        self.check_text(text, schema)
            .map_err(|e| e.with_original(original))
    }
}

fn format_error(format: &str, reason: &str, text: String, schema: &Schema) -> ValidationError {
    let kind = ValidationErrorKind::FormatParseFailure {
        format: format.to_string(),
        reason: reason.to_string(),
    };
    ValidationError::new(kind, Value::String(text), schema)
}

fn coerce_date(date: NaiveDate, class: DatetimeCoerceClass) -> Value {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    match class {
        DatetimeCoerceClass::Rfc3339 => Value::String(date.format("%Y-%m-%d").to_string()),
        DatetimeCoerceClass::UnixSeconds => Value::from(midnight.timestamp()),
        DatetimeCoerceClass::UnixMillis => Value::from(midnight.timestamp_millis()),
    }
}

fn coerce_datetime(datetime: DateTime<FixedOffset>, class: DatetimeCoerceClass) -> Value {
    match class {
        DatetimeCoerceClass::Rfc3339 => Value::String(datetime.to_rfc3339()),
        DatetimeCoerceClass::UnixSeconds => Value::from(datetime.timestamp()),
        DatetimeCoerceClass::UnixMillis => Value::from(datetime.timestamp_millis()),
    }
}
