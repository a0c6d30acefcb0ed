//! Per-call validation options.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target representation for strings carrying `format: date` or
/// `format: date-time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatetimeCoerceClass {
    /// Canonical text: `YYYY-MM-DD` for dates, RFC 3339 for date-times.
    Rfc3339,
    /// Integer seconds since the Unix epoch. Dates map to midnight UTC.
    UnixSeconds,
    /// Integer milliseconds since the Unix epoch. Dates map to midnight UTC.
    UnixMillis,
}

impl DatetimeCoerceClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rfc3339 => "rfc3339",
            Self::UnixSeconds => "unix_seconds",
            Self::UnixMillis => "unix_millis",
        }
    }
}

impl fmt::Display for DatetimeCoerceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options fixed for one top-level validation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Convert scalar values into the representation the schema declares.
    #[serde(default)]
    pub coerce_value: bool,

    /// Temporal representation for date/date-time strings. Only applied
    /// when `coerce_value` is on.
    #[serde(default)]
    pub datetime_coerce_class: Option<DatetimeCoerceClass>,
}

impl Options {
    #[must_use]
    pub const fn new(coerce_value: bool, datetime_coerce_class: Option<DatetimeCoerceClass>) -> Self {
        Self {
            coerce_value,
            datetime_coerce_class,
        }
    }

    /// Coercion on, no temporal conversion.
    #[must_use]
    pub const fn coercing() -> Self {
        Self::new(true, None)
    }

    #[must_use]
    pub const fn with_datetime_coerce_class(mut self, class: DatetimeCoerceClass) -> Self {
        self.datetime_coerce_class = Some(class);
        self
    }
}
