//! `[validation]` section.

use keel_core::{DatetimeCoerceClass, Options};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_scope() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Convert values to their declared type where possible.
    #[serde(default)]
    pub coerce_value: bool,

    /// Target representation for `date` and `date-time` strings. Only used
    /// when `coerce_value` is on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime_coerce_class: Option<DatetimeCoerceClass>,

    /// Registry scope to validate with.
    #[serde(default = "default_scope")]
    pub scope: String,
}

impl ValidationConfig {
    /// Per-call options for the validator.
    #[must_use]
    pub const fn options(&self) -> Options {
        Options {
            coerce_value: self.coerce_value,
            datetime_coerce_class: self.datetime_coerce_class,
        }
    }

    pub(crate) fn check(&self) -> Result<(), ConfigError> {
        if self.scope.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "validation.scope".to_string(),
                reason: "scope name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            coerce_value: false,
            datetime_coerce_class: None,
            scope: default_scope(),
        }
    }
}
