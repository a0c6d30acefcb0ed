//! Strategy for nodes without a recognized `type`.

use keel_core::Schema;
use serde_json::Value;

use super::Validator;
use crate::dispatcher::{Hints, Validatable, ValidationOutcome};

/// Accepts any value unchanged.
pub struct UnspecifiedTypeValidator;

impl Validator for UnspecifiedTypeValidator {
    fn coerce_and_validate(
        &self,
        _cx: &dyn Validatable,
        value: Value,
        _schema: &Schema,
        _hints: Hints,
    ) -> ValidationOutcome {
        Ok(value)
    }
}
