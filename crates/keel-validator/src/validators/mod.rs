//! Validation strategies, one per [`crate::ValidatorKind`].
//!
//! - Primitive: string, integer, float, boolean, null, unspecified type
//! - Structural: object, array (recurse into children)
//! - Composition: anyOf, allOf, oneOf (recurse into siblings)

mod all_of;
mod any_of;
mod array;
mod boolean;
pub(crate) mod constraints;
mod float;
mod integer;
mod null;
mod object;
mod one_of;
mod string;
mod unspecified;

pub use all_of::AllOfValidator;
pub use any_of::AnyOfValidator;
pub use array::ArrayValidator;
pub use boolean::BooleanValidator;
pub use float::FloatValidator;
pub use integer::IntegerValidator;
pub use null::NullValidator;
pub use object::ObjectValidator;
pub use one_of::OneOfValidator;
pub use string::StringValidator;
pub use unspecified::UnspecifiedTypeValidator;

use keel_core::Schema;
use serde_json::Value;

use crate::dispatcher::{Hints, Validatable, ValidationOutcome};

/// A validation strategy for one kind of schema node.
///
/// Implementations take the value by ownership and return either the
/// (possibly coerced) value or an error carrying the original. Nested values
/// go back through `cx` so scope substitution applies at every depth.
pub trait Validator {
    fn coerce_and_validate(
        &self,
        cx: &dyn Validatable,
        value: Value,
        schema: &Schema,
        hints: Hints,
    ) -> ValidationOutcome;
}
