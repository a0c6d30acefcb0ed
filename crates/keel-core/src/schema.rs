//! The schema tree consumed by the validator.
//!
//! A `Schema` is a fully resolved node: `$ref`s have already been replaced by
//! their targets. Keyword names follow OpenAPI (`anyOf`, `minLength`, ...), so
//! a resolved document deserializes straight into this type.
//!
//! Trees are assumed acyclic.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// SchemaType
// ---------------------------------------------------------------------------

/// Declared `type` of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
    /// Any type name the engine does not dispatch on (e.g. `null`, `file`).
    #[serde(other)]
    Other,
}

impl SchemaType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AdditionalProperties
// ---------------------------------------------------------------------------

/// Value of the `additionalProperties` keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` lets undeclared keys through, `false` rejects them.
    Allowed(bool),
    /// Undeclared keys must validate against this schema.
    Schema(Box<Schema>),
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// A resolved schema node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// `None` keeps the implicit nullability of every node; `Some(false)`
    /// rejects null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    /// OpenAPI 3.0 boolean form: makes `minimum` exclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,

    /// OpenAPI 3.0 boolean form: makes `maximum` exclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Location of this node in its source document, attached by the loader.
    #[serde(skip)]
    pub reference: Option<String>,
}

impl Schema {
    /// A node declaring only `type`.
    #[must_use]
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn string() -> Self {
        Self::of_type(SchemaType::String)
    }

    #[must_use]
    pub fn integer() -> Self {
        Self::of_type(SchemaType::Integer)
    }

    #[must_use]
    pub fn number() -> Self {
        Self::of_type(SchemaType::Number)
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::of_type(SchemaType::Boolean)
    }

    #[must_use]
    pub fn object() -> Self {
        Self::of_type(SchemaType::Object)
    }

    /// An `array` node whose elements must match `items`.
    #[must_use]
    pub fn array_of(items: Self) -> Self {
        Self {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn any_of(siblings: Vec<Self>) -> Self {
        Self {
            any_of: Some(siblings),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn all_of(siblings: Vec<Self>) -> Self {
        Self {
            all_of: Some(siblings),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn one_of(siblings: Vec<Self>) -> Self {
        Self {
            one_of: Some(siblings),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, schema: Self) -> Self {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), schema);
        self
    }

    #[must_use]
    pub fn with_required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_additional_properties(mut self, additional: AdditionalProperties) -> Self {
        self.additional_properties = Some(additional);
        self
    }

    /// Shorthand for `additionalProperties: false`.
    #[must_use]
    pub fn deny_additional_properties(self) -> Self {
        self.with_additional_properties(AdditionalProperties::Allowed(false))
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    #[must_use]
    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }

    #[must_use]
    pub fn with_minimum(mut self, minimum: f64, exclusive: bool) -> Self {
        self.minimum = Some(minimum);
        self.exclusive_minimum = Some(exclusive);
        self
    }

    #[must_use]
    pub fn with_maximum(mut self, maximum: f64, exclusive: bool) -> Self {
        self.maximum = Some(maximum);
        self.exclusive_maximum = Some(exclusive);
        self
    }

    #[must_use]
    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_item_count(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_items = min;
        self.max_items = max;
        self
    }

    #[must_use]
    pub fn with_unique_items(mut self) -> Self {
        self.unique_items = Some(true);
        self
    }

    #[must_use]
    pub fn with_property_count(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_properties = min;
        self.max_properties = max;
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Schema declared for `name` under `properties`, if any.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Self> {
        self.properties.as_ref().and_then(|p| p.get(name))
    }

    #[must_use]
    pub fn declares_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    /// Whether null is accepted for this node. Only an explicit
    /// `nullable: false` refuses it.
    #[must_use]
    pub fn allows_null(&self) -> bool {
        self.nullable != Some(false)
    }

    /// Whether the node explicitly opts into null with `nullable: true`.
    #[must_use]
    pub fn is_explicitly_nullable(&self) -> bool {
        self.nullable == Some(true)
    }

    #[must_use]
    pub fn forbids_additional_properties(&self) -> bool {
        matches!(
            self.additional_properties,
            Some(AdditionalProperties::Allowed(false))
        )
    }

    /// Schema undeclared keys must satisfy, when `additionalProperties` is one.
    #[must_use]
    pub fn additional_properties_schema(&self) -> Option<&Self> {
        match &self.additional_properties {
            Some(AdditionalProperties::Schema(schema)) => Some(schema),
            _ => None,
        }
    }

    #[must_use]
    pub fn has_format(&self, format: &str) -> bool {
        self.format.as_deref() == Some(format)
    }
}
