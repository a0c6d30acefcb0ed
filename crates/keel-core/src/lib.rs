//! # keel-core
//!
//! Schema tree, value helpers, and validation options for keel.
//!
//! This crate provides the types shared by the validation engine and its
//! configuration layer:
//! - `Schema`: an immutable, already-resolved schema node (OpenAPI keyword names)
//! - `SchemaType` and `AdditionalProperties` keyword enums
//! - `Options`: per-call coercion settings
//! - JSON value helpers for type naming and numeric comparison
//!
//! Values are plain `serde_json::Value`s. The workspace enables the
//! `preserve_order` feature so objects keep their key order through coercion.

pub mod options;
pub mod schema;
pub mod value;

pub use options::{DatetimeCoerceClass, Options};
pub use schema::{AdditionalProperties, Schema, SchemaType};
