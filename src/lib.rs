//! # Integration configuration engine
//!
//! Operators declare the shape of an integration's configuration as a
//! [`Schema`](schema::Schema) and concrete payloads are checked against it.
//!
//! ## Pipeline
//!
//! ```text
//! Schema definition → Schema validation → Payload validation (per payload)
//! ```
//!
//! - Dynamic values ([`value`]): the closed set of runtime kinds a payload
//!   may contain, plus an adapter from already decoded JSON.
//! - Schema model ([`schema`]): ordered, label-unique field declarations
//!   with nested schemas for `object` fields.
//! - Validation ([`validation`]): depth-bounded, recursive structural
//!   checks of schemas and payloads.
//! - Integrations ([`integration`]): definitions and instances that validate
//!   their schema or configuration on construction.
//!
//! The engine performs no I/O apart from loading its own settings
//! ([`config`]) and keeps no state between calls, so a schema can be shared
//! across threads and validated against concurrently.

pub mod config;
pub mod error;
pub mod integration;
pub mod schema;
pub mod validation;
pub mod value;

// Re-exports
pub use error::*;
pub use integration::{Integration, IntegrationConfig, IntegrationDefinition, IntegrationKind};
pub use schema::{FieldDeclaration, FieldType, Schema};
pub use validation::{validate_payload, validate_schema, SchemaError, ValidationError};
pub use value::{Payload, Value, ValueKind};
