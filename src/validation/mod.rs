//! Schema and payload validation.
//!
//! Validation happens in two stages:
//!
//! 1. **Schema validation** ([`validate_schema`]): run once, when a schema is
//!    built. Checks type names, sibling label uniqueness and the nesting
//!    depth ceiling.
//! 2. **Payload validation** ([`validate_payload`]): run for every payload
//!    against a schema that passed stage 1. Checks requiredness, runtime
//!    kinds and array cardinality, recursing into nested objects and arrays.
//!
//! Both stages are pure: they borrow their inputs, hold no state between
//! calls and stop at the first failure.

mod errors;
mod payload;
mod schema;


pub use errors::{SchemaError, ValidationError};
pub use payload::validate_payload;
pub use schema::{validate_schema, validate_schema_default, DEFAULT_MAX_DEPTH};
