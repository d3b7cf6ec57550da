//! Well-formedness checks for schema definitions.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::errors::SchemaError;
use crate::schema::{FieldDeclaration, Schema};

/// Default ceiling on nested `object` levels, measured from the root.
pub const DEFAULT_MAX_DEPTH: i32 = 3;

/// Checks that `schema` is well formed.
///
/// `remaining_depth` is the number of `object` levels still allowed below
/// this one; each nested schema is checked with one less. A schema is
/// rejected as soon as the counter drops below zero, so with the default
/// ceiling of 3 three levels of nested objects pass and a fourth fails.
///
/// Sibling labels must be unique and every declared type must be one of the
/// recognised [`FieldType`](crate::schema::FieldType)s. The first failure
/// short-circuits; nested failures are wrapped with the label of the object
/// field that owns the failing schema.
#[tracing::instrument(level = "debug", skip(schema), fields(fields = schema.len()))]
pub fn validate_schema(schema: &Schema, remaining_depth: i32) -> Result<(), SchemaError> {
    if remaining_depth < 0 {
        debug!("schema nesting exceeds the depth ceiling");
        return Err(SchemaError::DepthExceeded);
    }

    let mut labels = HashSet::with_capacity(schema.len());
    for field in schema {
        if field.label.is_empty() {
            return Err(SchemaError::EmptyLabel);
        }
        if !labels.insert(field.label.as_str()) {
            debug!(label = %field.label, "duplicate field label");
            return Err(SchemaError::duplicate_field(&field.label));
        }
        validate_field(field, remaining_depth)?;
    }

    Ok(())
}

/// Same as [`validate_schema`] with [`DEFAULT_MAX_DEPTH`].
pub fn validate_schema_default(schema: &Schema) -> Result<(), SchemaError> {
    validate_schema(schema, DEFAULT_MAX_DEPTH)
}

fn validate_field(field: &FieldDeclaration, remaining_depth: i32) -> Result<(), SchemaError> {
    trace!(label = %field.label, value_type = %field.value_type, "checking field");

    if !field.value_type.is_known() {
        debug!(label = %field.label, value_type = %field.value_type, "unrecognised field type");
        return Err(SchemaError::invalid_type(field.value_type.name()));
    }

    if field.value_type.is_object() {
        validate_schema(&field.children, remaining_depth - 1)
            .map_err(|e| SchemaError::in_field(&field.label, e))?;
    }

    Ok(())
}
