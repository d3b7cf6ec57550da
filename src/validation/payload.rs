//! Structural checks of configuration payloads against a schema.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::errors::ValidationError;
use crate::schema::{FieldDeclaration, FieldType, Schema};
use crate::value::{Payload, Value};

/// Checks `payload` against `schema`.
///
/// `schema` must already have passed
/// [`validate_schema`](super::validate_schema). Fields are checked in
/// declaration order and the first failure is returned. Keys present in the
/// payload but not declared in the schema are ignored.
///
/// For each declared field:
///
/// - absent and required: [`ValidationError::MissingRequiredField`];
///   absent and optional: accepted, array or not.
/// - scalar field: the value's runtime kind must match the declared type
///   exactly. `int` only accepts integers and `float`/`decimal` only accept
///   floating point values; no widening or truncation happens. `object`
///   values must be maps and are checked recursively against `children`.
/// - array field: the value must be a generic [`Value::List`]. An empty list
///   fails with [`ValidationError::EmptyRequiredArray`] when the field is
///   required. Every element is checked with the scalar rule and a failure is
///   reported as [`ValidationError::InvalidArrayElement`] with its index.
#[tracing::instrument(level = "debug", skip_all, fields(fields = schema.len()))]
pub fn validate_payload(schema: &Schema, payload: &Payload) -> Result<(), ValidationError> {
    validate_fields(schema, payload)
}

fn validate_fields(
    schema: &Schema,
    payload: &HashMap<String, Value>,
) -> Result<(), ValidationError> {
    for field in schema {
        match payload.get(&field.label) {
            None if field.required => {
                debug!(label = %field.label, "required field is missing");
                return Err(ValidationError::missing_required_field(&field.label));
            }
            None => trace!(label = %field.label, "optional field is absent"),
            Some(value) if field.is_array => validate_array(field, value)?,
            Some(value) => validate_value(field, value)?,
        }
    }
    Ok(())
}

fn validate_array(field: &FieldDeclaration, value: &Value) -> Result<(), ValidationError> {
    let Some(items) = value.as_list() else {
        debug!(label = %field.label, actual = %value.kind(), "array field is not a list");
        return Err(ValidationError::type_mismatch(
            &field.label,
            field.value_type.clone(),
            value.kind(),
        ));
    };

    if items.is_empty() {
        if field.required {
            debug!(label = %field.label, "required array is empty");
            return Err(ValidationError::empty_required_array(&field.label));
        }
        return Ok(());
    }

    for (index, item) in items.iter().enumerate() {
        validate_value(field, item).map_err(|e| {
            debug!(label = %field.label, index, "invalid array element");
            ValidationError::invalid_array_element(&field.label, index, e)
        })?;
    }
    Ok(())
}

/// Scalar rule, shared by plain fields and array elements.
fn validate_value(field: &FieldDeclaration, value: &Value) -> Result<(), ValidationError> {
    let matches = match (&field.value_type, value) {
        (FieldType::String, Value::String(_))
        | (FieldType::Int, Value::Integer(_))
        | (FieldType::Float | FieldType::Decimal, Value::Float(_))
        | (FieldType::Boolean, Value::Boolean(_)) => true,
        (FieldType::Object, Value::Map(map)) => {
            return validate_fields(&field.children, map)
                .map_err(|e| ValidationError::invalid_object(&field.label, e));
        }
        (FieldType::Unknown(type_name), _) => {
            return Err(ValidationError::UnsupportedFieldType {
                label: field.label.clone(),
                type_name: type_name.clone(),
            });
        }
        _ => false,
    };

    if matches {
        Ok(())
    } else {
        debug!(
            label = %field.label,
            expected = %field.value_type,
            actual = %value.kind(),
            "type mismatch"
        );
        Err(ValidationError::type_mismatch(
            &field.label,
            field.value_type.clone(),
            value.kind(),
        ))
    }
}
