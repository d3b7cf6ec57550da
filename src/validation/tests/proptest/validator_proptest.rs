//! Property-based tests for schema and payload validation.

use crate::schema::{FieldDeclaration, FieldType, Schema};
use crate::validation::{validate_payload, validate_schema, SchemaError, ValidationError};
use crate::value::{Payload, Value};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

fn scalar_type_strategy() -> impl Strategy<Value = FieldType> {
    prop::sample::select(vec![
        FieldType::String,
        FieldType::Int,
        FieldType::Float,
        FieldType::Decimal,
        FieldType::Boolean,
    ])
}

fn field_strategy() -> impl Strategy<Value = (FieldType, bool, bool)> {
    (scalar_type_strategy(), any::<bool>(), any::<bool>())
}

/// Flat schemas with unique labels `f0..fn`.
fn flat_schema_strategy() -> impl Strategy<Value = Schema> {
    prop::collection::vec(field_strategy(), 0..8).prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(i, (value_type, required, is_array))| {
                let mut field = FieldDeclaration::new(format!("f{}", i), value_type);
                field.required = required;
                field.is_array = is_array;
                field
            })
            .collect()
    })
}

fn sample_value(value_type: &FieldType, seed: i64) -> Value {
    match value_type {
        FieldType::String => Value::String(format!("value{}", seed)),
        FieldType::Int => Value::Integer(seed),
        FieldType::Float | FieldType::Decimal => Value::Float(seed as f64 + 0.5),
        FieldType::Boolean => Value::Boolean(seed % 2 == 0),
        FieldType::Object | FieldType::Unknown(_) => Value::Map(HashMap::new()),
    }
}

fn wrong_value(value_type: &FieldType) -> Value {
    match value_type {
        FieldType::String => Value::Integer(1),
        _ => Value::String("wrong".to_string()),
    }
}

/// Payload satisfying every field of `schema`.
fn conforming_payload(schema: &Schema, seed: i64, elements: usize) -> Payload {
    schema
        .iter()
        .map(|field| {
            let value = if field.is_array {
                Value::List(
                    (0..elements.max(1))
                        .map(|i| sample_value(&field.value_type, seed + i as i64))
                        .collect(),
                )
            } else {
                sample_value(&field.value_type, seed)
            };
            (field.label.clone(), value)
        })
        .collect()
}

fn nested(levels: usize) -> Schema {
    let mut schema = Schema::default();
    for level in 0..levels {
        schema = Schema::new(vec![FieldDeclaration::object(format!("l{}", level), schema)]);
    }
    schema
}

proptest! {
    #[test]
    fn test_conforming_payloads_are_valid(
        schema in flat_schema_strategy(),
        seed in -1000i64..1000,
        elements in 1usize..4,
    ) {
        prop_assert!(validate_schema(&schema, 3).is_ok());
        let payload = conforming_payload(&schema, seed, elements);
        prop_assert!(validate_payload(&schema, &payload).is_ok());
    }

    #[test]
    fn test_duplicate_sibling_labels_fail(
        schema in flat_schema_strategy(),
        value_type in scalar_type_strategy(),
    ) {
        prop_assume!(!schema.is_empty());
        let label = schema.iter().next().map(|f| f.label.clone()).unwrap_or_default();
        let mut fields: Vec<FieldDeclaration> = schema.iter().cloned().collect();
        fields.push(FieldDeclaration::new(label.clone(), value_type));

        prop_assert_eq!(
            validate_schema(&Schema::new(fields), 3),
            Err(SchemaError::DuplicateField(label))
        );
    }

    #[test]
    fn test_depth_ceiling(ceiling in 0i32..6, levels in 0usize..8) {
        let result = validate_schema(&nested(levels), ceiling);
        if levels as i32 <= ceiling {
            prop_assert!(result.is_ok());
        } else {
            let error = result.unwrap_err();
            prop_assert_eq!(error.root_cause(), &SchemaError::DepthExceeded);
        }
    }

    #[test]
    fn test_single_bad_array_element_is_located(
        value_type in scalar_type_strategy(),
        len in 1usize..6,
        bad in 0usize..6,
    ) {
        let bad = bad % len;
        let schema = Schema::new(vec![FieldDeclaration::new("items", value_type.clone()).array()]);
        let items = (0..len)
            .map(|i| if i == bad { wrong_value(&value_type) } else { sample_value(&value_type, i as i64) })
            .collect();
        let mut payload = Payload::new();
        payload.insert("items".to_string(), Value::List(items));

        match validate_payload(&schema, &payload) {
            Err(ValidationError::InvalidArrayElement { index, .. }) => prop_assert_eq!(index, bad),
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_field_is_reported(schema in flat_schema_strategy(), seed in 0i64..100) {
        let required: HashSet<String> = schema
            .iter()
            .filter(|f| f.required)
            .map(|f| f.label.clone())
            .collect();
        prop_assume!(!required.is_empty());

        let first_required = schema.iter().find(|f| f.required).map(|f| f.label.clone()).unwrap_or_default();
        let mut payload = conforming_payload(&schema, seed, 1);
        payload.remove(&first_required);

        prop_assert_eq!(
            validate_payload(&schema, &payload),
            Err(ValidationError::MissingRequiredField(first_required))
        );
    }

    #[test]
    fn test_validation_is_repeatable(schema in flat_schema_strategy(), seed in 0i64..100) {
        let payload = conforming_payload(&schema, seed, 2);
        let first = validate_payload(&schema, &payload);
        let second = validate_payload(&schema, &payload);
        prop_assert_eq!(first, second);
    }
}
