//! Definition → integration → configuration update, as an upstream
//! management layer would drive it.

use integration_config::config::{self, EngineConfig};
use integration_config::integration::{DefinitionError, IntegrationError};
use integration_config::{
    Integration, IntegrationConfig, IntegrationDefinition, IntegrationKind, Schema, SchemaError,
    ValidationError,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn warehouse_schema() -> Schema {
    serde_json::from_value(json!([
        { "label": "account", "type": "string", "required": true },
        { "label": "warehouse", "type": "object", "required": true, "fields": [
            { "label": "name", "type": "string", "required": true },
            { "label": "size", "type": "int" },
            { "label": "credits", "type": "decimal" }
        ] },
        { "label": "schemas", "type": "string", "array": true }
    ]))
    .unwrap()
}

#[test]
fn test_destination_lifecycle() {
    let definition = IntegrationDefinition::new("warehouse", "destination", warehouse_schema())
        .unwrap()
        .with_id("def-warehouse");
    assert_eq!(definition.kind, IntegrationKind::Destination);

    let config = IntegrationConfig::from_json(
        json!({
            "account": "acme",
            "warehouse": { "name": "analytics", "size": 4, "credits": 12.5 },
            "schemas": ["public", "staging"],
            "comment": "extra keys are ignored"
        }),
        definition.configuration_schema(),
    )
    .unwrap();

    let mut integration = Integration::new("acme warehouse", "ws-42", &definition, config)
        .unwrap()
        .with_id("int-1");
    assert_eq!(integration.workspace_id, "ws-42");

    let update = IntegrationConfig::from_json(
        json!({ "account": "acme", "warehouse": { "name": "analytics", "size": 4.5 } }),
        definition.configuration_schema(),
    );
    let error = update.unwrap_err();
    assert_eq!(error.field_path(), "warehouse.size");

    let update = IntegrationConfig::from_json(
        json!({ "account": "acme", "warehouse": { "name": "reporting" } }),
        definition.configuration_schema(),
    )
    .unwrap();
    integration
        .update_configuration(&definition, update)
        .unwrap();
    assert!(integration.configuration().get("schemas").is_none());
}

#[test]
fn test_definition_depth_from_engine_config() {
    let engine: EngineConfig = config::from_str(r#"{"max_schema_depth": 0}"#).unwrap();
    let result =
        IntegrationDefinition::with_config("warehouse", "source", warehouse_schema(), &engine);

    match result {
        Err(DefinitionError::InvalidSchema(error)) => {
            assert_eq!(error.root_cause(), &SchemaError::DepthExceeded);
            assert_eq!(error.field_path(), "warehouse");
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_errors_convert_into_crate_error() {
    let definition = IntegrationDefinition::new("warehouse", "source", warehouse_schema()).unwrap();
    let config = IntegrationConfig::default();

    let error: integration_config::Error = Integration::new("w", "ws", &definition, config)
        .unwrap_err()
        .into();
    assert!(matches!(
        error,
        integration_config::Error::Integration(IntegrationError::InvalidConfiguration(
            ValidationError::MissingRequiredField(_)
        ))
    ));
    assert_eq!(
        error.to_string(),
        "Integration error: Invalid configuration: Field account is required"
    );
}
