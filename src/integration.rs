//! Schema-bearing integration types.
//!
//! An [`IntegrationDefinition`] declares what configuration an integration
//! accepts. An [`Integration`] is a concrete instance of a definition whose
//! [`IntegrationConfig`] must satisfy the definition's schema.
//!
//! Every constructor validates immediately, so a definition with a malformed
//! schema or an integration with a non-conforming configuration is never
//! handed back to the caller. Identifiers start empty and are assigned by
//! whatever store persists these values.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::config::EngineConfig;
use crate::schema::Schema;
use crate::validation::{validate_payload, validate_schema, SchemaError, ValidationError};
use crate::value::{Payload, Value};

/// Direction of the data flowing through an integration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IntegrationKind {
    Source,
    Destination,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("Invalid type {0}. Valid types are \"source\" and \"destination\"")]
    InvalidKind(String),

    #[error("Invalid configuration schema: {0}")]
    InvalidSchema(#[from] SchemaError),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IntegrationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ValidationError),

    #[error("Configuration belongs to definition {expected}, not {found}")]
    DefinitionMismatch { expected: String, found: String },
}

/// Deserialization validates the schema against the default
/// [`EngineConfig`], same as [`IntegrationDefinition::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawIntegrationDefinition")]
pub struct IntegrationDefinition {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: IntegrationKind,
    configuration_schema: Schema,
}

impl IntegrationDefinition {
    pub fn new(
        name: impl Into<String>,
        kind: &str,
        configuration_schema: Schema,
    ) -> Result<Self, DefinitionError> {
        Self::with_config(name, kind, configuration_schema, &EngineConfig::default())
    }

    pub fn with_config(
        name: impl Into<String>,
        kind: &str,
        configuration_schema: Schema,
        config: &EngineConfig,
    ) -> Result<Self, DefinitionError> {
        let kind = IntegrationKind::from_str(kind)
            .map_err(|_| DefinitionError::InvalidKind(kind.to_string()))?;
        let definition = Self {
            id: String::new(),
            name: name.into(),
            kind,
            configuration_schema,
        };
        definition.validate(config)?;
        debug!(
            name = %definition.name,
            kind = %definition.kind,
            depth = definition.configuration_schema.depth(),
            "integration definition created"
        );
        Ok(definition)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Re-checks the schema, e.g. after deserialization.
    pub fn validate(&self, config: &EngineConfig) -> Result<(), DefinitionError> {
        validate_schema(&self.configuration_schema, config.max_schema_depth)?;
        Ok(())
    }

    pub fn configuration_schema(&self) -> &Schema {
        &self.configuration_schema
    }
}

#[derive(Deserialize)]
struct RawIntegrationDefinition {
    #[serde(default)]
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: IntegrationKind,
    configuration_schema: Schema,
}

impl TryFrom<RawIntegrationDefinition> for IntegrationDefinition {
    type Error = DefinitionError;

    fn try_from(raw: RawIntegrationDefinition) -> Result<Self, Self::Error> {
        let definition = Self {
            id: raw.id,
            name: raw.name,
            kind: raw.kind,
            configuration_schema: raw.configuration_schema,
        };
        definition.validate(&EngineConfig::default())?;
        Ok(definition)
    }
}

/// Concrete configuration values, keyed by field label.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntegrationConfig(Payload);

impl IntegrationConfig {
    pub fn new(args: Payload, schema: &Schema) -> Result<Self, ValidationError> {
        let config = Self(args);
        config.validate(schema)?;
        Ok(config)
    }

    /// Builds a configuration from an already decoded JSON object.
    ///
    /// Any other top-level value is rejected with
    /// [`ValidationError::NotAnObject`].
    pub fn from_json(value: serde_json::Value, schema: &Schema) -> Result<Self, ValidationError> {
        match Value::from(value) {
            Value::Map(args) => Self::new(args, schema),
            other => {
                debug!(actual = %other.kind(), "configuration is not an object");
                Err(ValidationError::not_an_object(other.kind()))
            }
        }
    }

    pub fn validate(&self, schema: &Schema) -> Result<(), ValidationError> {
        validate_payload(schema, &self.0)
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.0.get(label)
    }

    pub fn as_payload(&self) -> &Payload {
        &self.0
    }

    pub fn into_payload(self) -> Payload {
        self.0
    }
}

/// A source or destination instance living in a workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct Integration {
    pub id: String,
    pub name: String,
    pub workspace_id: String,
    pub definition_id: String,
    configuration: IntegrationConfig,
}

impl Integration {
    pub fn new(
        name: impl Into<String>,
        workspace_id: impl Into<String>,
        definition: &IntegrationDefinition,
        configuration: IntegrationConfig,
    ) -> Result<Self, IntegrationError> {
        let integration = Self {
            id: String::new(),
            name: name.into(),
            workspace_id: workspace_id.into(),
            definition_id: definition.id.clone(),
            configuration,
        };
        integration.validate(definition)?;
        debug!(name = %integration.name, definition = %definition.name, "integration created");
        Ok(integration)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Checks the current configuration against `definition`.
    pub fn validate(&self, definition: &IntegrationDefinition) -> Result<(), IntegrationError> {
        if definition.id != self.definition_id {
            return Err(IntegrationError::DefinitionMismatch {
                expected: self.definition_id.clone(),
                found: definition.id.clone(),
            });
        }
        self.configuration
            .validate(definition.configuration_schema())?;
        Ok(())
    }

    /// Replaces the configuration if it satisfies `definition`.
    ///
    /// On failure the current configuration is kept.
    pub fn update_configuration(
        &mut self,
        definition: &IntegrationDefinition,
        configuration: IntegrationConfig,
    ) -> Result<(), IntegrationError> {
        let candidate = Self {
            configuration,
            ..self.clone()
        };
        candidate.validate(definition)?;
        self.configuration = candidate.configuration;
        debug!(name = %self.name, "integration configuration updated");
        Ok(())
    }

    pub fn configuration(&self) -> &IntegrationConfig {
        &self.configuration
    }
}
