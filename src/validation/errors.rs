//! Error types for schema and payload validation.
//!
//! Two families are kept apart because they occur at different times:
//!
//! - [`SchemaError`]: definition-time problems with a [`Schema`](crate::schema::Schema)
//!   itself. The only fix is to change the schema.
//! - [`ValidationError`]: payload-time problems with a configuration payload.
//!   These are expected routinely on malformed user input.
//!
//! Nested failures are wrapped with the label (and, for arrays, the index) of
//! every enclosing field, so the full path to the offending value can be
//! recovered with `field_path()` and the innermost failure with `root_cause()`.
//!
//! # Examples
//!
//! ```rust,ignore
//! use integration_config::validation::{validate_payload, ValidationError};
//!
//! match validate_payload(&schema, &payload) {
//!     Ok(()) => {}
//!     Err(error) => {
//!         // e.g. "x[0].y[0].key5"
//!         println!("{}: {}", error.field_path(), error.root_cause());
//!     }
//! }
//! ```

use crate::schema::FieldType;
use crate::value::ValueKind;
use thiserror::Error;

/// Errors detected while checking that a schema is well formed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Invalid type {0}")]
    InvalidType(String),

    #[error("Field name {0} is duplicated")]
    DuplicateField(String),

    #[error("Max depth exceeded")]
    DepthExceeded,

    #[error("Field label must not be empty")]
    EmptyLabel,

    /// A nested schema under `label` is invalid.
    #[error("Invalid field {label}: {source}")]
    InvalidField {
        label: String,
        #[source]
        source: Box<SchemaError>,
    },
}

impl SchemaError {
    pub fn invalid_type(type_name: impl Into<String>) -> Self {
        Self::InvalidType(type_name.into())
    }

    pub fn duplicate_field(label: impl Into<String>) -> Self {
        Self::DuplicateField(label.into())
    }

    pub fn in_field(label: impl Into<String>, source: SchemaError) -> Self {
        Self::InvalidField {
            label: label.into(),
            source: Box::new(source),
        }
    }

    /// The innermost error, with all field wrappers removed.
    pub fn root_cause(&self) -> &SchemaError {
        match self {
            Self::InvalidField { source, .. } => source.root_cause(),
            _ => self,
        }
    }

    /// Dotted path of the object fields leading to the failure.
    ///
    /// Empty when the failure is at the root level.
    pub fn field_path(&self) -> String {
        let mut labels = Vec::new();
        let mut current = self;
        while let Self::InvalidField { label, source } = current {
            labels.push(label.as_str());
            current = source.as_ref();
        }
        labels.join(".")
    }

    pub fn error_code(&self) -> String {
        let code = match self.root_cause() {
            Self::InvalidType(_) => 1,
            Self::DuplicateField(_) => 2,
            Self::DepthExceeded => 3,
            Self::EmptyLabel => 4,
            // root_cause never returns a wrapper
            Self::InvalidField { .. } => 0,
        };
        format!("SCHEMA_{:04}", code)
    }
}

/// Errors detected while checking a payload against a valid schema.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Field {0} is required")]
    MissingRequiredField(String),

    #[error("Field {label} is invalid: expected {expected}, got {actual}")]
    TypeMismatch {
        label: String,
        expected: FieldType,
        actual: ValueKind,
    },

    #[error("Array {0} is required")]
    EmptyRequiredArray(String),

    #[error("Array {label} is invalid at index {index}: {source}")]
    InvalidArrayElement {
        label: String,
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("Field {label} is invalid: {source}")]
    InvalidObject {
        label: String,
        #[source]
        source: Box<ValidationError>,
    },

    /// The configuration itself is not a keyed mapping.
    #[error("Configuration must be an object, got {0}")]
    NotAnObject(ValueKind),

    /// Only reachable with a schema that skipped schema validation.
    #[error("Field {label} declares unsupported type {type_name}")]
    UnsupportedFieldType { label: String, type_name: String },
}

impl ValidationError {
    pub fn missing_required_field(label: impl Into<String>) -> Self {
        Self::MissingRequiredField(label.into())
    }

    pub fn type_mismatch(label: impl Into<String>, expected: FieldType, actual: ValueKind) -> Self {
        Self::TypeMismatch {
            label: label.into(),
            expected,
            actual,
        }
    }

    pub fn not_an_object(actual: ValueKind) -> Self {
        Self::NotAnObject(actual)
    }

    pub fn empty_required_array(label: impl Into<String>) -> Self {
        Self::EmptyRequiredArray(label.into())
    }

    pub fn invalid_array_element(
        label: impl Into<String>,
        index: usize,
        source: ValidationError,
    ) -> Self {
        Self::InvalidArrayElement {
            label: label.into(),
            index,
            source: Box::new(source),
        }
    }

    pub fn invalid_object(label: impl Into<String>, source: ValidationError) -> Self {
        Self::InvalidObject {
            label: label.into(),
            source: Box::new(source),
        }
    }

    /// The innermost error, with all object and array wrappers removed.
    pub fn root_cause(&self) -> &ValidationError {
        match self {
            Self::InvalidArrayElement { source, .. } | Self::InvalidObject { source, .. } => {
                source.root_cause()
            }
            _ => self,
        }
    }

    /// Label of the field the innermost error refers to.
    ///
    /// Empty when the whole configuration is at fault.
    pub fn label(&self) -> &str {
        match self.root_cause() {
            Self::NotAnObject(_) => "",
            Self::MissingRequiredField(label) | Self::EmptyRequiredArray(label) => label.as_str(),
            Self::TypeMismatch { label, .. }
            | Self::UnsupportedFieldType { label, .. }
            | Self::InvalidArrayElement { label, .. }
            | Self::InvalidObject { label, .. } => label.as_str(),
        }
    }

    /// Full path to the offending value, e.g. `x[0].y[0].key5`.
    pub fn field_path(&self) -> String {
        let mut path = String::new();
        // Set right after an array index: the next error describes the
        // element itself and must not repeat the array label.
        let mut at_element = false;
        let mut current = self;
        loop {
            match current {
                Self::InvalidArrayElement {
                    label,
                    index,
                    source,
                } => {
                    push_segment(&mut path, label);
                    path.push_str(&format!("[{}]", index));
                    at_element = true;
                    current = source.as_ref();
                }
                Self::InvalidObject { label, source } => {
                    if !at_element {
                        push_segment(&mut path, label);
                    }
                    at_element = false;
                    current = source.as_ref();
                }
                leaf => {
                    if !at_element {
                        push_segment(&mut path, leaf.label());
                    }
                    return path;
                }
            }
        }
    }

    pub fn error_code(&self) -> String {
        let code = match self.root_cause() {
            Self::MissingRequiredField(_) => 1,
            Self::TypeMismatch { .. } => 2,
            Self::EmptyRequiredArray(_) => 3,
            Self::UnsupportedFieldType { .. } => 4,
            Self::NotAnObject(_) => 5,
            // root_cause never returns a wrapper
            Self::InvalidArrayElement { .. } | Self::InvalidObject { .. } => 0,
        };
        format!("VALIDATION_{:04}", code)
    }
}

fn push_segment(path: &mut String, label: &str) {
    if !path.is_empty() {
        path.push('.');
    }
    path.push_str(label);
}
