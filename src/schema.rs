//! Declarative description of the expected configuration shape.
//!
//! A [`Schema`] is one nesting level: an ordered list of [`FieldDeclaration`]s.
//! Object-typed fields own a nested schema in `children`, which is shared by
//! scalar objects and arrays of objects alike.
//!
//! Schemas are usually declared as JSON alongside an integration definition:
//!
//! ```json
//! [
//!   { "label": "host", "type": "string", "required": true },
//!   { "label": "ports", "type": "int", "array": true },
//!   { "label": "tls", "type": "object", "fields": [
//!       { "label": "verify", "type": "boolean" }
//!   ] }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared type of a field.
///
/// Unrecognised names are preserved in [`FieldType::Unknown`] so that schema
/// validation can report them rather than failing at deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FieldType {
    String,
    Int,
    Float,
    Decimal,
    Boolean,
    Object,
    #[strum(default)]
    Unknown(String),
}

impl FieldType {
    /// Parses a type name, keeping unrecognised names as [`FieldType::Unknown`].
    pub fn parse(name: &str) -> Self {
        // The default variant makes parsing infallible.
        Self::from_str(name).unwrap_or_else(|_| Self::Unknown(name.to_string()))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Unknown(name) => name,
            _ => self.as_ref(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.name().to_string()
    }
}

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}

/// One named, typed entry of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub label: String,
    #[serde(rename = "type")]
    pub value_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "array", default)]
    pub is_array: bool,
    /// Nested schema, only meaningful for `object` fields.
    #[serde(rename = "fields", default, skip_serializing_if = "Schema::is_empty")]
    pub children: Schema,
}

impl FieldDeclaration {
    pub fn new(label: impl Into<String>, value_type: FieldType) -> Self {
        Self {
            label: label.into(),
            value_type,
            required: false,
            is_array: false,
            children: Schema::default(),
        }
    }

    pub fn object(label: impl Into<String>, children: impl Into<Schema>) -> Self {
        Self::new(label, FieldType::Object).with_children(children)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn with_children(mut self, children: impl Into<Schema>) -> Self {
        self.children = children.into();
        self
    }
}

/// Ordered, label-unique set of field declarations at one nesting level.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Vec<FieldDeclaration>);

impl Schema {
    pub fn new(fields: Vec<FieldDeclaration>) -> Self {
        Self(fields)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDeclaration> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Nesting depth counted in levels of `object` fields.
    pub fn depth(&self) -> usize {
        self.0
            .iter()
            .filter(|field| field.value_type.is_object())
            .map(|field| 1 + field.children.depth())
            .max()
            .unwrap_or(0)
    }
}

impl From<Vec<FieldDeclaration>> for Schema {
    fn from(fields: Vec<FieldDeclaration>) -> Self {
        Self(fields)
    }
}

impl FromIterator<FieldDeclaration> for Schema {
    fn from_iter<I: IntoIterator<Item = FieldDeclaration>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDeclaration;
    type IntoIter = std::slice::Iter<'a, FieldDeclaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
