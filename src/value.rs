//! Dynamic values carried by configuration payloads.
//!
//! A [`Value`] is the untyped runtime representation of one payload entry.
//! The set of kinds is closed: anything that does not fit one of the
//! recognised kinds is kept as [`Value::Unsupported`] so that validation can
//! reject it as a type mismatch instead of coercing it.

use std::collections::HashMap;
use std::fmt;

/// A configuration payload: labels mapped to dynamic values.
pub type Payload = HashMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Generic sequence, as produced by the decode boundary.
    List(Vec<Value>),
    Map(HashMap<String, Value>),
    /// Sequence whose element type was fixed when it was built.
    /// Never accepted where a generic sequence is expected.
    TypedList(TypedList),
    /// Any runtime kind outside the closed set, named for diagnostics.
    Unsupported(String),
    #[default]
    Null,
}

/// A homogeneous, statically typed sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedList {
    Strings(Vec<String>),
    Integers(Vec<i64>),
    Floats(Vec<f64>),
    Booleans(Vec<bool>),
}

impl TypedList {
    fn element_kind(&self) -> &'static str {
        match self {
            Self::Strings(_) => "string",
            Self::Integers(_) => "integer",
            Self::Floats(_) => "float",
            Self::Booleans(_) => "boolean",
        }
    }
}

/// Runtime kind of a [`Value`], used in mismatch diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Boolean,
    List,
    Map,
    /// Statically typed sequence, with its element kind.
    TypedList(&'static str),
    Null,
    Unsupported(String),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Boolean => write!(f, "boolean"),
            Self::List => write!(f, "list"),
            Self::Map => write!(f, "map"),
            Self::TypedList(element) => write!(f, "list<{}>", element),
            Self::Null => write!(f, "null"),
            Self::Unsupported(name) => write!(f, "{}", name),
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::TypedList(list) => ValueKind::TypedList(list.element_kind()),
            Value::Unsupported(name) => ValueKind::Unsupported(name.clone()),
            Value::Null => ValueKind::Null,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(value: HashMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::TypedList(TypedList::Strings(value))
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Value::TypedList(TypedList::Strings(
            value.into_iter().map(str::to_string).collect(),
        ))
    }
}

impl From<Vec<i64>> for Value {
    fn from(value: Vec<i64>) -> Self {
        Value::TypedList(TypedList::Integers(value))
    }
}

impl From<Vec<f64>> for Value {
    fn from(value: Vec<f64>) -> Self {
        Value::TypedList(TypedList::Floats(value))
    }
}

impl From<Vec<bool>> for Value {
    fn from(value: Vec<bool>) -> Self {
        Value::TypedList(TypedList::Booleans(value))
    }
}

// Decode boundary: JSON that has already been parsed upstream.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if n.is_u64() {
                    Value::Unsupported("unsigned integer".to_string())
                } else {
                    n.as_f64()
                        .map(Value::Float)
                        .unwrap_or_else(|| Value::Unsupported("number".to_string()))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Converts a decoded JSON object into a [`Payload`].
///
/// Returns `None` when the top-level value is not an object.
pub fn payload_from_json(value: serde_json::Value) -> Option<Payload> {
    match Value::from(value) {
        Value::Map(map) => Some(map),
        _ => None,
    }
}
