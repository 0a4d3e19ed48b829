use std::collections::HashMap;

use serde_json::Value;

use super::error::ConfigError;

/// Untyped value tree backing a tokenizer configuration document.
///
/// The tree is produced once from parsed JSON and only read afterwards.
/// Numbers are always `f64`, the way a JSON parser hands them over, so integer
/// fields go through an explicit checked conversion before use.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttributeTree {
    #[default]
    Absent,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<AttributeTree>),
    Map(HashMap<String, AttributeTree>),
}

static ABSENT: AttributeTree = AttributeTree::Absent;

impl AttributeTree {
    /// Name of the variant, used when reporting a mismatch
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// True when `key` exists on a map and does not hold `Absent`.
    pub fn has(&self, key: &str) -> bool {
        !self.get(key).is_absent()
    }

    /// Looks `key` up on a map. Missing keys and non-map nodes give `Absent`.
    pub fn get(&self, key: &str) -> &AttributeTree {
        match self {
            Self::Map(entries) => entries.get(key).unwrap_or(&ABSENT),
            _ => &ABSENT,
        }
    }

    // Checked conversions. `field` only feeds the error message.

    pub fn as_text(&self, field: &str) -> Result<&str, ConfigError> {
        match self {
            Self::Text(s) => Ok(s),
            other => Err(ConfigError::mismatch(field, "string", other.kind())),
        }
    }

    pub fn as_number(&self, field: &str) -> Result<f64, ConfigError> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(ConfigError::mismatch(field, "number", other.kind())),
        }
    }

    pub fn as_bool(&self, field: &str) -> Result<bool, ConfigError> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(ConfigError::mismatch(field, "boolean", other.kind())),
        }
    }

    pub fn as_list(&self, field: &str) -> Result<&[AttributeTree], ConfigError> {
        match self {
            Self::List(items) => Ok(items),
            other => Err(ConfigError::mismatch(field, "list", other.kind())),
        }
    }

    pub fn as_map(&self, field: &str) -> Result<&HashMap<String, AttributeTree>, ConfigError> {
        match self {
            Self::Map(entries) => Ok(entries),
            other => Err(ConfigError::mismatch(field, "map", other.kind())),
        }
    }

    /// Reads an optional string field: `Ok(None)` when absent, an error when
    /// present with another kind.
    pub fn opt_text(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match self.get(key) {
            Self::Absent => Ok(None),
            value => value.as_text(key).map(|s| Some(s.to_owned())),
        }
    }

    pub fn opt_number(&self, key: &str) -> Result<Option<f64>, ConfigError> {
        match self.get(key) {
            Self::Absent => Ok(None),
            value => value.as_number(key).map(Some),
        }
    }

    pub fn opt_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        match self.get(key) {
            Self::Absent => Ok(None),
            value => value.as_bool(key).map(Some),
        }
    }

    /// Fetches a required field, failing with `MissingField` when absent.
    pub fn require(&self, key: &str) -> Result<&AttributeTree, ConfigError> {
        match self.get(key) {
            Self::Absent => Err(ConfigError::MissingField(key.to_owned())),
            value => Ok(value),
        }
    }
}

impl From<Value> for AttributeTree {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Bool(b) => Self::Bool(b),
            // Without `arbitrary_precision` every JSON number has an f64 view.
            Value::Number(n) => n.as_f64().map_or(Self::Absent, Self::Number),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(entries) => {
                Self::Map(entries.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
