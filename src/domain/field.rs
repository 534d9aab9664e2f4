//! Field nodes, their types, and the literal values they carry

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ID_PREFIX: &str = "field_";
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

// ============================================================================
// Field Identifier
// ============================================================================

/// Opaque identifier of a field, stable for the node's lifetime
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Generate a fresh id of the form `field_xxxxxxxxx` (lowercase base-36)
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        Self(format!("{}{}", ID_PREFIX, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Field Type
// ============================================================================

/// Closed set of field kinds a user can pick from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[default]
    #[serde(alias = "string")]
    String,
    #[serde(alias = "number")]
    Number,
    #[serde(alias = "boolean")]
    Boolean,
    #[serde(alias = "array")]
    Array,
    /// Object kind; the only type that owns children
    #[serde(alias = "nested", alias = "object")]
    Nested,
    #[serde(alias = "objectid", alias = "objectId")]
    ObjectId,
    #[serde(alias = "date")]
    Date,
    #[serde(alias = "email")]
    Email,
    #[serde(alias = "url")]
    Url,
    #[serde(alias = "uuid")]
    Uuid,
}

/// Returned when a type name does not match any [`FieldType`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown field type: {0}")]
pub struct UnknownFieldType(pub String);

impl FieldType {
    pub const ALL: [FieldType; 10] = [
        FieldType::String,
        FieldType::Number,
        FieldType::Boolean,
        FieldType::Array,
        FieldType::Nested,
        FieldType::ObjectId,
        FieldType::Date,
        FieldType::Email,
        FieldType::Url,
        FieldType::Uuid,
    ];

    /// Get display name for UI
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::String => "String",
            FieldType::Number => "Number",
            FieldType::Boolean => "Boolean",
            FieldType::Array => "Array",
            FieldType::Nested => "Nested",
            FieldType::ObjectId => "ObjectId",
            FieldType::Date => "Date",
            FieldType::Email => "Email",
            FieldType::Url => "URL",
            FieldType::Uuid => "UUID",
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, FieldType::Nested)
    }
}

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(FieldType::String),
            "number" => Ok(FieldType::Number),
            "boolean" | "bool" => Ok(FieldType::Boolean),
            "array" => Ok(FieldType::Array),
            "nested" | "object" => Ok(FieldType::Nested),
            "objectid" => Ok(FieldType::ObjectId),
            "date" => Ok(FieldType::Date),
            "email" => Ok(FieldType::Email),
            "url" => Ok(FieldType::Url),
            "uuid" => Ok(FieldType::Uuid),
            _ => Err(UnknownFieldType(s.trim().to_string())),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Field Value
// ============================================================================

/// Literal override for a field's sample value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(Number),
    Text(String),
    Array(Vec<Value>),
    Object(Map<String, Value>),
}

impl FieldValue {
    /// Interpret raw form text for a field of the given type.
    ///
    /// Blank input means "no override". Input that does not fit the type is
    /// kept verbatim as [`FieldValue::Text`] rather than rejected.
    pub fn parse_input(field_type: FieldType, raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }

        let value = match field_type {
            FieldType::Array => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Array(items)) => FieldValue::Array(items),
                Ok(_) => FieldValue::Array(Vec::new()),
                Err(_) => FieldValue::Text(raw.to_string()),
            },
            FieldType::Nested => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(map)) => FieldValue::Object(map),
                Ok(_) => FieldValue::Object(Map::new()),
                Err(_) => FieldValue::Text(raw.to_string()),
            },
            FieldType::Number => match raw.trim().parse::<Number>() {
                Ok(n) => FieldValue::Number(n),
                Err(_) => FieldValue::Text(raw.to_string()),
            },
            FieldType::Boolean => match raw.trim() {
                "true" => FieldValue::Bool(true),
                "false" => FieldValue::Bool(false),
                _ => FieldValue::Text(raw.to_string()),
            },
            _ => FieldValue::Text(raw.to_string()),
        };

        Some(value)
    }

    /// Only an empty string counts as "not set"; `false`, `0` and `[]` are real overrides.
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Number(n) => Value::Number(n.clone()),
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Array(items) => Value::Array(items.clone()),
            FieldValue::Object(map) => Value::Object(map.clone()),
        }
    }
}

// ============================================================================
// Field
// ============================================================================

/// A single node in the schema forest
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    /// Present only for nested fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Field>>,
}

impl Field {
    /// Create an unnamed field with a freshly generated id
    pub fn new(field_type: FieldType) -> Self {
        Self {
            id: FieldId::generate(),
            name: String::new(),
            field_type,
            value: None,
            children: field_type.is_nested().then(Vec::new),
        }
    }

    pub fn named(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            ..Self::new(field_type)
        }
    }

    pub fn with_id(mut self, id: impl Into<FieldId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_value(mut self, value: FieldValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_children(mut self, children: Vec<Field>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn children(&self) -> &[Field] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Whether the field has a non-blank name and so takes part in projection
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Merge a patch into this node, keeping `children` consistent with the type.
    pub(crate) fn apply(&mut self, patch: &FieldPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }

        if let Some(field_type) = patch.field_type {
            if field_type != self.field_type {
                // The old override rarely fits the new type
                self.value = None;
            }
            self.field_type = field_type;
            if field_type.is_nested() {
                self.children.get_or_insert_with(Vec::new);
            } else {
                self.children = None;
            }
        }

        if let Some(value) = &patch.value {
            self.value = value.clone();
        }
    }
}

// ============================================================================
// Field Patch
// ============================================================================

/// Partial update addressed to a single field; unset members are left untouched
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub field_type: Option<FieldType>,
    /// `Some(None)` clears the override
    pub value: Option<Option<FieldValue>>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn value(mut self, value: FieldValue) -> Self {
        self.value = Some(Some(value));
        self
    }

    pub fn clear_value(mut self) -> Self {
        self.value = Some(None);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
