//! Attribute schemas for resources and data sources
//!
//! A schema tells the orchestrator which attributes a type accepts, which
//! ones the server fills in, and which ones force a replacement when they
//! change.

use serde::Serialize;

// ============================================================================
// Attribute Types
// ============================================================================

/// Value shape of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    String,
    Int,
    Bool,
    StringList,
    /// List of `{ "id": n }` references
    IdList,
    /// Single nullable reference; `0` and `null` both mean unset
    Id,
    /// List of plain objects, compared as a whole
    ObjectList,
    /// List of `{ name, values, regex }` filter clauses
    FilterList,
    /// List of flattened records
    RecordList,
}

impl AttributeKind {
    /// Value used when an optional attribute is left out
    pub fn empty_value(self) -> serde_json::Value {
        use serde_json::{Value, json};
        match self {
            Self::String => json!(""),
            Self::Int => json!(0),
            Self::Bool => json!(false),
            Self::StringList
            | Self::IdList
            | Self::ObjectList
            | Self::FilterList
            | Self::RecordList => json!([]),
            Self::Id => Value::Null,
        }
    }
}

/// Who supplies an attribute's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Required,
    Optional,
    Computed,
    OptionalComputed,
}

impl Mode {
    /// Whether the configuration may set this attribute
    pub fn is_configurable(self) -> bool {
        !matches!(self, Self::Computed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub mode: Mode,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force_new: bool,
}

impl Attribute {
    pub const fn new(name: &'static str, kind: AttributeKind, mode: Mode) -> Self {
        Self {
            name,
            kind,
            mode,
            force_new: false,
        }
    }

    pub const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }
}

// ============================================================================
// Schema
// ============================================================================

/// The full attribute list of one resource or data-source type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_serializes_snake_case() {
        let schema = Schema::new(vec![
            Attribute::new("name", AttributeKind::String, Mode::Required),
            Attribute::new("project_id", AttributeKind::Int, Mode::Required).force_new(),
        ]);

        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"attributes": [
                {"name": "name", "kind": "string", "mode": "required"},
                {"name": "project_id", "kind": "int", "mode": "required", "force_new": true},
            ]})
        );
    }

    #[test]
    fn test_schema_lookup() {
        let schema = Schema::new(vec![
            Attribute::new("name", AttributeKind::String, Mode::Required),
            Attribute::new("description", AttributeKind::String, Mode::Optional),
            Attribute::new("created_at", AttributeKind::String, Mode::Computed),
        ]);

        assert_eq!(schema.attribute("description").unwrap().mode, Mode::Optional);
        assert!(schema.attribute("missing").is_none());
        assert!(!schema.attribute("created_at").unwrap().mode.is_configurable());
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(AttributeKind::String.empty_value(), json!(""));
        assert_eq!(AttributeKind::IdList.empty_value(), json!([]));
        assert_eq!(AttributeKind::Id.empty_value(), serde_json::Value::Null);
        assert_eq!(AttributeKind::Bool.empty_value(), json!(false));
    }
}
