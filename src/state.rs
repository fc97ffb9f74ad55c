//! Resource state documents
//!
//! A state document is the JSON object the orchestrator hands over and
//! gets back for one resource: a string `id` plus one key per attribute.
//! Relations are lists of `{ "id": n }` objects; single references are an
//! integer or `null`.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::schema::AttributeKind;

/// Go's RFC 850 layout, which `last_updated` has always used
const RFC850: &str = "%A, %d-%b-%y %H:%M:%S %Z";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ResourceState {
    /// Parse a state document
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            bail!("state document must be a JSON object");
        }
        serde_json::from_value(value).context("Invalid state document")
    }

    pub fn to_value(&self) -> Value {
        let mut object = self.attributes.clone();
        if let Some(id) = &self.id {
            object.insert("id".to_string(), json!(id));
        }
        Value::Object(object)
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// The numeric server id
    pub fn record_id(&self) -> Result<i64> {
        let id = self.id.as_deref().context("state has no id")?;
        id.parse()
            .with_context(|| format!("state id '{id}' is not a number"))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.attributes.insert(name.to_string(), value);
    }

    /// Attribute value normalized for its kind, or the kind's empty value
    pub fn value(&self, name: &str, kind: AttributeKind) -> Value {
        match self.get(name) {
            Some(value) if !value.is_null() => normalize(kind, value),
            _ => kind.empty_value(),
        }
    }

    /// Identifiers of an `[{ "id": n }]` relation
    pub fn ids(&self, name: &str) -> Vec<i64> {
        self.get(name).map(id_list).unwrap_or_default()
    }

    /// A single reference; `0` and `null` both read as unset
    pub fn reference(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64).filter(|id| *id != 0)
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.get("last_updated").and_then(Value::as_str)
    }

    pub fn stamp(&mut self, now: DateTime<Utc>) {
        self.set("last_updated", json!(now.format(RFC850).to_string()));
    }
}

/// Normalize a JSON value for an attribute kind
///
/// String lists lose empty entries, which the API pads some lists with.
/// References treat `0` as unset.
pub fn normalize(kind: AttributeKind, value: &Value) -> Value {
    match kind {
        AttributeKind::StringList => Value::Array(
            value
                .as_array()
                .map(Vec::as_slice)
                .unwrap_or_default()
                .iter()
                .filter(|v| v.as_str().is_some_and(|s| !s.is_empty()))
                .cloned()
                .collect(),
        ),
        AttributeKind::Id => match value.as_i64() {
            Some(0) | None => Value::Null,
            Some(id) => json!(id),
        },
        AttributeKind::IdList => id_objects(id_list(value)),
        _ => value.clone(),
    }
}

/// Extract ids from `[{ "id": n }]`; anything else yields nothing
pub fn id_list(value: &Value) -> Vec<i64> {
    declarative::flatten(value).ids()
}

pub fn id_objects<I: IntoIterator<Item = i64>>(ids: I) -> Value {
    Value::Array(ids.into_iter().map(|id| json!({ "id": id })).collect())
}
