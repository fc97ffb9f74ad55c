//! Record views - the shape filters are resolved against
//!
//! A REST response for a single item is turned into a [`RecordView`]
//! before it is filtered or emitted as state. The view is a closed
//! variant type, so every consumer matches on it exhaustively instead of
//! probing untyped maps.

use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A leaf value inside a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// JSON null / missing optional value
    Null,
    /// Boolean flag
    Bool(bool),
    /// Integer or floating point number, kept in its JSON form
    Number(Number),
    /// Plain string
    String(String),
}

impl Scalar {
    /// Canonical string form used for filter comparison.
    ///
    /// Filter values always arrive as strings, so `42` has to compare equal
    /// to `"42"` and `true` to `"true"`. Null renders as the empty string.
    pub fn canonical(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    /// Integer value, if this scalar is an integral number.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// A flattened, field-path addressable record.
///
/// Top-level records are always [`RecordView::Object`]. One-to-many
/// relations such as `owner_users` are [`RecordView::List`]s of objects
/// that carry an `id` field.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordView {
    /// Leaf value
    Scalar(Scalar),
    /// Ordered collection (one-to-many relation or list of scalars)
    List(Vec<RecordView>),
    /// Nested object keyed by field name
    Object(BTreeMap<String, RecordView>),
}

impl RecordView {
    /// Create an empty object record.
    pub fn object() -> Self {
        Self::Object(BTreeMap::new())
    }

    /// Single-step field access on an object.
    pub fn get(&self, field: &str) -> Option<&RecordView> {
        match self {
            Self::Object(fields) => fields.get(field),
            _ => None,
        }
    }

    /// Resolve a field path, fanning out across lists.
    ///
    /// Returns every value the path reaches. `None` means the path could
    /// not be resolved at all: a segment was missing, or something other
    /// than a list sat before the last segment. An empty list resolves to
    /// no values.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<Vec<&RecordView>> {
        let Some((head, rest)) = path.split_first() else {
            return Some(vec![self]);
        };

        match self {
            Self::Object(fields) => match fields.get(head.as_ref())? {
                Self::Object(_) if !rest.is_empty() => None,
                value => value.lookup(rest),
            },
            Self::List(items) => {
                let mut found = Vec::new();
                let mut resolved_any = items.is_empty();
                for item in items {
                    if let Some(values) = item.lookup(path) {
                        resolved_any = true;
                        found.extend(values);
                    }
                }
                resolved_any.then_some(found)
            }
            Self::Scalar(_) => None,
        }
    }

    /// The scalar at this position, if any.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Identifiers of a one-to-many relation (`[{id: ..}, ..]`).
    ///
    /// Elements without an integral `id` are skipped.
    pub fn ids(&self) -> Vec<i64> {
        if !matches!(self, Self::List(_)) {
            return Vec::new();
        }
        self.lookup(&["id"])
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| id.as_scalar()?.as_i64())
            .collect()
    }

    /// Convert back into JSON, e.g. to emit a record that passed a filter.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Scalar(s) => s.to_json(),
            Self::List(items) => Value::Array(items.iter().map(RecordView::to_json).collect()),
            Self::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl From<Scalar> for RecordView {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<i64> for RecordView {
    fn from(n: i64) -> Self {
        Self::Scalar(n.into())
    }
}

impl From<bool> for RecordView {
    fn from(b: bool) -> Self {
        Self::Scalar(b.into())
    }
}

impl From<&str> for RecordView {
    fn from(s: &str) -> Self {
        Self::Scalar(s.into())
    }
}

impl From<String> for RecordView {
    fn from(s: String) -> Self {
        Self::Scalar(s.into())
    }
}

/// Convert a decoded API response fragment into a [`RecordView`].
///
/// Structure is preserved: objects stay objects, arrays stay ordered
/// lists, and everything else becomes a scalar.
pub fn flatten(value: &Value) -> RecordView {
    match value {
        Value::Null => RecordView::Scalar(Scalar::Null),
        Value::Bool(b) => RecordView::Scalar(Scalar::Bool(*b)),
        Value::Number(n) => RecordView::Scalar(Scalar::Number(n.clone())),
        Value::String(s) => RecordView::Scalar(Scalar::String(s.clone())),
        Value::Array(items) => RecordView::List(items.iter().map(flatten).collect()),
        Value::Object(fields) => RecordView::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), flatten(v)))
                .collect(),
        ),
    }
}
