//! List data sources
//!
//! A data source fetches every object of a kind, shapes each one into a
//! flat record, and keeps the records that match all configured filter
//! clauses. Records are matched in parallel; the output keeps the order
//! the server listed them in.

use anyhow::{Context, Result};
use chrono::Utc;
use ctclient::{Client, Envelope};
use declarative::{FilterSet, RawFilter, flatten};
use rayon::prelude::*;
use serde_json::{Map, Value, json};
use std::fmt;

use crate::resource::kind::{ResourceKind, Source};
use crate::schema::{Attribute, AttributeKind, Mode, Schema};
use crate::state;

/// Read callback for one data source type
pub trait DataSource: Send + Sync + fmt::Debug {
    /// Full type name (e.g., "cloudtamerio_ou")
    fn name(&self) -> String;

    fn schema(&self) -> Schema;

    /// List and filter; returns `{ id, filter, list }`
    fn read(&self, client: &Client, filters: &[RawFilter]) -> Result<Value>;
}

/// The list data source of a resource kind
#[derive(Debug, Clone, Copy)]
pub struct ListDataSource {
    kind: &'static ResourceKind,
}

impl ListDataSource {
    pub const fn new(kind: &'static ResourceKind) -> Self {
        Self { kind }
    }

    /// Every item of the kind, in the order the server listed them
    fn list(&self, client: &Client) -> Result<Vec<Value>> {
        let label = self.kind.label;
        let Some(scope) = self.kind.list_scope else {
            let response: Envelope<Vec<Value>> = client
                .get(self.kind.path)
                .with_context(|| format!("Unable to read {label}"))?;
            return Ok(response.data);
        };

        let parents: Envelope<Vec<Value>> = client
            .get(scope.parents)
            .with_context(|| format!("Unable to read {label}"))?;

        let mut items = Vec::new();
        for parent in parents.data.iter().filter_map(|p| p.get("id")?.as_i64()) {
            let response: Envelope<Vec<Value>> = client
                .get(&scope.children_path(parent))
                .with_context(|| format!("Unable to read {label}"))?;
            log::debug!("{}: {} items under {parent}", self.name(), response.data.len());
            items.extend(response.data);
        }
        Ok(items)
    }
}

/// Shape one list item into a flat record
///
/// Scalars come from the item itself or from its list envelope. Relations
/// are included only when the item carries them.
pub fn list_record(kind: &ResourceKind, item: &Value) -> Value {
    let scalars = match kind.list_envelope {
        Some(key) => item.get(key),
        None => Some(item),
    }
    .and_then(Value::as_object);

    let mut record = Map::new();

    if let Some(scalars) = scalars {
        if let Some(id) = scalars.get("id") {
            record.insert("id".to_string(), id.clone());
        }
        for field in kind.fields {
            let attr = field.attribute;
            if let Some(value) = scalars.get(attr.name) {
                record.insert(attr.name.to_string(), state::normalize(attr.kind, value));
            }
        }
        for single in kind.singles.iter().filter(|s| s.source == Source::Field) {
            if let Some(value) = scalars.get(single.name) {
                let value = state::normalize(AttributeKind::Id, value);
                record.insert(single.name.to_string(), value);
            }
        }
    }

    for association in kind.associations {
        if let Some(value) = item.get(association.response) {
            let ids = state::id_objects(state::id_list(value));
            record.insert(association.name.to_string(), ids);
        }
    }

    Value::Object(record)
}

impl DataSource for ListDataSource {
    fn name(&self) -> String {
        self.kind.type_name()
    }

    fn schema(&self) -> Schema {
        Schema::new(vec![
            Attribute::new("id", AttributeKind::String, Mode::Computed),
            Attribute::new("filter", AttributeKind::FilterList, Mode::Optional),
            Attribute::new("list", AttributeKind::RecordList, Mode::Computed),
        ])
    }

    fn read(&self, client: &Client, filters: &[RawFilter]) -> Result<Value> {
        let label = self.kind.label;
        let set = FilterSet::build(filters).with_context(|| format!("Unable to filter {label}"))?;

        let items = self.list(client)?;
        log::debug!("{}: {} items listed", self.name(), items.len());

        let kept = items
            .par_iter()
            .map(|item| -> declarative::Result<Option<Value>> {
                let record = flatten(&list_record(self.kind, item));
                Ok(set.matches(&record)?.then(|| record.to_json()))
            })
            .collect::<declarative::Result<Vec<_>>>()
            .with_context(|| format!("Unable to filter {label}"))?;

        let list: Vec<Value> = kept.into_iter().flatten().collect();
        log::info!("{}: {} of {} items match", self.name(), list.len(), items.len());

        Ok(json!({
            "id": Utc::now().timestamp().to_string(),
            "filter": filters,
            "list": list,
        }))
    }
}
