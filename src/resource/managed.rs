//! Descriptor-driven lifecycle shared by every resource kind

use anyhow::{Context, Result, bail};
use chrono::Utc;
use ctclient::{Client, Envelope};
use serde_json::{Map, Value, json};

use super::Resource;
use super::kind::{ResourceKind, Source};
use crate::engine::{self, ChangeSet, UpdatePlan};
use crate::schema::{Mode, Schema};
use crate::state::{self, ResourceState};

/// A resource backed by a static [`ResourceKind`] descriptor
#[derive(Debug, Clone, Copy)]
pub struct ManagedResource {
    kind: &'static ResourceKind,
}

impl ManagedResource {
    pub const fn new(kind: &'static ResourceKind) -> Self {
        Self { kind }
    }

    /// Body for `POST {path}`
    ///
    /// Scalars go under the create envelope when the kind has one.
    /// Relations are sent as id arrays under their create keys, and an
    /// unset single reference as `0` or `null` depending on its source.
    pub fn create_body(&self, desired: &ResourceState) -> Value {
        let mut scalars = Map::new();
        for field in self.kind.fields.iter().filter(|f| f.create) {
            let attr = field.attribute;
            if attr.mode == Mode::OptionalComputed && !desired.contains(attr.name) {
                continue;
            }
            scalars.insert(attr.name.to_string(), desired.value(attr.name, attr.kind));
        }

        let mut body = match self.kind.create_envelope {
            Some(key) => Map::from_iter([(key.to_string(), Value::Object(scalars))]),
            None => scalars,
        };

        for association in self.kind.associations {
            body.insert(
                association.create_key.to_string(),
                json!(desired.ids(association.name)),
            );
        }

        for single in self.kind.singles {
            let value = match (desired.reference(single.name), single.source) {
                (Some(id), _) => json!(id),
                (None, Source::Field) => json!(0),
                (None, Source::Object) => Value::Null,
            };
            body.insert(single.create_key.to_string(), value);
        }

        Value::Object(body)
    }

    fn fetch(&self, client: &Client, id: i64) -> Result<Option<Map<String, Value>>> {
        let envelope = match client.get::<Envelope<Value>>(&self.kind.item_path(id)) {
            Ok(envelope) => envelope,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        match envelope.data {
            Value::Object(data) => Ok(Some(data)),
            other => bail!("expected an object in the response, got {other}"),
        }
    }

    fn label(&self) -> &'static str {
        self.kind.label
    }
}

/// The object holding a GET response's scalar fields
fn scalar_fields<'a>(
    kind: &ResourceKind,
    data: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    match kind.envelope {
        Some(key) => data.get(key).and_then(Value::as_object),
        None => Some(data),
    }
}

/// Whether a GET response describes an object the API keeps around but
/// treats as deleted
fn is_gone(kind: &ResourceKind, data: &Map<String, Value>) -> bool {
    kind.gone_flag
        .and_then(|flag| scalar_fields(kind, data)?.get(flag))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Build state from a GET response
///
/// Fields and relations missing from the response keep their prior value.
/// Relations the configuration never mentioned stay out of state while
/// empty.
pub fn state_from_response(
    kind: &ResourceKind,
    id: i64,
    data: &Map<String, Value>,
    prior: &ResourceState,
) -> ResourceState {
    let scalars = scalar_fields(kind, data);
    let mut next = ResourceState::default().with_id(id);

    for field in kind.fields {
        let attr = field.attribute;
        match scalars.and_then(|s| s.get(attr.name)) {
            Some(Value::Null) => next.set(attr.name, attr.kind.empty_value()),
            Some(value) => next.set(attr.name, state::normalize(attr.kind, value)),
            None => {
                if let Some(value) = prior.get(attr.name) {
                    next.set(attr.name, value.clone());
                }
            }
        }
    }

    for association in kind.associations {
        match data.get(association.response) {
            Some(value) => {
                let ids = state::id_list(value);
                if !ids.is_empty() || prior.contains(association.name) {
                    next.set(association.name, state::id_objects(ids));
                }
            }
            None => {
                if let Some(value) = prior.get(association.name) {
                    next.set(association.name, value.clone());
                }
            }
        }
    }

    for single in kind.singles {
        let observed = match single.source {
            Source::Field => scalars.and_then(|s| s.get(single.name)),
            Source::Object => data.get(single.name).and_then(|o| o.get("id")),
        };
        match observed.and_then(Value::as_i64).filter(|id| *id != 0) {
            Some(id) => next.set(single.name, json!(id)),
            None if prior.contains(single.name) => next.set(single.name, Value::Null),
            None => {}
        }
    }

    if let Some(stamp) = prior.last_updated() {
        next.set("last_updated", json!(stamp));
    }

    next
}

impl Resource for ManagedResource {
    fn name(&self) -> String {
        self.kind.type_name()
    }

    fn schema(&self) -> Schema {
        self.kind.schema()
    }

    fn create(&self, client: &Client, desired: &ResourceState) -> Result<ResourceState> {
        let body = self.create_body(desired);
        let id = client
            .create(self.kind.path, &body)
            .with_context(|| format!("Unable to create {}", self.label()))?;
        log::info!("Created {} {id}", self.name());

        let created = desired.clone().with_id(id);
        self.read(client, &created)?
            .with_context(|| format!("Unable to read {}: {id} vanished after create", self.label()))
    }

    fn read(&self, client: &Client, prior: &ResourceState) -> Result<Option<ResourceState>> {
        let id = prior.record_id()?;
        let data = self
            .fetch(client, id)
            .with_context(|| format!("Unable to read {}", self.label()))?;

        let Some(data) = data.filter(|data| !is_gone(self.kind, data)) else {
            log::warn!("{} {id} no longer exists", self.name());
            return Ok(None);
        };

        Ok(Some(state_from_response(self.kind, id, &data, prior)))
    }

    fn update(
        &self,
        client: &Client,
        prior: &ResourceState,
        desired: &ResourceState,
    ) -> Result<ResourceState> {
        let id = prior.record_id()?;
        let (changes, plan) = self.plan_update(prior, desired)?;
        log::debug!("{} {id}: {} changes\n{plan}", self.name(), changes.len());

        let summary = engine::execute(client, &plan)?;

        let mut next = desired.clone().with_id(id);
        if summary.total_changes() > 0 {
            next.stamp(Utc::now());
        } else if let Some(stamp) = prior.last_updated() {
            next.set("last_updated", json!(stamp));
        }

        self.read(client, &next)?
            .with_context(|| format!("Unable to read {}: {id} vanished during update", self.label()))
    }

    fn delete(&self, client: &Client, state: &ResourceState) -> Result<()> {
        let id = state.record_id()?;
        client
            .delete(&self.kind.delete_item_path(id), None)
            .with_context(|| format!("Unable to delete {}", self.label()))?;
        log::info!("Deleted {} {id}", self.name());
        Ok(())
    }

    fn plan_update(
        &self,
        prior: &ResourceState,
        desired: &ResourceState,
    ) -> Result<(ChangeSet, UpdatePlan)> {
        let id = prior.record_id()?;
        let changes = engine::diff(self.kind, prior, desired)?;
        let plan = engine::plan(self.kind, id, prior, desired, &changes);
        Ok((changes, plan))
    }
}
