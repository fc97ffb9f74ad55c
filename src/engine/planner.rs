//! Update planning
//!
//! Turns a [`ChangeSet`] into the ordered list of API calls that bring the
//! server in line with the desired configuration:
//!
//! 1. one PATCH carrying every updatable field, if any field changed
//! 2. one PATCH per changed field that has an endpoint of its own
//! 3. per add/remove endpoint, one POST for additions and one DELETE for
//!    removals
//! 4. one `/move` POST per changed single-valued relation that moves
//!
//! Planning is pure; nothing here touches the network.

use ctclient::Method;
use serde_json::{Map, Value, json};
use std::fmt;

use super::differ::ChangeSet;
use crate::resource::kind::{Change, ResourceKind, Wire};
use crate::schema::Mode;
use crate::state::ResourceState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Patch,
    Add,
    Remove,
    Move,
}

impl Action {
    pub const fn method(self) -> Method {
        match self {
            Self::Patch => Method::Patch,
            Self::Add | Self::Move => Method::Post,
            Self::Remove => Method::Delete,
        }
    }
}

/// One API call in an update plan
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub action: Action,
    pub path: String,
    pub body: Value,
    /// Diagnostic summary used when the call fails
    pub summary: String,
}

impl ApiCall {
    pub const fn method(&self) -> Method {
        self.action.method()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePlan {
    pub calls: Vec<ApiCall>,
}

impl UpdatePlan {
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Calls going to one path with one method
    #[cfg(test)]
    pub fn calls_to(&self, method: Method, path: &str) -> Vec<&ApiCall> {
        self.calls
            .iter()
            .filter(|c| c.method() == method && c.path == path)
            .collect()
    }
}

impl fmt::Display for UpdatePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for call in &self.calls {
            writeln!(f, "{} {} {}", call.method(), call.path, call.body)?;
        }
        Ok(())
    }
}

/// Which side of an endpoint group a body is built for
#[derive(Clone, Copy)]
enum Side {
    Add,
    Remove,
}

/// Build the update plan for one object
///
/// The PATCH body is a full replacement, so an optional-computed field the
/// configuration leaves out is sent with its prior value.
pub fn plan(
    kind: &'static ResourceKind,
    id: i64,
    prior: &ResourceState,
    desired: &ResourceState,
    changes: &ChangeSet,
) -> UpdatePlan {
    let mut calls = Vec::new();

    let changed = |name: &str| changes.fields.iter().any(|c| c.name == name);

    if kind.fields.iter().any(|f| f.update && changed(f.attribute.name)) {
        let body: Map<String, Value> = kind
            .fields
            .iter()
            .filter(|f| f.update)
            .map(|f| {
                let attr = f.attribute;
                let omitted = attr.mode == Mode::OptionalComputed && !desired.contains(attr.name);
                let source = if omitted { prior } else { desired };
                (attr.name.to_string(), source.value(attr.name, attr.kind))
            })
            .collect();
        calls.push(ApiCall {
            action: Action::Patch,
            path: kind.item_path(id),
            body: Value::Object(body),
            summary: format!("Unable to update {}", kind.label),
        });
    }

    for field in kind.fields {
        let Some(patch) = field.own_patch else {
            continue;
        };
        let attr = field.attribute;
        if changed(attr.name) {
            calls.push(ApiCall {
                action: Action::Patch,
                path: format!("{}/{id}/{}", patch.base, patch.endpoint),
                body: (patch.encode)(&desired.value(attr.name, attr.kind)),
                summary: format!("Unable to update {} on {}", attr.name, kind.label),
            });
        }
    }

    for endpoint in kind.endpoints() {
        for side in [Side::Add, Side::Remove] {
            if let Some(body) = group_body(kind, endpoint, changes, side) {
                let (action, verb) = match side {
                    Side::Add => (Action::Add, "add"),
                    Side::Remove => (Action::Remove, "remove"),
                };
                calls.push(ApiCall {
                    action,
                    path: kind.endpoint_path(id, endpoint),
                    body,
                    summary: format!("Unable to {verb} {endpoint}s on {}", kind.label),
                });
            }
        }
    }

    for change in &changes.singles {
        if let Change::Move { base } = change.single.change {
            let target = change.change.to_set().unwrap_or(0);
            calls.push(ApiCall {
                action: Action::Move,
                path: format!("{base}/{id}/move"),
                body: json!(target),
                summary: format!("Unable to update {} on {}", change.single.name, kind.label),
            });
        }
    }

    UpdatePlan { calls }
}

/// Build the add or remove body for one endpoint, or `None` if that side
/// has nothing to send
///
/// Object bodies carry every key the endpoint knows about. Relations that
/// did not change on this side are sent as empty arrays, single-valued
/// ones as `null`.
fn group_body(
    kind: &ResourceKind,
    endpoint: &str,
    changes: &ChangeSet,
    side: Side,
) -> Option<Value> {
    let mut body = Map::new();
    let mut bare = None;
    let mut any = false;

    for association in kind.associations.iter().filter(|a| a.endpoint == endpoint) {
        let ids = changes
            .association(association.name)
            .map(|delta| match side {
                Side::Add => delta.additions(),
                Side::Remove => delta.removals(),
            })
            .unwrap_or_default();
        any |= !ids.is_empty();

        match association.wire {
            Wire::Key(key) => {
                body.insert(key.to_string(), json!(ids));
            }
            Wire::Bare => bare = Some(json!(ids)),
        }
    }

    for single in kind.singles {
        let Change::Grouped { endpoint: e, key } = single.change else {
            continue;
        };
        if e != endpoint {
            continue;
        }
        let value = changes.single(single.name).and_then(|change| match side {
            Side::Add => change.to_set(),
            Side::Remove => change.to_clear(),
        });
        any |= value.is_some();
        body.insert(key.to_string(), value.map_or(Value::Null, Value::from));
    }

    if !any {
        return None;
    }
    Some(bare.unwrap_or(Value::Object(body)))
}
