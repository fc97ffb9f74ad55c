//! Change detection between prior state and desired configuration

use colored::Colorize;
use declarative::{MembershipDelta, SingleValueChange, reconcile, reconcile_single_valued};
use serde_json::Value;
use std::fmt;

use crate::resource::kind::{Association, ResourceKind, SingleAssociation};
use crate::schema::Mode;
use crate::state::ResourceState;

#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("changing {} on {kind} requires replacement", .attributes.join(", "))]
    RequiresReplacement {
        kind: &'static str,
        attributes: Vec<&'static str>,
    },
}

/// A scalar field whose value changes
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub name: &'static str,
    pub from: Value,
    pub to: Value,
}

#[derive(Debug, Clone)]
pub struct AssociationChange {
    pub association: &'static Association,
    pub delta: MembershipDelta,
}

#[derive(Debug, Clone)]
pub struct SingleChange {
    pub single: &'static SingleAssociation,
    pub change: SingleValueChange,
}

/// Everything that differs, ready for planning
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub fields: Vec<FieldChange>,
    pub associations: Vec<AssociationChange>,
    pub singles: Vec<SingleChange>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.associations.is_empty() && self.singles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len() + self.associations.len() + self.singles.len()
    }

    pub fn association(&self, name: &str) -> Option<&MembershipDelta> {
        self.associations
            .iter()
            .find(|c| c.association.name == name)
            .map(|c| &c.delta)
    }

    pub fn single(&self, name: &str) -> Option<SingleValueChange> {
        self.singles
            .iter()
            .find(|c| c.single.name == name)
            .map(|c| c.change)
    }
}

/// Compare prior state against desired configuration
///
/// Fields the server computes are ignored, and an optional-computed field
/// left out of the configuration keeps whatever the server chose. Changes
/// to force-new attributes are collected and rejected together.
pub fn diff(
    kind: &'static ResourceKind,
    prior: &ResourceState,
    desired: &ResourceState,
) -> Result<ChangeSet, DiffError> {
    let mut changes = ChangeSet::default();
    let mut replacements = Vec::new();

    for field in kind.fields {
        let attr = field.attribute;
        if !attr.mode.is_configurable()
            || (attr.mode == Mode::OptionalComputed && !desired.contains(attr.name))
        {
            continue;
        }

        let from = prior.value(attr.name, attr.kind);
        let to = desired.value(attr.name, attr.kind);
        if from == to {
            continue;
        }

        if attr.force_new {
            replacements.push(attr.name);
        } else if field.is_updatable() {
            changes.fields.push(FieldChange {
                name: attr.name,
                from,
                to,
            });
        }
    }

    for association in kind.associations {
        let delta = reconcile(desired.ids(association.name), prior.ids(association.name));
        if !delta.changed() {
            continue;
        }
        if association.force_new {
            replacements.push(association.name);
        } else {
            log::debug!("{}.{}: {delta}", kind.name, association.name);
            changes.associations.push(AssociationChange { association, delta });
        }
    }

    for single in kind.singles {
        let change =
            reconcile_single_valued(desired.reference(single.name), prior.reference(single.name));
        if change.changed() {
            changes.singles.push(SingleChange { single, change });
        }
    }

    if !replacements.is_empty() {
        return Err(DiffError::RequiresReplacement {
            kind: kind.label,
            attributes: replacements,
        });
    }

    Ok(changes)
}

fn short(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > 40 => {
            format!("\"{}...\"", s.chars().take(37).collect::<String>())
        }
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "  {} No changes needed", "✓".green());
        }

        for change in &self.fields {
            writeln!(
                f,
                "  {} {:<28} {} → {}",
                "~".yellow(),
                change.name,
                short(&change.from).dimmed(),
                short(&change.to)
            )?;
        }

        for change in &self.associations {
            let delta = &change.delta;
            for id in &delta.to_add {
                writeln!(f, "  {} {:<28} {id}", "+".green(), change.association.name)?;
            }
            for id in &delta.to_remove {
                writeln!(f, "  {} {:<28} {id}", "-".red(), change.association.name)?;
            }
        }

        for change in &self.singles {
            let name = change.single.name;
            match change.change {
                SingleValueChange::Set(id) => writeln!(f, "  {} {name:<28} {id}", "~".yellow())?,
                SingleValueChange::Clear(id) => {
                    writeln!(f, "  {} {name:<28} {}", "-".red(), format!("{id} → null").dimmed())?;
                }
                SingleValueChange::Unchanged => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{cloud_rule, ou, project_cloud_access_role};
    use serde_json::json;

    fn state(value: Value) -> ResourceState {
        ResourceState::from_value(value).unwrap()
    }

    #[test]
    fn test_no_changes() {
        let prior = state(json!({"id": "1", "name": "r", "owner_users": [{"id": 2}]}));
        let desired = state(json!({"name": "r", "owner_users": [{"id": 2}]}));

        let changes = diff(&cloud_rule::KIND, &prior, &desired).unwrap();
        assert!(changes.is_empty());
        assert!(changes.to_string().contains("No changes"));
    }

    #[test]
    fn test_field_and_association_changes() {
        let prior = state(json!({
            "id": "1",
            "name": "old",
            "built_in": true,
            "aws_iam_policies": [{"id": 1}, {"id": 2}],
        }));
        let desired = state(json!({
            "name": "new",
            "aws_iam_policies": [{"id": 2}, {"id": 3}],
        }));

        let changes = diff(&cloud_rule::KIND, &prior, &desired).unwrap();

        assert_eq!(
            changes.fields,
            vec![FieldChange {
                name: "name",
                from: json!("old"),
                to: json!("new"),
            }]
        );
        let delta = changes.association("aws_iam_policies").unwrap();
        assert_eq!(delta.additions(), vec![3]);
        assert_eq!(delta.removals(), vec![1]);
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn test_webhook_zero_equals_null() {
        let prior = state(json!({"id": "1", "name": "r", "pre_webhook_id": null}));
        let desired = state(json!({"name": "r", "pre_webhook_id": 0}));

        assert!(diff(&cloud_rule::KIND, &prior, &desired).unwrap().is_empty());
    }

    #[test]
    fn test_force_new_rejected() {
        let prior = state(json!({"id": "5", "name": "role", "project_id": 1, "aws_iam_role_name": "a"}));
        let desired = state(json!({"name": "role", "project_id": 2, "aws_iam_role_name": "b"}));

        let err = diff(&project_cloud_access_role::KIND, &prior, &desired).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("requires replacement"));
        assert!(message.contains("project_id"));
        assert!(message.contains("aws_iam_role_name"));
    }

    #[test]
    fn test_single_valued_change() {
        let prior = state(json!({"id": "4", "name": "ou", "parent_ou_id": 2}));
        let desired = state(json!({"name": "ou", "parent_ou_id": 7}));

        let changes = diff(&ou::KIND, &prior, &desired).unwrap();
        assert_eq!(changes.single("parent_ou_id"), Some(SingleValueChange::Set(7)));

        let cleared = state(json!({"name": "ou"}));
        let changes = diff(&ou::KIND, &prior, &cleared).unwrap();
        assert_eq!(changes.single("parent_ou_id"), Some(SingleValueChange::Clear(2)));
    }

    #[test]
    fn test_display_lists_every_change() {
        let prior = state(json!({"id": "1", "name": "r", "owner_users": [{"id": 1}]}));
        let desired = state(json!({"name": "r2", "owner_users": [{"id": 2}]}));

        let shown = diff(&cloud_rule::KIND, &prior, &desired).unwrap().to_string();
        assert!(shown.contains("name"));
        assert!(shown.contains("owner_users"));
        assert!(shown.lines().count() >= 3);
    }
}
