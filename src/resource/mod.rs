//! Resource trait and the resource kinds the provider manages
//!
//! Every managed object is modeled as a Resource with:
//! - Create (POST, then read back)
//! - Read (GET; a missing object reads as `None`)
//! - Update (diff, plan, execute; see [`crate::engine`])
//! - Delete
//!
//! Kinds are described as data in [`kind::ResourceKind`] descriptors and
//! driven by the one generic [`ManagedResource`].

use anyhow::Result;
use ctclient::Client;
use std::fmt;

use crate::engine::{ChangeSet, UpdatePlan};
use crate::schema::Schema;
use crate::state::ResourceState;

pub mod kind;
pub mod managed;

pub mod aws_cloudformation_template;
pub mod aws_iam_policy;
pub mod azure_arm_template;
pub mod azure_policy;
pub mod azure_role;
pub mod cloud_rule;
pub mod compliance_check;
pub mod compliance_standard;
pub mod gcp_iam_role;
pub mod ou;
pub mod project;
pub mod project_cloud_access_role;
pub mod saml_group_association;
pub mod user_group;

pub use kind::ResourceKind;
pub use managed::ManagedResource;

/// Every resource kind, in registration order
pub static KINDS: &[&ResourceKind] = &[
    &aws_cloudformation_template::KIND,
    &aws_iam_policy::KIND,
    &azure_arm_template::KIND,
    &azure_policy::KIND,
    &azure_role::KIND,
    &cloud_rule::KIND,
    &compliance_check::KIND,
    &compliance_standard::KIND,
    &gcp_iam_role::KIND,
    &ou::KIND,
    &project::KIND,
    &project_cloud_access_role::KIND,
    &saml_group_association::KIND,
    &user_group::KIND,
];

/// Lifecycle callbacks for one resource type
pub trait Resource: Send + Sync + fmt::Debug {
    /// Full type name (e.g., "cloudtamerio_cloud_rule")
    fn name(&self) -> String;

    fn schema(&self) -> Schema;

    /// Create the object and return its state as read back from the server
    fn create(&self, client: &Client, desired: &ResourceState) -> Result<ResourceState>;

    /// Refresh state; `None` when the object no longer exists
    fn read(&self, client: &Client, prior: &ResourceState) -> Result<Option<ResourceState>>;

    /// Converge the object from `prior` to `desired`
    fn update(
        &self,
        client: &Client,
        prior: &ResourceState,
        desired: &ResourceState,
    ) -> Result<ResourceState>;

    fn delete(&self, client: &Client, state: &ResourceState) -> Result<()>;

    /// The changes and API calls an update would make, without sending them
    fn plan_update(
        &self,
        prior: &ResourceState,
        desired: &ResourceState,
    ) -> Result<(ChangeSet, UpdatePlan)>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_kind_names_unique() {
        let names: HashSet<_> = KINDS.iter().map(|k| k.name).collect();
        assert_eq!(names.len(), KINDS.len());
    }

    #[test]
    fn test_every_field_name_unique_per_kind() {
        for kind in KINDS {
            let schema = kind.schema();
            let names: HashSet<_> = schema.attributes.iter().map(|a| a.name).collect();
            assert_eq!(names.len(), schema.attributes.len(), "{}", kind.name);
        }
    }

    #[test]
    fn test_projects_lack_data_sources() {
        let without: Vec<_> = KINDS
            .iter()
            .filter(|k| !k.data_source)
            .map(|k| k.name)
            .collect();
        assert_eq!(without, vec!["project", "project_cloud_access_role"]);
    }

    #[test]
    fn test_association_wire_keys_unique_per_endpoint() {
        for kind in KINDS {
            for endpoint in kind.endpoints() {
                let keys: Vec<_> = kind
                    .associations
                    .iter()
                    .filter(|a| a.endpoint == endpoint)
                    .filter_map(|a| match a.wire {
                        kind::Wire::Key(key) => Some(key),
                        kind::Wire::Bare => None,
                    })
                    .collect();
                let unique: HashSet<_> = keys.iter().collect();
                assert_eq!(unique.len(), keys.len(), "{}/{endpoint}", kind.name);
            }
        }
    }
}
