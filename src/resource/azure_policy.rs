//! Azure policy definitions (`/v3/azure-policy`)
//!
//! Unlike the other kinds, the create body nests the scalar fields under
//! `azure_policy` and names the owner arrays `owner_users` and
//! `owner_user_groups`.

use super::kind::{Association, Field, ResourceKind, owner_user_groups, owner_users};
use crate::schema::{AttributeKind::*, Mode::*};

static FIELDS: &[Field] = &[
    Field::computed("azure_managed_policy_def_id", String),
    Field::computed("ct_managed", Bool),
    Field::new("description", String, Optional),
    Field::new("name", String, Required),
    Field::new("parameters", String, Optional),
    Field::new("policy", String, Required),
];

static ASSOCIATIONS: &[Association] = &[
    owner_users().create_key("owner_users"),
    owner_user_groups().create_key("owner_user_groups"),
];

pub static KIND: ResourceKind = ResourceKind {
    name: "azure_policy",
    label: "AzurePolicy",
    path: "/v3/azure-policy",
    delete_path: None,
    envelope: Some("azure_policy"),
    gone_flag: None,
    list_envelope: Some("azure_policy"),
    create_envelope: Some("azure_policy"),
    fields: FIELDS,
    associations: ASSOCIATIONS,
    singles: &[],
    data_source: true,
    list_scope: None,
};
