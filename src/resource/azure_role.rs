use super::kind::{Association, Field, ResourceKind, owner_user_groups, owner_users};
use crate::schema::{AttributeKind::*, Mode::*};

static FIELDS: &[Field] = &[
    Field::computed("azure_managed_policy", Bool),
    Field::new("description", String, Optional),
    Field::new("name", String, Required),
    Field::new("role_permissions", String, Required),
    Field::computed("system_managed_policy", Bool),
];

static ASSOCIATIONS: &[Association] = &[owner_users(), owner_user_groups()];

pub static KIND: ResourceKind = ResourceKind {
    name: "azure_role",
    label: "AzureRole",
    path: "/v3/azure-role",
    delete_path: None,
    envelope: Some("azure_role"),
    gone_flag: None,
    list_envelope: Some("azure_role"),
    create_envelope: None,
    fields: FIELDS,
    associations: ASSOCIATIONS,
    singles: &[],
    data_source: true,
    list_scope: None,
};
