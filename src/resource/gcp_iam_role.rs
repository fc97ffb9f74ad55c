//! GCP IAM roles (`/v3/gcp-iam-role`)

use super::kind::{Association, Field, ResourceKind, owner_user_groups, owner_users};
use crate::schema::{AttributeKind::*, Mode::*};

static FIELDS: &[Field] = &[
    Field::new("name", String, Required),
    Field::new("description", String, Optional),
    Field::new("role_permissions", StringList, Required),
    Field::new("gcp_role_launch_stage", Int, Required),
    Field::computed("gcp_managed_policy", Bool),
    Field::computed("gcp_id", String),
    Field::new("system_managed_policy", Bool, OptionalComputed).read_only(),
];

static ASSOCIATIONS: &[Association] = &[owner_users(), owner_user_groups()];

pub static KIND: ResourceKind = ResourceKind {
    name: "gcp_iam_role",
    label: "GcpIamRole",
    path: "/v3/gcp-iam-role",
    delete_path: None,
    envelope: Some("gcp_role"),
    gone_flag: None,
    list_envelope: Some("gcp_role"),
    create_envelope: None,
    fields: FIELDS,
    associations: ASSOCIATIONS,
    singles: &[],
    data_source: true,
    list_scope: None,
};
