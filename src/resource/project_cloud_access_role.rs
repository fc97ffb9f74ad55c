//! Project cloud access roles (`/v3/project-cloud-access-role`)
//!
//! Accounts, policies, role definitions and grantees are relations on the
//! `/association` endpoint. The permissions boundary is a single policy
//! reference carried in the same add/remove bodies.

use super::kind::{Association, Change, Field, ResourceKind, SingleAssociation, Source};
use crate::schema::{AttributeKind::*, Mode::*};

static FIELDS: &[Field] = &[
    Field::new("apply_to_all_accounts", Bool, Optional),
    Field::new("aws_iam_path", String, Optional).force_new(),
    Field::new("aws_iam_role_name", String, Required).force_new(),
    Field::new("future_accounts", Bool, Optional),
    Field::new("long_term_access_keys", Bool, Optional),
    Field::new("name", String, Required),
    Field::new("project_id", Int, Required).force_new(),
    Field::new("short_term_access_keys", Bool, Optional),
    Field::new("web_access", Bool, Optional),
];

static ASSOCIATIONS: &[Association] = &[
    Association::new("accounts", "accounts", "account_ids", "association"),
    Association::new(
        "aws_iam_policies",
        "aws_iam_policies",
        "aws_iam_policies",
        "association",
    ),
    Association::new(
        "azure_role_definitions",
        "azure_role_definitions",
        "azure_role_definitions",
        "association",
    ),
    Association::new("user_groups", "user_groups", "user_group_ids", "association"),
    Association::new("users", "users", "user_ids", "association"),
];

static SINGLES: &[SingleAssociation] = &[SingleAssociation {
    name: "aws_iam_permissions_boundary",
    source: Source::Object,
    create_key: "aws_iam_permissions_boundary",
    change: Change::Grouped {
        endpoint: "association",
        key: "aws_iam_permissions_boundary",
    },
}];

pub static KIND: ResourceKind = ResourceKind {
    name: "project_cloud_access_role",
    label: "ProjectCloudAccessRole",
    path: "/v3/project-cloud-access-role",
    delete_path: None,
    envelope: Some("project_cloud_access_role"),
    gone_flag: None,
    list_envelope: None,
    create_envelope: None,
    fields: FIELDS,
    associations: ASSOCIATIONS,
    singles: SINGLES,
    data_source: false,
    list_scope: None,
};
