//! AWS IAM policies (`/v3/iam-policy`)
//!
//! The IAM path is fixed at creation. Policies managed by AWS or by the
//! system show up in listings but are flagged by the computed
//! `aws_managed_policy` and `system_managed_policy` fields.

use super::kind::{Association, Field, ResourceKind, owner_user_groups, owner_users};
use crate::schema::{AttributeKind::*, Mode::*};

static FIELDS: &[Field] = &[
    Field::new("aws_iam_path", String, Optional).force_new(),
    Field::computed("aws_managed_policy", Bool),
    Field::new("description", String, Optional),
    Field::new("name", String, Required),
    Field::computed("path_suffix", String),
    Field::new("policy", String, Required),
    Field::computed("system_managed_policy", Bool),
];

static ASSOCIATIONS: &[Association] = &[owner_users(), owner_user_groups()];

pub static KIND: ResourceKind = ResourceKind {
    name: "aws_iam_policy",
    label: "AwsIamPolicy",
    path: "/v3/iam-policy",
    delete_path: None,
    envelope: Some("iam_policy"),
    gone_flag: None,
    list_envelope: Some("iam_policy"),
    create_envelope: None,
    fields: FIELDS,
    associations: ASSOCIATIONS,
    singles: &[],
    data_source: true,
    list_scope: None,
};
