//! Cloud rules (`/v3/cloud-rule`)
//!
//! A cloud rule bundles policies, templates and compliance standards and
//! applies them to OUs and projects. Every bundled item is a relation
//! maintained through `/association`; owners go through `/owner`.

use super::kind::{Association, Field, ResourceKind, owner_user_groups, owner_users};
use crate::schema::{AttributeKind::*, Mode::*};

static FIELDS: &[Field] = &[
    Field::computed("built_in", Bool),
    Field::new("description", String, Optional),
    Field::new("name", String, Required),
    Field::new("post_webhook_id", Id, Optional),
    Field::new("pre_webhook_id", Id, Optional),
];

const fn linked(name: &'static str, key: &'static str) -> Association {
    Association::new(name, name, key, "association")
}

static ASSOCIATIONS: &[Association] = &[
    owner_users(),
    owner_user_groups(),
    linked("aws_cloudformation_templates", "cft_ids"),
    linked("aws_iam_policies", "iam_policy_ids"),
    linked("azure_arm_template_definitions", "azure_arm_template_definition_ids"),
    linked("azure_policy_definitions", "azure_policy_definition_ids"),
    linked("azure_role_definitions", "azure_role_definition_ids"),
    linked("compliance_standards", "compliance_standard_ids"),
    linked("internal_aws_amis", "internal_ami_ids"),
    linked("internal_aws_service_catalog_portfolios", "internal_portfolio_ids"),
    linked("ous", "ou_ids"),
    linked("projects", "project_ids"),
    linked("service_control_policies", "service_control_policy_ids"),
];

pub static KIND: ResourceKind = ResourceKind {
    name: "cloud_rule",
    label: "CloudRule",
    path: "/v3/cloud-rule",
    delete_path: None,
    envelope: Some("cloud_rule"),
    gone_flag: None,
    list_envelope: None,
    create_envelope: None,
    fields: FIELDS,
    associations: ASSOCIATIONS,
    singles: &[],
    data_source: true,
    list_scope: None,
};
