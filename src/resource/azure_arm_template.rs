//! Azure ARM template definitions (`/v3/azure-arm-template`)

use super::kind::{Association, Field, ResourceKind, owner_user_groups, owner_users};
use crate::schema::{AttributeKind::*, Mode::*};

static FIELDS: &[Field] = &[
    Field::computed("ct_managed", Bool),
    Field::new("deployment_mode", Int, Required),
    Field::new("description", String, Optional),
    Field::new("name", String, Required),
    Field::new("resource_group_name", String, Required).force_new(),
    Field::new("resource_group_region_id", Int, Required).force_new(),
    Field::new("template", String, Required),
    // The server fills in "{}" when left empty.
    Field::new("template_parameters", String, OptionalComputed),
    Field::computed("version", Int),
];

static ASSOCIATIONS: &[Association] = &[owner_users(), owner_user_groups()];

pub static KIND: ResourceKind = ResourceKind {
    name: "azure_arm_template",
    label: "Azure ARM Template",
    path: "/v3/azure-arm-template",
    delete_path: None,
    envelope: Some("azure_arm_template"),
    gone_flag: None,
    list_envelope: Some("azure_arm_template"),
    create_envelope: None,
    fields: FIELDS,
    associations: ASSOCIATIONS,
    singles: &[],
    data_source: true,
    list_scope: None,
};
