use super::kind::{Association, Field, ResourceKind, owner_user_groups, owner_users};
use crate::schema::{AttributeKind::*, Mode::*};

static FIELDS: &[Field] = &[
    Field::computed("created_at", String),
    Field::new("created_by_user_id", Int, Required).force_new(),
    Field::computed("ct_managed", Bool),
    Field::new("description", String, Optional),
    Field::new("name", String, Required),
];

static ASSOCIATIONS: &[Association] = &[
    owner_users(),
    owner_user_groups(),
    Association::new(
        "compliance_checks",
        "compliance_checks",
        "compliance_check_ids",
        "association",
    ),
];

pub static KIND: ResourceKind = ResourceKind {
    name: "compliance_standard",
    label: "ComplianceStandard",
    path: "/v3/compliance/standard",
    delete_path: None,
    envelope: Some("compliance_standard"),
    gone_flag: None,
    list_envelope: None,
    create_envelope: None,
    fields: FIELDS,
    associations: ASSOCIATIONS,
    singles: &[],
    data_source: true,
    list_scope: None,
};
