//! Compliance checks (`/v3/compliance/check`)

use super::kind::{Association, Field, ResourceKind, owner_user_groups, owner_users};
use crate::schema::{AttributeKind::*, Mode::*};

static FIELDS: &[Field] = &[
    Field::new("azure_policy_id", Id, Optional),
    Field::new("body", String, Optional),
    Field::new("cloud_provider_id", Int, Required),
    Field::new("compliance_check_type_id", Int, Required),
    Field::computed("created_at", String),
    Field::new("created_by_user_id", Int, Optional).force_new(),
    Field::computed("ct_managed", Bool),
    Field::new("description", String, Optional),
    Field::new("frequency_minutes", Int, Optional),
    Field::new("frequency_type_id", Int, Optional),
    Field::new("is_all_regions", Bool, Optional),
    Field::new("is_auto_archived", Bool, Optional),
    Field::computed("last_scan_id", Int),
    Field::new("name", String, Required),
    // The API pads this list with empty strings; they are dropped on read.
    Field::new("regions", StringList, Optional),
    Field::new("severity_type_id", Id, Optional),
];

static ASSOCIATIONS: &[Association] = &[owner_users(), owner_user_groups()];

pub static KIND: ResourceKind = ResourceKind {
    name: "compliance_check",
    label: "ComplianceCheck",
    path: "/v3/compliance/check",
    delete_path: None,
    envelope: Some("compliance_check"),
    gone_flag: None,
    list_envelope: None,
    create_envelope: None,
    fields: FIELDS,
    associations: ASSOCIATIONS,
    singles: &[],
    data_source: true,
    list_scope: None,
};
