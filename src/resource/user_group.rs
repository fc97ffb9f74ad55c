//! User groups (`/v3/user-group`)
//!
//! Owning groups live under `owner_groups` in state but come back as
//! `owner_group` from the API. Members are added and removed through
//! `/user` with a bare array of user ids.

use super::kind::{Association, Field, ResourceKind, owner_users};
use crate::schema::{AttributeKind::*, Mode::*};

static FIELDS: &[Field] = &[
    Field::computed("created_at", String),
    Field::new("description", String, Optional),
    Field::computed("enabled", Bool),
    Field::new("idms_id", Int, Required),
    Field::new("name", String, Required),
];

static ASSOCIATIONS: &[Association] = &[
    owner_users(),
    Association::new("owner_groups", "owner_group", "owner_user_group_ids", "owner"),
    Association::new("users", "users", "user_ids", "user").bare(),
];

pub static KIND: ResourceKind = ResourceKind {
    name: "user_group",
    label: "UserGroup",
    path: "/v3/user-group",
    delete_path: None,
    envelope: Some("user_group"),
    gone_flag: None,
    list_envelope: None,
    create_envelope: None,
    fields: FIELDS,
    associations: ASSOCIATIONS,
    singles: &[],
    data_source: true,
    list_scope: None,
};
