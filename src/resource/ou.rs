//! Organizational units (`/v3/ou`)
//!
//! Moving an OU under a new parent is its own call, `POST /v2/ou/{id}/move`
//! with the new parent id as the whole body. Deletion also goes through
//! the v2 API. Owners and the permission scheme are granted through the
//! permission-mapping API, which this provider does not drive, so changing
//! them replaces the OU.

use super::kind::{
    Association, Change, Field, ResourceKind, SingleAssociation, Source, owner_user_groups,
    owner_users,
};
use crate::schema::{AttributeKind::*, Mode::*};

static FIELDS: &[Field] = &[
    Field::computed("created_at", String),
    Field::new("description", String, Optional),
    Field::new("name", String, Required),
    Field::new("permission_scheme_id", Int, Required).force_new(),
];

static ASSOCIATIONS: &[Association] = &[
    owner_users().force_new(),
    owner_user_groups().force_new(),
];

static SINGLES: &[SingleAssociation] = &[SingleAssociation {
    name: "parent_ou_id",
    source: Source::Field,
    create_key: "parent_ou_id",
    change: Change::Move { base: "/v2/ou" },
}];

pub static KIND: ResourceKind = ResourceKind {
    name: "ou",
    label: "OU",
    path: "/v3/ou",
    delete_path: Some("/v2/ou"),
    envelope: Some("ou"),
    gone_flag: None,
    list_envelope: None,
    create_envelope: None,
    fields: FIELDS,
    associations: ASSOCIATIONS,
    singles: SINGLES,
    data_source: true,
    list_scope: None,
};
