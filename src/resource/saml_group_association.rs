//! SAML group associations (`/v3/idms/group-association`)
//!
//! Maps a SAML assertion to a user group. The API only lists
//! associations per identity management system, so the data source walks
//! every IDMS in turn.

use super::kind::{Field, ListScope, ResourceKind};
use crate::schema::{AttributeKind::*, Mode::*};

static FIELDS: &[Field] = &[
    Field::new("assertion_name", String, Optional),
    Field::new("assertion_regex", String, Optional),
    Field::new("idms_id", Int, Optional).force_new(),
    Field::computed("idms_saml_id", Int),
    Field::computed("should_update_on_login", Bool),
    Field::new("update_on_login", Bool, Optional),
    Field::new("user_group_id", Int, Optional),
];

pub static KIND: ResourceKind = ResourceKind {
    name: "saml_group_association",
    label: "SamlGroupAssociation",
    path: "/v3/idms/group-association",
    delete_path: None,
    envelope: None,
    gone_flag: None,
    list_envelope: None,
    create_envelope: None,
    fields: FIELDS,
    associations: &[],
    singles: &[],
    data_source: true,
    list_scope: Some(ListScope {
        parents: "/v3/idms",
        children: "group-association",
    }),
};
