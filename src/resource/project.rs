//! Projects (`/v3/project`)
//!
//! A project comes back flat under `data`, and an archived project is as
//! good as deleted. Funding is sent whole on create and replaced through
//! the v1 `/funding` endpoint on update. The API does not echo it back.
//! Owners can only be set at creation.

use serde_json::{Map, Value};

use super::kind::{Association, Field, FieldPatch, ResourceKind, owner_user_groups, owner_users};
use crate::schema::{AttributeKind::*, Mode::*};

/// `"2024-03"` becomes `202403`; anything else is sent unchanged
fn datecode(value: &Value) -> Value {
    value
        .as_str()
        .and_then(|code| code.replace('-', "").parse::<i64>().ok())
        .map_or_else(|| value.clone(), Value::from)
}

/// Body for `PATCH /v1/project/{id}/funding`
fn encode_funding(funding: &Value) -> Value {
    let entries = funding.as_array().map(Vec::as_slice).unwrap_or_default();
    Value::Array(
        entries
            .iter()
            .map(|entry| {
                let mut update = entry.as_object().cloned().unwrap_or_else(Map::new);
                for key in ["start_datecode", "end_datecode"] {
                    if let Some(code) = update.get(key).map(datecode) {
                        update.insert(key.to_string(), code);
                    }
                }
                Value::Object(update)
            })
            .collect(),
    )
}

static FIELDS: &[Field] = &[
    Field::new("auto_pay", Bool, Optional),
    Field::new("default_aws_region", String, Optional),
    Field::new("description", String, Optional),
    Field::new("name", String, Required),
    Field::new("ou_id", Int, Required).force_new(),
    Field::new("permission_scheme_id", Int, Required),
    Field::new("project_funding", ObjectList, Required).patched_alone(FieldPatch {
        base: "/v1/project",
        endpoint: "funding",
        encode: encode_funding,
    }),
];

static ASSOCIATIONS: &[Association] = &[
    owner_users().force_new(),
    owner_user_groups().force_new(),
];

pub static KIND: ResourceKind = ResourceKind {
    name: "project",
    label: "Project",
    path: "/v3/project",
    delete_path: Some("/v1/project"),
    envelope: None,
    gone_flag: Some("archived"),
    list_envelope: None,
    create_envelope: None,
    fields: FIELDS,
    associations: ASSOCIATIONS,
    singles: &[],
    data_source: false,
    list_scope: None,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_funding_datecodes_become_numbers() {
        let body = encode_funding(&json!([{
            "amount": 1000,
            "funding_order": 1,
            "funding_source_id": 3,
            "start_datecode": "2024-01",
            "end_datecode": "2024-12",
        }]));

        assert_eq!(
            body,
            json!([{
                "amount": 1000,
                "funding_order": 1,
                "funding_source_id": 3,
                "start_datecode": 202401,
                "end_datecode": 202412,
            }])
        );
    }

    #[test]
    fn test_unparseable_datecode_is_left_alone() {
        let body = encode_funding(&json!([{"start_datecode": "soon"}]));
        assert_eq!(body, json!([{"start_datecode": "soon"}]));
        assert_eq!(encode_funding(&json!(null)), json!([]));
    }
}
