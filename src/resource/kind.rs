//! Static descriptors for resource kinds
//!
//! Each kind of object the API manages is described once, as data: where
//! it lives, how its JSON is shaped, which fields can be changed in place,
//! and which relations are maintained through separate add/remove calls.
//! [`super::ManagedResource`] turns a descriptor into a working resource.

use serde_json::Value;

use crate::schema::{Attribute, AttributeKind, Mode, Schema};

/// Prefix every type name carries
pub const TYPE_PREFIX: &str = "cloudtamerio_";

// ============================================================================
// Scalar Fields
// ============================================================================

/// A scalar attribute stored inside the kind's envelope object
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub attribute: Attribute,
    /// Sent in the create body
    pub create: bool,
    /// Sent in the PATCH body
    pub update: bool,
    /// Sent on its own instead of in the PATCH body
    pub own_patch: Option<FieldPatch>,
}

/// A field updated through `PATCH {base}/{id}/{endpoint}`
#[derive(Debug, Clone, Copy)]
pub struct FieldPatch {
    pub base: &'static str,
    pub endpoint: &'static str,
    /// Turns the state value into the request body
    pub encode: fn(&Value) -> Value,
}

impl Field {
    /// A configurable field, sent on create and update
    pub const fn new(name: &'static str, kind: AttributeKind, mode: Mode) -> Self {
        let configurable = !matches!(mode, Mode::Computed);
        Self {
            attribute: Attribute::new(name, kind, mode),
            create: configurable,
            update: configurable,
            own_patch: None,
        }
    }

    /// A field filled in by the server
    pub const fn computed(name: &'static str, kind: AttributeKind) -> Self {
        Self::new(name, kind, Mode::Computed)
    }

    /// A field the API reports but never accepts
    pub const fn read_only(mut self) -> Self {
        self.create = false;
        self.update = false;
        self
    }

    /// A field changed through its own endpoint rather than the PATCH body
    pub const fn patched_alone(mut self, patch: FieldPatch) -> Self {
        self.update = false;
        self.own_patch = Some(patch);
        self
    }

    /// Whether a change to this field can be applied in place
    pub const fn is_updatable(&self) -> bool {
        self.update || self.own_patch.is_some()
    }

    /// A field that can only be set at creation
    pub const fn force_new(mut self) -> Self {
        self.attribute = self.attribute.force_new();
        self.update = false;
        self
    }
}

// ============================================================================
// Many-to-many Associations
// ============================================================================

/// How a relation's ids appear in an add/remove body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wire {
    /// Under a key of a JSON object, next to the rest of the group
    Key(&'static str),
    /// As the whole body, a bare array of ids
    Bare,
}

/// A many-to-many relation maintained through `{path}/{id}/{endpoint}`
#[derive(Debug, Clone, Copy)]
pub struct Association {
    /// State attribute, a list of `{ "id": n }`
    pub name: &'static str,
    /// Key of the `[{ "id": n }]` list in the GET response
    pub response: &'static str,
    /// Key of the id array in the create body
    pub create_key: &'static str,
    /// Sub-resource that takes the add (POST) and remove (DELETE) calls
    pub endpoint: &'static str,
    pub wire: Wire,
    pub force_new: bool,
}

impl Association {
    /// A relation whose wire key equals its create key
    pub const fn new(
        name: &'static str,
        response: &'static str,
        key: &'static str,
        endpoint: &'static str,
    ) -> Self {
        Self {
            name,
            response,
            create_key: key,
            endpoint,
            wire: Wire::Key(key),
            force_new: false,
        }
    }

    pub const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub const fn bare(mut self) -> Self {
        self.wire = Wire::Bare;
        self
    }

    pub const fn create_key(mut self, key: &'static str) -> Self {
        self.create_key = key;
        self
    }

    pub fn attribute(&self) -> Attribute {
        let attr = Attribute::new(self.name, AttributeKind::IdList, Mode::Optional);
        if self.force_new { attr.force_new() } else { attr }
    }
}

/// Owning users, through `/owner`
pub const fn owner_users() -> Association {
    Association::new("owner_users", "owner_users", "owner_user_ids", "owner")
}

/// Owning user groups, through `/owner`
pub const fn owner_user_groups() -> Association {
    Association::new(
        "owner_user_groups",
        "owner_user_groups",
        "owner_user_group_ids",
        "owner",
    )
}

// ============================================================================
// Single-valued Associations
// ============================================================================

/// Where the observed value of a single-valued relation is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A plain integer field inside the envelope
    Field,
    /// An `{ "id": n }` object (or null) next to the envelope
    Object,
}

/// How a change to a single-valued relation is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// POST the bare id to `{base}/{id}/move`; clearing moves to `0`
    Move { base: &'static str },
    /// Carried in the add/remove body of an association endpoint
    Grouped { endpoint: &'static str, key: &'static str },
}

/// An at-most-one relation
#[derive(Debug, Clone, Copy)]
pub struct SingleAssociation {
    pub name: &'static str,
    pub source: Source,
    pub create_key: &'static str,
    pub change: Change,
}

impl SingleAssociation {
    pub fn attribute(&self) -> Attribute {
        Attribute::new(self.name, AttributeKind::Id, Mode::Optional)
    }

    /// Endpoint whose add/remove body carries this relation, if any
    pub fn endpoint(&self) -> Option<&'static str> {
        match self.change {
            Change::Grouped { endpoint, .. } => Some(endpoint),
            Change::Move { .. } => None,
        }
    }
}

// ============================================================================
// Resource Kind
// ============================================================================

/// Listing for objects that only exist under a parent collection
///
/// Every id listed at `parents` is visited in order, and the children are
/// fetched from `{parents}/{parent}/{children}`.
#[derive(Debug, Clone, Copy)]
pub struct ListScope {
    pub parents: &'static str,
    pub children: &'static str,
}

impl ListScope {
    pub fn children_path(&self, parent: i64) -> String {
        format!("{}/{parent}/{}", self.parents, self.children)
    }
}

/// Everything needed to manage one kind of object
#[derive(Debug)]
pub struct ResourceKind {
    /// Type name without the `cloudtamerio_` prefix
    pub name: &'static str,
    /// Name used in diagnostic summaries, e.g. "CloudRule"
    pub label: &'static str,
    /// Collection path, e.g. `/v3/cloud-rule`
    pub path: &'static str,
    /// Collection used for DELETE when it differs from `path`
    pub delete_path: Option<&'static str>,
    /// Key of the object holding the scalar fields in a GET response;
    /// `None` when they sit directly under `data`
    pub envelope: Option<&'static str>,
    /// Boolean response field that marks the object as gone
    pub gone_flag: Option<&'static str>,
    /// Key wrapping each list item's scalars; `None` when items are flat
    pub list_envelope: Option<&'static str>,
    /// Key wrapping the scalars in the create body; `None` when flat
    pub create_envelope: Option<&'static str>,
    pub fields: &'static [Field],
    pub associations: &'static [Association],
    pub singles: &'static [SingleAssociation],
    /// Whether a list data source exists for this kind
    pub data_source: bool,
    /// Parent collection the list is fetched under; `None` lists `path`
    pub list_scope: Option<ListScope>,
}

impl ResourceKind {
    /// Full type name, e.g. `cloudtamerio_cloud_rule`
    pub fn type_name(&self) -> String {
        format!("{TYPE_PREFIX}{}", self.name)
    }

    pub fn item_path(&self, id: i64) -> String {
        format!("{}/{id}", self.path)
    }

    pub fn delete_item_path(&self, id: i64) -> String {
        format!("{}/{id}", self.delete_path.unwrap_or(self.path))
    }

    pub fn endpoint_path(&self, id: i64, endpoint: &str) -> String {
        format!("{}/{id}/{endpoint}", self.path)
    }

    /// Endpoints that take add/remove calls, in declaration order
    pub fn endpoints(&self) -> Vec<&'static str> {
        let mut endpoints = Vec::new();
        let all = self
            .associations
            .iter()
            .map(|a| a.endpoint)
            .chain(self.singles.iter().filter_map(SingleAssociation::endpoint));
        for endpoint in all {
            if !endpoints.contains(&endpoint) {
                endpoints.push(endpoint);
            }
        }
        endpoints
    }

    /// The resource schema: fields, relations, and bookkeeping attributes
    pub fn schema(&self) -> Schema {
        let mut attributes = vec![Attribute::new("id", AttributeKind::String, Mode::Computed)];
        attributes.extend(self.fields.iter().map(|f| f.attribute));
        attributes.extend(self.associations.iter().map(Association::attribute));
        attributes.extend(self.singles.iter().map(SingleAssociation::attribute));
        attributes.push(Attribute::new(
            "last_updated",
            AttributeKind::String,
            Mode::Computed,
        ));
        Schema::new(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_plan(value: &Value) -> Value {
        serde_json::json!({ "plan": value })
    }

    static FIELDS: &[Field] = &[
        Field::new("name", AttributeKind::String, Mode::Required),
        Field::new("project_id", AttributeKind::Int, Mode::Required).force_new(),
        Field::computed("created_at", AttributeKind::String),
        Field::new("plan", AttributeKind::ObjectList, Mode::Optional).patched_alone(FieldPatch {
            base: "/v1/widget",
            endpoint: "plan",
            encode: encode_plan,
        }),
    ];

    static ASSOCIATIONS: &[Association] = &[
        owner_users(),
        owner_user_groups(),
        Association::new("users", "users", "user_ids", "user").bare(),
    ];

    static SINGLES: &[SingleAssociation] = &[SingleAssociation {
        name: "boundary",
        source: Source::Object,
        create_key: "boundary",
        change: Change::Grouped {
            endpoint: "association",
            key: "boundary",
        },
    }];

    static KIND: ResourceKind = ResourceKind {
        name: "widget",
        label: "Widget",
        path: "/v3/widget",
        delete_path: Some("/v2/widget"),
        envelope: Some("widget"),
        gone_flag: None,
        list_envelope: None,
        create_envelope: None,
        fields: FIELDS,
        associations: ASSOCIATIONS,
        singles: SINGLES,
        data_source: false,
        list_scope: None,
    };

    #[test]
    fn test_field_flags() {
        let name = &FIELDS[0];
        assert!(name.create && name.update);

        let project = &FIELDS[1];
        assert!(project.create && !project.update);
        assert!(project.attribute.force_new);

        let created = &FIELDS[2];
        assert!(!created.create && !created.update);
        assert!(!created.is_updatable());

        let plan = &FIELDS[3];
        assert!(plan.create && !plan.update);
        assert!(plan.is_updatable());
        let patch = plan.own_patch.unwrap();
        assert_eq!((patch.encode)(&serde_json::json!([1])), serde_json::json!({"plan": [1]}));
    }

    #[test]
    fn test_list_scope_children_path() {
        let scope = ListScope {
            parents: "/v3/idms",
            children: "group-association",
        };
        assert_eq!(scope.children_path(2), "/v3/idms/2/group-association");
    }

    #[test]
    fn test_paths() {
        assert_eq!(KIND.type_name(), "cloudtamerio_widget");
        assert_eq!(KIND.item_path(4), "/v3/widget/4");
        assert_eq!(KIND.delete_item_path(4), "/v2/widget/4");
        assert_eq!(KIND.endpoint_path(4, "owner"), "/v3/widget/4/owner");
    }

    #[test]
    fn test_endpoints_deduplicated_in_order() {
        assert_eq!(KIND.endpoints(), vec!["owner", "user", "association"]);
    }

    #[test]
    fn test_schema_includes_relations() {
        let schema = KIND.schema();
        let names: Vec<_> = schema.attributes.iter().map(|a| a.name).collect();
        assert_eq!(
            names,
            vec![
                "id",
                "name",
                "project_id",
                "created_at",
                "plan",
                "owner_users",
                "owner_user_groups",
                "users",
                "boundary",
                "last_updated"
            ]
        );
        assert_eq!(schema.attribute("users").unwrap().kind, AttributeKind::IdList);
        assert_eq!(schema.attribute("boundary").unwrap().kind, AttributeKind::Id);
    }

    #[test]
    fn test_owner_helpers() {
        let users = owner_users();
        assert_eq!(users.create_key, "owner_user_ids");
        assert_eq!(users.wire, Wire::Key("owner_user_ids"));
        assert_eq!(owner_user_groups().endpoint, "owner");
    }
}
