//! Wire models shared by every resource kind.

use serde::{Deserialize, Serialize};

/// Response to a POST: the id of the created record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creation {
    /// Created record id; 0 when nothing was created.
    #[serde(default)]
    pub record_id: i64,
    /// Status echoed by the server.
    #[serde(default)]
    pub status: i64,
}

/// A reference to a related object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectWithId {
    /// Object id.
    pub id: i64,
}

impl From<i64> for ObjectWithId {
    fn from(id: i64) -> Self {
        Self { id }
    }
}

/// Body for the `/owner` add and remove endpoints.
///
/// Both fields are always serialized; an untouched side is sent as an
/// empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeOwners {
    /// Owning user groups.
    pub owner_user_group_ids: Vec<i64>,
    /// Owning users.
    pub owner_user_ids: Vec<i64>,
}

impl ChangeOwners {
    /// True when neither side carries an id.
    pub fn is_empty(&self) -> bool {
        self.owner_user_group_ids.is_empty() && self.owner_user_ids.is_empty()
    }
}

/// The `{ "data": ..., "status": ... }` envelope every GET response uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Payload.
    pub data: T,
    /// Status echoed by the server.
    #[serde(default)]
    pub status: i64,
}

/// Extract the ids of a list of related objects.
pub fn ids(objects: &[ObjectWithId]) -> Vec<i64> {
    objects.iter().map(|o| o.id).collect()
}
