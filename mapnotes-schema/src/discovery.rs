use serde::{Deserialize, Serialize};

/// Payload of `GET /note/backends`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct BackendList {
    pub backends: Vec<BackendDescription>,
}

/// Client-facing projection of one configured backend.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct BackendDescription {
    /// Identifier used to build the store URL (`/note/backend/{id}`).
    pub id: String,
    /// Coordinate reference system the client must submit points in.
    pub srid: i32,
    pub description: String,
}

impl FromIterator<BackendDescription> for BackendList {
    fn from_iter<I: IntoIterator<Item = BackendDescription>>(iter: I) -> Self {
        Self {
            backends: iter.into_iter().collect(),
        }
    }
}
