//! Storage targets for notes.
//!
//! Layout:
//! - `registry.rs`: startup scan of `note.<i>.*` declarations into an immutable registry
//! - `postgis.rs`: the PostgreSQL/PostGIS implementation of [`NoteStore`]
//! - `table.rs` / `connection.rs`: validated table identifiers and connection URLs

mod connection;
mod postgis;
mod registry;
mod table;

pub use connection::ConnectionUrl;
pub use postgis::PostgisStore;
pub use registry::{BackendRegistry, BackendSpec};
pub use table::TableName;

use crate::error::StorageError;
use crate::note::Note;
use async_trait::async_trait;
use mapnotes_schema::BackendDescription;
use std::{fmt, sync::Arc};

/// Capability shared by every kind of note storage.
#[async_trait]
pub trait NoteStore: Send + Sync + fmt::Debug {
    /// Durably write one note: exactly one new record on success, none on failure.
    async fn store(&self, note: &Note) -> Result<(), StorageError>;

    /// Release held resources. Called once at process shutdown.
    async fn close(&self) {}
}

/// A named, independently configured storage target.
#[derive(Debug, Clone)]
pub struct Backend {
    id: String,
    table: TableName,
    srid: i32,
    store: Arc<dyn NoteStore>,
}

impl Backend {
    pub fn new(
        id: impl Into<String>,
        table: TableName,
        srid: i32,
        store: Arc<dyn NoteStore>,
    ) -> Self {
        Self {
            id: id.into(),
            table,
            srid,
            store,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn table(&self) -> &TableName {
        &self.table
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub async fn store(&self, note: &Note) -> Result<(), StorageError> {
        self.store.store(note).await
    }

    pub(crate) async fn close(&self) {
        self.store.close().await
    }

    /// Read-only projection served to clients for discovery.
    pub fn describe(&self) -> BackendDescription {
        BackendDescription {
            id: self.id.clone(),
            srid: self.srid,
            description: self.to_string(),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NoteBackend{{id='{}', table='{}', srid='{}'}}",
            self.id, self.table, self.srid
        )
    }
}
