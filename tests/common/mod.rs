#![allow(dead_code)]

use async_trait::async_trait;
use mapnotes::backend::{Backend, BackendRegistry, TableName};
use mapnotes::{Note, NoteStore, StorageError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory [`NoteStore`] recording every note it is handed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: Mutex<Vec<Note>>,
    calls: AtomicUsize,
    fail: bool,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store whose every attempt fails like an exhausted pool.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Default::default()
        })
    }

    pub fn notes(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn store(&self, note: &Note) -> Result<(), StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StorageError::from(sqlx::Error::PoolTimedOut));
        }
        self.notes.lock().unwrap().push(note.clone());
        Ok(())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

pub fn memory_backend(id: &str, table: &str, srid: i32, store: Arc<MemoryStore>) -> Backend {
    Backend::new(
        id,
        TableName::parse(table).expect("valid table name"),
        srid,
        store,
    )
}

pub fn single_backend_registry(store: Arc<MemoryStore>) -> BackendRegistry {
    BackendRegistry::from_backends([memory_backend(
        "default",
        "georchestra.notes",
        4326,
        store,
    )])
}
