pub mod backend;
pub mod config;
pub mod error;
pub mod note;
pub mod server;

pub use backend::{Backend, BackendRegistry, NoteStore};
pub use error::{ConfigError, NoteError, StorageError};
pub use note::Note;
