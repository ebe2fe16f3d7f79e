mod config;
mod note;
mod storage;

pub use config::ConfigError;
pub use note::NoteError;
pub use storage::StorageError;
