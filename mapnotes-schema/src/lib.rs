pub mod discovery;
pub mod store;

pub use discovery::{BackendDescription, BackendList};
pub use store::{StoreNoteForm, StoreResponse};
