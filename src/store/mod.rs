pub mod backend;
pub mod keys;
pub mod local;
pub mod upsert;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use keys::StorageKey;
pub use local::LocalStore;
pub use upsert::{upsert_by, Touch, Upsert};
