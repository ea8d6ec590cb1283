// TodoStore - task list persistence over an in-memory SQLite image synced to a byte store

pub mod bytestore;
pub mod engine;
pub mod error;
pub mod models;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use bytestore::{ByteStore, FileByteStore, MemoryByteStore};
pub use engine::Engine;
pub use error::{StoreError, StoreResult};
pub use models::{Task, now_ms};
pub use store::{DB_KEY, TodoStore};

// Re-export rusqlite for callers that need raw access
pub use rusqlite;
