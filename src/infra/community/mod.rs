// Infra community module - PostStore implementations.

pub mod in_memory;
pub mod sqlite_store;

pub use in_memory::InMemoryPostStore;
pub use sqlite_store::SqlitePostStore;
