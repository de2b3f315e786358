//! # Quill Infrastructure
//!
//! Concrete implementations of the store ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL stores via SeaORM
//!
//! Without `postgres` only the in-memory stores are available.

pub mod database;
pub mod stores;

// Re-exports - In-Memory
pub use stores::{MemoryPostStore, MemoryUserStore};

// Re-exports - PostgreSQL
pub use database::DatabaseConfig;
#[cfg(feature = "postgres")]
pub use database::{PgPostStore, PgUserStore, connect};
