//! # geostore-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `geostore-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Enforce point coordinate uniqueness through the schema
//!
//! ## Dependency rule
//! Depends on `geostore-app` (for port traits) and `geostore-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod filter;
mod point_repo;
mod polygon_repo;
mod pool;

pub use error::StorageError;
pub use point_repo::SqlitePointRepository;
pub use polygon_repo::SqlitePolygonRepository;
pub use pool::{Config, Database};
