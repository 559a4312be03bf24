//! # trigger-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! The device collection is a single `iot_devices` table with one row per
//! document. Telemetry and schedule logs live in JSON array columns and are
//! appended with single `UPDATE … RETURNING` statements, so dependent writes
//! never race.
//!
//! ## Responsibilities
//! - Implement the repository port trait defined in `trigger-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `trigger-app` (for port traits) and `trigger-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod device_record_repo;
pub mod error;
pub mod pool;

pub use device_record_repo::SqliteDeviceRecordRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
