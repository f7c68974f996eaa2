//! SQLite storage layer.
//!
//! Persistence for the checklist application:
//! - WAL mode with per-connection pragmas
//! - Idempotent schema bootstrap on every open
//! - One shared connection per store, retried once on lock errors
//!
//! # Submodules
//!
//! - [`schema`] - Database schema definition and bootstrap
//! - [`sqlite`] - The shared [`sqlite::Database`] handle

pub mod schema;
pub mod sqlite;

pub use sqlite::Database;
