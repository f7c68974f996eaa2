//! Checklist and progress tracking core for theatre productions.
//!
//! This crate is the data layer of the application: accounts, projects
//! seeded from a standard production template, per-project checklists,
//! progress statistics, and file export/import. The UI in front of it
//! holds no state beyond the current user and project.
//!
//! # Architecture
//!
//! - [`auth`] - Account registration and login
//! - [`projects`] - Project lifecycle and template seeding
//! - [`checklist`] - Checklist items, completion, notes
//! - [`stats`] - Progress roll-ups and completion trends
//! - [`export`] - CSV/JSON export and import
//! - [`template`] - The standard production checklist
//! - [`model`] - Data types (User, Project, ChecklistItem, stats shapes)
//! - [`storage`] - SQLite store handle and schema
//! - [`config`] - Store location resolution
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod checklist;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod projects;
pub mod stats;
pub mod storage;
pub mod template;

pub use auth::{AuthService, CurrentUser};
pub use checklist::ChecklistRepository;
pub use error::{Error, Result};
pub use export::{Exporter, Importer};
pub use model::{CategoryStats, ChecklistItem, Project, ProjectStats, TrendPoint, User};
pub use projects::ProjectRepository;
pub use stats::StatsEngine;
pub use storage::Database;
