//! Data models for the checklist application.
//!
//! This module contains all domain models:
//! - User
//! - Project
//! - ChecklistItem
//! - ProjectStats (with its category/trend components)

pub mod item;
pub mod project;
pub mod stats;
pub mod user;

pub use item::ChecklistItem;
pub use project::Project;
pub use stats::{CategoryStats, ProjectStats, TrendPoint};
pub use user::User;

/// Row id of a registered user.
pub type UserId = i64;

/// Row id of a production project.
pub type ProjectId = i64;

/// Row id of a checklist item.
pub type ItemId = i64;
