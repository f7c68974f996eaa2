//! Production project model.

use serde::{Deserialize, Serialize};

use crate::model::{ProjectId, UserId};

/// A production (show) owned by a user.
///
/// Name is unique per owner. Every project starts with the default
/// checklist template seeded into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Row id.
    pub id: ProjectId,

    /// Owning user.
    pub user_id: UserId,

    /// Display name, trimmed, at most 100 characters.
    pub name: String,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Creation timestamp (Unix milliseconds).
    pub created_at: i64,
}
