//! Checklist item model.

use serde::{Deserialize, Serialize};

use crate::model::{ItemId, ProjectId};

/// A single checklist task, either template-seeded or user-added.
///
/// Invariant: `completed_date` is `Some` exactly when `is_completed` is
/// true. Only items with `is_custom` set may be deleted individually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Row id.
    pub id: ItemId,

    /// Owning project.
    pub project_id: ProjectId,

    /// Free-text category label, matched exactly (no canonicalization).
    pub category: String,

    /// Task description, trimmed, at most 200 characters.
    pub task: String,

    /// True for user-added items; template items are never custom.
    pub is_custom: bool,

    /// Completion flag.
    pub is_completed: bool,

    /// Optional free-text notes.
    pub notes: Option<String>,

    /// Optional due date, stored exactly as entered.
    pub due_date: Option<String>,

    /// Completion timestamp (Unix milliseconds), set while completed.
    pub completed_date: Option<i64>,

    /// Creation timestamp (Unix milliseconds).
    pub created_at: i64,
}

impl ChecklistItem {
    /// Human-readable completion label used in flat exports.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.is_completed { "Completed" } else { "Pending" }
    }
}
