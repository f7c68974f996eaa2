//! Error types for callboard operations.
//!
//! Every fallible repository/service operation returns [`Result`]. The
//! variants form a closed set: callers branch on the variant, never on the
//! display text. Display strings are the human-readable rendering an
//! interactive shell shows verbatim.

use thiserror::Error;

/// Result type alias for callboard operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by identity, project, and checklist operations.
#[derive(Error, Debug)]
pub enum Error {
    // Identity
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least 6 characters")]
    WeakPassword,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    // Projects
    #[error("Project name cannot be empty")]
    EmptyName,

    #[error("Project name too long (max {max} characters)")]
    NameTooLong { max: usize },

    #[error("You already have a project with this name")]
    DuplicateName,

    #[error("Project not found")]
    ProjectNotFound,

    // Checklist items
    #[error("Category is required")]
    EmptyCategory,

    #[error("Task description is required")]
    EmptyTask,

    #[error("Task description too long (max {max} characters)")]
    TaskTooLong { max: usize },

    // Storage tier
    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl Error {
    /// Whether this is a validation failure the user can correct by
    /// changing their input, as opposed to a missing row or a
    /// storage-tier failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::ProjectNotFound)
    }
}
