//! Export record types and errors.
//!
//! [`ExportDocument`] is the structured JSON form; [`TaskRecord`] is one
//! task in either format. The flat CSV form carries a subset of the
//! record (no custom flag, no due date), so CSV imports mark rows custom
//! and leave the due date unset.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::model::ChecklistItem;

/// Export formats the application offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Flat, spreadsheet-friendly format.
    Csv,
    /// Structured document format, suitable for re-import.
    Json,
}

impl ExportFormat {
    /// File extension for the format, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {s}")),
        }
    }
}

/// One task in an export file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Category label as stored.
    pub category: String,
    /// Task description.
    pub task: String,
    /// Whether the task was user-added rather than template-seeded.
    pub is_custom: bool,
    /// Completion flag.
    pub is_completed: bool,
    /// Free-form notes, if any.
    pub notes: Option<String>,
    /// Due date as entered, if any.
    pub due_date: Option<String>,
    /// Completion time in RFC 3339 form (UTC), present iff completed.
    pub completed_date: Option<String>,
}

impl TaskRecord {
    /// Build the wire record for one stored item.
    #[must_use]
    pub fn from_item(item: &ChecklistItem) -> Self {
        Self {
            category: item.category.clone(),
            task: item.task.clone(),
            is_custom: item.is_custom,
            is_completed: item.is_completed,
            notes: item.notes.clone(),
            due_date: item.due_date.clone(),
            completed_date: item.completed_date.map(format_timestamp),
        }
    }
}

/// Structured JSON export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    /// RFC 3339 timestamp of the export.
    pub export_date: String,
    /// Number of tasks in the document.
    pub total_tasks: usize,
    /// Number of completed tasks in the document.
    pub completed_tasks: usize,
    /// The tasks, in listing order.
    pub tasks: Vec<TaskRecord>,
}

/// Render a stored millisecond timestamp as RFC 3339 (UTC).
#[must_use]
pub fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map_or_else(String::new, |dt| dt.to_rfc3339())
}

/// Parse an RFC 3339 timestamp back to stored millisecond form.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.timestamp_millis())
}

/// Export/import specific errors.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Underlying store error.
    #[error("{0}")]
    Storage(#[from] crate::error::Error),

    /// Malformed row in a flat file.
    #[error("Invalid record at line {line}: {message}")]
    InvalidRecord {
        /// Line number (1-indexed).
        line: usize,
        /// Error message.
        message: String,
    },
}

/// Result type for export operations.
pub type ExportResult<T> = std::result::Result<T, ExportError>;
