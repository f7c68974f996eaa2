//! Project export to CSV and JSON.
//!
//! Both formats list tasks in the order the checklist view shows them
//! (category, then creation). CSV is the flat spreadsheet form; JSON is
//! a structured document that can be re-imported.

use std::path::Path;

use chrono::Utc;

use crate::checklist::ChecklistRepository;
use crate::export::file::{atomic_write, csv_escape};
use crate::export::types::{ExportDocument, ExportResult, TaskRecord, format_timestamp};
use crate::model::{ChecklistItem, ProjectId};
use crate::storage::Database;

/// Column header for the flat format.
pub const CSV_HEADER: &str = "Category,Task,Status,Completed_Date,Notes";

/// Writes project checklists to export files.
pub struct Exporter {
    db: Database,
}

impl Exporter {
    /// Create an exporter over the given store handle.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Export a project's tasks as CSV, returning the number of tasks
    /// written. An empty or unknown project produces a header-only file.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read or the file write fails.
    pub fn export_csv(&self, project_id: ProjectId, path: &Path) -> ExportResult<usize> {
        let items = self.project_items(project_id)?;

        let mut content = String::from(CSV_HEADER);
        content.push('\n');
        for item in &items {
            let completed = item.completed_date.map(format_timestamp).unwrap_or_default();
            let fields = [
                item.category.as_str(),
                item.task.as_str(),
                item.status_label(),
                completed.as_str(),
                item.notes.as_deref().unwrap_or_default(),
            ]
            .map(csv_escape);
            content.push_str(&fields.join(","));
            content.push('\n');
        }

        atomic_write(path, &content)?;
        Ok(items.len())
    }

    /// Export a project's tasks as a pretty-printed JSON document,
    /// returning the number of tasks written.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read, serialization, or the file
    /// write fails.
    pub fn export_json(&self, project_id: ProjectId, path: &Path) -> ExportResult<usize> {
        let items = self.project_items(project_id)?;
        let tasks: Vec<TaskRecord> = items.iter().map(TaskRecord::from_item).collect();
        let completed_tasks = tasks.iter().filter(|task| task.is_completed).count();

        let document = ExportDocument {
            export_date: Utc::now().to_rfc3339(),
            total_tasks: tasks.len(),
            completed_tasks,
            tasks,
        };

        atomic_write(path, &serde_json::to_string_pretty(&document)?)?;
        Ok(document.total_tasks)
    }

    fn project_items(&self, project_id: ProjectId) -> ExportResult<Vec<ChecklistItem>> {
        let items = ChecklistRepository::new(self.db.clone()).list_items(project_id, None)?;
        Ok(items)
    }
}
