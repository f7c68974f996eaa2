//! Import of previously exported checklists.
//!
//! JSON imports restore every field the document carries. The flat CSV
//! form has no custom flag or due date, so those rows come back as
//! custom items with the due date unset. Imports append to the target
//! project; existing items are never touched.

use std::fs;
use std::path::Path;

use chrono::Utc;

use crate::export::file::{csv_records, parse_csv_line};
use crate::export::types::{ExportDocument, ExportError, ExportResult, TaskRecord, parse_timestamp};
use crate::model::ProjectId;
use crate::storage::Database;

/// Fields per record in the flat format.
const CSV_COLUMNS: usize = 5;

/// Reads export files back into a project.
pub struct Importer {
    db: Database,
}

impl Importer {
    /// Create an importer over the given store handle.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Append the tasks of a JSON export document to a project,
    /// returning the number of tasks imported.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a valid
    /// document, or a store write fails. Tasks inserted before a failed
    /// write stay imported.
    pub fn import_json(&self, project_id: ProjectId, path: &Path) -> ExportResult<usize> {
        let document: ExportDocument = serde_json::from_str(&fs::read_to_string(path)?)?;
        let now = Utc::now().timestamp_millis();

        for task in &document.tasks {
            self.insert_task(project_id, task, now)?;
        }
        Ok(document.tasks.len())
    }

    /// Append the rows of a CSV export to a project as custom items,
    /// returning the number of rows imported. The first record is taken
    /// as the header.
    ///
    /// # Errors
    ///
    /// `InvalidRecord` names the 1-based starting line of a row with the
    /// wrong field count; IO and store errors pass through. Rows
    /// inserted before a failure stay imported.
    pub fn import_csv(&self, project_id: ProjectId, path: &Path) -> ExportResult<usize> {
        let content = fs::read_to_string(path)?;
        let now = Utc::now().timestamp_millis();
        let mut imported = 0;

        for (line, record) in csv_records(&content).into_iter().skip(1) {
            let fields = parse_csv_line(&record);
            if fields.len() != CSV_COLUMNS {
                return Err(ExportError::InvalidRecord {
                    line,
                    message: format!("expected {CSV_COLUMNS} fields, found {}", fields.len()),
                });
            }

            let task = TaskRecord {
                category: fields[0].clone(),
                task: fields[1].clone(),
                is_custom: true,
                is_completed: fields[2] == "Completed",
                notes: (!fields[4].is_empty()).then(|| fields[4].clone()),
                due_date: None,
                completed_date: (!fields[3].is_empty()).then(|| fields[3].clone()),
            };
            self.insert_task(project_id, &task, now)?;
            imported += 1;
        }
        Ok(imported)
    }

    /// Insert one record, re-deriving the completion timestamp so that
    /// completed items always carry a date and pending items never do,
    /// even for hand-edited files.
    fn insert_task(&self, project_id: ProjectId, task: &TaskRecord, now: i64) -> ExportResult<()> {
        let completed_date = task.is_completed.then(|| {
            task.completed_date
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or(now)
        });

        self.db.insert(
            "INSERT INTO checklist_items
             (project_id, category, task, is_custom, is_completed, notes, due_date,
              completed_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                project_id,
                task.category,
                task.task,
                task.is_custom,
                task.is_completed,
                task.notes,
                task.due_date,
                completed_date,
                now
            ],
        )?;
        Ok(())
    }
}
