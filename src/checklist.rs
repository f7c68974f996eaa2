//! Checklist repository: item listing, custom items, completion, notes.
//!
//! Items belong to exactly one project and every mutation is scoped by
//! both item and project id, so a stale or hostile item id can never
//! reach across projects. Category labels are matched exactly as stored;
//! there is no case or whitespace canonicalization.

use chrono::Utc;

use crate::error::{Error, Result};
use crate::model::{ChecklistItem, ItemId, ProjectId};
use crate::storage::Database;

/// Maximum task description length, in characters.
pub const MAX_TASK_CHARS: usize = 200;

/// Category filter value meaning "no filter".
pub const ALL_CATEGORIES: &str = "All";

/// Repository for checklist items, bound to one store.
#[derive(Clone)]
pub struct ChecklistRepository {
    db: Database,
}

impl ChecklistRepository {
    /// Create a repository over the given store handle.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List a project's items, ordered by category then creation.
    ///
    /// `category` narrows the listing unless it is `None` or the literal
    /// `"All"`. An unknown project or category yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    pub fn list_items(
        &self,
        project_id: ProjectId,
        category: Option<&str>,
    ) -> Result<Vec<ChecklistItem>> {
        let base = "SELECT id, project_id, category, task, is_custom, is_completed,
                           notes, due_date, completed_date, created_at
                    FROM checklist_items WHERE project_id = ?1";
        let order = " ORDER BY category, created_at, id";

        match category.filter(|c| *c != ALL_CATEGORIES) {
            Some(category) => self.db.query_rows(
                &format!("{base} AND category = ?2{order}"),
                rusqlite::params![project_id, category],
                item_from_row,
            ),
            None => self.db.query_rows(
                &format!("{base}{order}"),
                rusqlite::params![project_id],
                item_from_row,
            ),
        }
    }

    /// Distinct categories present in a project, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    pub fn list_categories(&self, project_id: ProjectId) -> Result<Vec<String>> {
        self.db.query_rows(
            "SELECT DISTINCT category FROM checklist_items
             WHERE project_id = ?1 ORDER BY category",
            rusqlite::params![project_id],
            |row| row.get(0),
        )
    }

    /// Add a user-defined item. Category and task are trimmed; the due
    /// date is stored exactly as given.
    ///
    /// # Errors
    ///
    /// `EmptyCategory` / `EmptyTask` on blank trimmed input,
    /// `TaskTooLong` over 200 characters, or a storage failure.
    pub fn add_custom_item(
        &self,
        project_id: ProjectId,
        category: &str,
        task: &str,
        due_date: Option<&str>,
    ) -> Result<ItemId> {
        let category = category.trim();
        let task = task.trim();

        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }
        if task.is_empty() {
            return Err(Error::EmptyTask);
        }
        if task.chars().count() > MAX_TASK_CHARS {
            return Err(Error::TaskTooLong {
                max: MAX_TASK_CHARS,
            });
        }

        let now = Utc::now().timestamp_millis();
        self.db.insert(
            "INSERT INTO checklist_items
             (project_id, category, task, is_custom, is_completed, due_date, created_at)
             VALUES (?1, ?2, ?3, 1, 0, ?4, ?5)",
            rusqlite::params![project_id, category, task, due_date, now],
        )
    }

    /// Set or clear the completion flag, stamping or clearing the
    /// completion time with it. Zero rows affected is still success.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    pub fn set_completion(
        &self,
        item_id: ItemId,
        project_id: ProjectId,
        completed: bool,
    ) -> Result<()> {
        let completed_date = completed.then(|| Utc::now().timestamp_millis());

        self.db.execute(
            "UPDATE checklist_items SET is_completed = ?1, completed_date = ?2
             WHERE id = ?3 AND project_id = ?4",
            rusqlite::params![completed, completed_date, item_id, project_id],
        )?;
        Ok(())
    }

    /// Replace an item's notes with the text as given (empty allowed).
    /// Zero rows affected is still success.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    pub fn set_notes(&self, item_id: ItemId, project_id: ProjectId, notes: &str) -> Result<()> {
        self.db.execute(
            "UPDATE checklist_items SET notes = ?1 WHERE id = ?2 AND project_id = ?3",
            rusqlite::params![notes, item_id, project_id],
        )?;
        Ok(())
    }

    /// Delete a custom item. Template items and unknown ids are silent
    /// no-ops: only rows with `is_custom` set ever match.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    pub fn delete_custom_item(&self, item_id: ItemId, project_id: ProjectId) -> Result<()> {
        self.db.execute(
            "DELETE FROM checklist_items
             WHERE id = ?1 AND project_id = ?2 AND is_custom = 1",
            rusqlite::params![item_id, project_id],
        )?;
        Ok(())
    }

    /// Total items in a project.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    pub fn item_count(&self, project_id: ProjectId) -> Result<i64> {
        let count = self.db.query_row_opt(
            "SELECT COUNT(*) FROM checklist_items WHERE project_id = ?1",
            rusqlite::params![project_id],
            |row| row.get(0),
        )?;
        Ok(count.unwrap_or(0))
    }
}

fn item_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChecklistItem> {
    Ok(ChecklistItem {
        id: row.get(0)?,
        project_id: row.get(1)?,
        category: row.get(2)?,
        task: row.get(3)?,
        is_custom: row.get(4)?,
        is_completed: row.get(5)?,
        notes: row.get(6)?,
        due_date: row.get(7)?,
        completed_date: row.get(8)?,
        created_at: row.get(9)?,
    })
}
