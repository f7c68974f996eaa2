//! Project repository: production CRUD and template seeding.
//!
//! Every operation takes the acting user's id and scopes its SQL to it,
//! so one user can never read or touch another user's productions.

use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{Project, ProjectId, UserId};
use crate::storage::Database;
use crate::template::DEFAULT_TEMPLATE;

/// Maximum project name length, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Repository for production projects, bound to one store.
#[derive(Clone)]
pub struct ProjectRepository {
    db: Database,
}

impl ProjectRepository {
    /// Create a repository over the given store handle.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a project and seed the default checklist into it.
    ///
    /// Name and description are trimmed before validation and storage.
    ///
    /// # Errors
    ///
    /// `EmptyName` on a blank trimmed name, `NameTooLong` over 100
    /// characters, `DuplicateName` when this user already has a project
    /// with the same trimmed name, or a storage failure.
    pub fn create(&self, user_id: UserId, name: &str, description: &str) -> Result<ProjectId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(Error::NameTooLong {
                max: MAX_NAME_CHARS,
            });
        }

        let duplicate = self.db.query_row_opt(
            "SELECT id FROM projects WHERE user_id = ?1 AND name = ?2",
            rusqlite::params![user_id, name],
            |row| row.get::<_, i64>(0),
        )?;
        if duplicate.is_some() {
            return Err(Error::DuplicateName);
        }

        let now = chrono::Utc::now().timestamp_millis();
        let project_id = self.db.insert(
            "INSERT INTO projects (user_id, name, description, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![user_id, name, description.trim(), now],
        )?;

        self.seed_template(project_id);

        Ok(project_id)
    }

    /// Insert the default checklist. Individual row failures are logged
    /// and skipped so one bad insert never loses the new project.
    fn seed_template(&self, project_id: ProjectId) {
        let now = chrono::Utc::now().timestamp_millis();
        for (category, tasks) in DEFAULT_TEMPLATE {
            for task in *tasks {
                let inserted = self.db.execute(
                    "INSERT INTO checklist_items
                     (project_id, category, task, is_custom, is_completed, created_at)
                     VALUES (?1, ?2, ?3, 0, 0, ?4)",
                    rusqlite::params![project_id, category, task, now],
                );
                if let Err(err) = inserted {
                    warn!(
                        project_id,
                        category = %category,
                        task = %task,
                        error = %err,
                        "skipping default checklist item"
                    );
                }
            }
        }
    }

    /// List the user's projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    pub fn list(&self, user_id: UserId) -> Result<Vec<Project>> {
        self.db.query_rows(
            "SELECT id, user_id, name, description, created_at
             FROM projects WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC",
            rusqlite::params![user_id],
            project_from_row,
        )
    }

    /// Fetch one project. Someone else's project reads as absent.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    pub fn get(&self, project_id: ProjectId, user_id: UserId) -> Result<Option<Project>> {
        self.db.query_row_opt(
            "SELECT id, user_id, name, description, created_at
             FROM projects WHERE id = ?1 AND user_id = ?2",
            rusqlite::params![project_id, user_id],
            project_from_row,
        )
    }

    /// Update name and description. Zero rows affected (missing or
    /// foreign project) is still success.
    ///
    /// # Errors
    ///
    /// `EmptyName` on a blank trimmed name, or a storage failure. An
    /// update that collides with another project's name surfaces as a
    /// storage failure from the uniqueness constraint.
    pub fn update(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        name: &str,
        description: &str,
    ) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        self.db.execute(
            "UPDATE projects SET name = ?1, description = ?2 WHERE id = ?3 AND user_id = ?4",
            rusqlite::params![name, description.trim(), project_id, user_id],
        )?;
        Ok(())
    }

    /// Delete a project and, via cascade, all of its checklist items.
    ///
    /// # Errors
    ///
    /// `ProjectNotFound` when the project does not exist or belongs to
    /// another user, or a storage failure.
    pub fn delete(&self, project_id: ProjectId, user_id: UserId) -> Result<()> {
        let owned = self.db.query_row_opt(
            "SELECT id FROM projects WHERE id = ?1 AND user_id = ?2",
            rusqlite::params![project_id, user_id],
            |row| row.get::<_, i64>(0),
        )?;
        if owned.is_none() {
            return Err(Error::ProjectNotFound);
        }

        self.db.execute(
            "DELETE FROM projects WHERE id = ?1",
            rusqlite::params![project_id],
        )?;
        Ok(())
    }
}

fn project_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
    })
}
