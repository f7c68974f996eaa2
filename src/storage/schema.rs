//! Database schema definition and bootstrap.
//!
//! The schema is fixed and bootstrapped idempotently: every statement uses
//! `IF NOT EXISTS`, and [`apply_schema`] runs on each connection open so
//! per-connection pragmas (foreign keys in particular) are always set.

use rusqlite::{Connection, Result};

/// The complete SQL schema for the checklist database.
///
/// Note: Timestamps are stored as INTEGER (Unix milliseconds). `due_date`
/// is free-form TEXT exactly as entered at the UI surface.
pub const SCHEMA_SQL: &str = r"
-- ====================
-- Core Tables
-- ====================

-- Users: account registry
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

-- Projects: one production per row, owned by a user
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    description TEXT,
    created_at INTEGER NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    UNIQUE(user_id, name)
);

CREATE INDEX IF NOT EXISTS idx_projects_user_id ON projects(user_id);

-- Checklist items: template-seeded and custom tasks
CREATE TABLE IF NOT EXISTS checklist_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL,
    category TEXT NOT NULL,
    task TEXT NOT NULL,
    is_custom INTEGER NOT NULL DEFAULT 0,
    is_completed INTEGER NOT NULL DEFAULT 0,
    notes TEXT,
    due_date TEXT,
    completed_date INTEGER,
    created_at INTEGER NOT NULL,
    FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_items_project_id ON checklist_items(project_id);
CREATE INDEX IF NOT EXISTS idx_items_category ON checklist_items(category);
CREATE INDEX IF NOT EXISTS idx_items_completed ON checklist_items(is_completed);
";

/// Apply pragmas and the schema to a connection.
///
/// This uses `execute_batch` to run the entire DDL script. It is
/// idempotent because all statements use `IF NOT EXISTS`. Must run on
/// every open: `foreign_keys` is per-connection and cascade deletes
/// depend on it.
///
/// # Errors
///
/// Returns an error if the SQL execution fails or pragmas cannot be set.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;

    conn.execute_batch(SCHEMA_SQL)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_schema() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).expect("Failed to apply schema");

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();

        assert!(tables.contains(&"users".to_string()));
        assert!(tables.contains(&"projects".to_string()));
        assert!(tables.contains(&"checklist_items".to_string()));

        let indexes: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='index' AND name LIKE 'idx_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();

        assert_eq!(indexes.len(), 4);
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        apply_schema(&conn).expect("First apply failed");
        apply_schema(&conn).expect("Second apply failed");
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
    }

    #[test]
    fn test_email_unique_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO users (email, password_hash, created_at) VALUES ('a@b.com', 'h', 0)",
            [],
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO users (email, password_hash, created_at) VALUES ('a@b.com', 'h2', 0)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_project_name_unique_per_user() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO users (id, email, password_hash, created_at) VALUES (1, 'a@b.com', 'h', 0)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO users (id, email, password_hash, created_at) VALUES (2, 'c@d.com', 'h', 0)",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO projects (user_id, name, created_at) VALUES (1, 'Fall Play', 0)",
            [],
        )
        .unwrap();

        // Same name for the same user is rejected
        let result = conn.execute(
            "INSERT INTO projects (user_id, name, created_at) VALUES (1, 'Fall Play', 0)",
            [],
        );
        assert!(result.is_err());

        // Same name for a different user is fine
        conn.execute(
            "INSERT INTO projects (user_id, name, created_at) VALUES (2, 'Fall Play', 0)",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_cascade_delete_user_removes_projects_and_items() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO users (id, email, password_hash, created_at) VALUES (1, 'a@b.com', 'h', 0)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO projects (id, user_id, name, created_at) VALUES (10, 1, 'Fall Play', 0)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO checklist_items (project_id, category, task, created_at)
             VALUES (10, 'Lighting', 'Program cues', 0)",
            [],
        )
        .unwrap();

        conn.execute("DELETE FROM users WHERE id = 1", []).unwrap();

        let projects: i64 = conn
            .query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))
            .unwrap();
        let items: i64 = conn
            .query_row("SELECT COUNT(*) FROM checklist_items", [], |row| row.get(0))
            .unwrap();
        assert_eq!(projects, 0);
        assert_eq!(items, 0);
    }
}
