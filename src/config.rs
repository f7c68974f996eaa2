//! Store location configuration.
//!
//! The store is a single SQLite file. Its default location is fixed:
//! existing installations keep working because the filename never
//! changes.

use std::path::{Path, PathBuf};

/// Fixed default store filename, resolved against the process working
/// directory.
pub const DEFAULT_DB_NAME: &str = "theatre_checklists.db";

/// Environment variable overriding the full store path.
pub const DB_PATH_ENV: &str = "CALLBOARD_DB";

/// Resolve the store path.
///
/// Priority:
/// 1. Explicit path from the application assembly
/// 2. `CALLBOARD_DB` environment variable
/// 3. [`DEFAULT_DB_NAME`] in the working directory
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit_path {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    PathBuf::from(DEFAULT_DB_NAME)
}
