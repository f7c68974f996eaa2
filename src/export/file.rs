//! File operations for exports.
//!
//! Writes go through a temp file with fsync and an atomic rename, so an
//! interrupted export never leaves a half-written file at the target
//! path. The flat-format helpers live here too: minimal CSV quoting and
//! a quote-aware reader.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::export::types::{ExportFormat, ExportResult};

/// Directory export files are placed under, relative to the working
/// directory.
pub const EXPORTS_DIR: &str = "exports";

/// Write content to a file atomically.
///
/// The content lands in a sibling `.tmp` file first, is fsynced, and is
/// then renamed over the target path. If any step fails, the original
/// file (if any) remains untouched.
///
/// # Errors
///
/// Returns an error if any file operation fails.
pub fn atomic_write(path: &Path, content: &str) -> ExportResult<()> {
    let temp_path = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => path.with_extension(format!("{ext}.tmp")),
        None => path.with_extension("tmp"),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        // Sync to disk before rename
        writer.get_ref().sync_all()?;
    }

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Create the exports directory if needed and return its path.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_export_dir() -> ExportResult<PathBuf> {
    let dir = PathBuf::from(EXPORTS_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Derived file name for a project export: the sanitized project name,
/// a local-time stamp, and the format extension.
///
/// Sanitizing keeps alphanumerics, spaces, hyphens, and underscores,
/// strips trailing whitespace, then turns spaces into underscores.
#[must_use]
pub fn export_file_name(project_name: &str, format: ExportFormat) -> String {
    let safe: String = project_name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let safe = safe.trim_end().replace(' ', "_");
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    format!("{safe}_{stamp}.{}", format.extension())
}

/// Full path for a new export file under [`EXPORTS_DIR`].
#[must_use]
pub fn export_path(project_name: &str, format: ExportFormat) -> PathBuf {
    Path::new(EXPORTS_DIR).join(export_file_name(project_name, format))
}

/// Quote a CSV field when it contains a comma, quote, or line break,
/// doubling embedded quotes.
#[must_use]
pub fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split one CSV record into fields, honoring quoting and doubled-quote
/// escapes.
#[must_use]
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }
    fields.push(field);
    fields
}

/// Group file content into CSV records paired with their 1-based
/// starting line numbers.
///
/// A record spans multiple physical lines while a quoted field is still
/// open (an odd number of quotes seen so far); blank lines between
/// records are skipped.
#[must_use]
pub fn csv_records(content: &str) -> Vec<(usize, String)> {
    let mut records = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, line) in content.lines().enumerate() {
        let (start, record) = match pending.take() {
            Some((start, mut acc)) => {
                acc.push('\n');
                acc.push_str(line);
                (start, acc)
            }
            None => {
                if line.trim().is_empty() {
                    continue;
                }
                (idx + 1, line.to_string())
            }
        };

        if record.matches('"').count() % 2 == 0 {
            records.push((start, record));
        } else {
            pending = Some((start, record));
        }
    }

    // An unterminated quote at EOF still yields the partial record; the
    // caller's field-count check reports it.
    if let Some(record) = pending {
        records.push(record);
    }

    records
}
