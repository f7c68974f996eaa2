//! Checklist export and import.
//!
//! Two formats ship: a flat CSV for spreadsheets and a structured JSON
//! document that round-trips through [`Importer`]. File names derive
//! from the project name plus a local timestamp, and every write is
//! atomic (temp file, fsync, rename).
//!
//! # File Formats
//!
//! CSV carries one row per task under the header
//! `Category,Task,Status,Completed_Date,Notes`. JSON wraps the tasks in
//! a document with the export time and completion counts:
//!
//! ```json
//! {"export_date":"2024-06-01T10:00:00+00:00","total_tasks":37,"completed_tasks":10,"tasks":[...]}
//! ```
//!
//! # Example
//!
//! ```ignore
//! use callboard::export::{ExportFormat, Exporter, export_path};
//!
//! let path = export_path("Fall Play", ExportFormat::Json);
//! let written = Exporter::new(db.clone()).export_json(project_id, &path)?;
//! ```

mod exporter;
mod file;
mod importer;
mod types;

pub use exporter::{CSV_HEADER, Exporter};
pub use file::{
    EXPORTS_DIR, atomic_write, csv_escape, csv_records, ensure_export_dir, export_file_name,
    export_path, parse_csv_line,
};
pub use importer::Importer;
pub use types::{
    ExportDocument, ExportError, ExportFormat, ExportResult, TaskRecord, format_timestamp,
    parse_timestamp,
};
