//! SQLite store handle.
//!
//! [`Database`] is a cheap-to-clone handle to one embedded store. Every
//! repository/service is constructed with its own clone; there is no
//! process-global connection. Statements from concurrent callers
//! serialize on the handle's mutex, and a statement that hits SQLite's
//! BUSY/LOCKED condition gets one retry on a freshly opened connection
//! before the failure propagates.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, Row, ToSql, ffi};
use tracing::warn;

use crate::error::Result;
use crate::storage::schema::apply_schema;

/// Matches the busy timeout the application has always shipped with.
const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared handle to the embedded checklist store.
#[derive(Debug, Clone)]
pub struct Database {
    store: Arc<Mutex<Store>>,
}

/// Connection state behind the handle.
///
/// File-backed stores keep their path so a wedged connection can be
/// dropped and reopened; in-memory stores would lose all state on reopen
/// and therefore never close.
#[derive(Debug)]
enum Store {
    File {
        path: PathBuf,
        conn: Option<Connection>,
    },
    Memory(Connection),
}

impl Database {
    /// Open (creating if needed) a file-backed store at the given path.
    ///
    /// Applies pragmas and the schema before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or the
    /// schema cannot be applied.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = connect(path)?;
        Ok(Self {
            store: Arc::new(Mutex::new(Store::File {
                path: path.to_path_buf(),
                conn: Some(conn),
            })),
        })
    }

    /// Open an in-memory store (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self {
            store: Arc::new(Mutex::new(Store::Memory(conn))),
        })
    }

    /// Execute a single statement, returning the number of rows affected.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails after the retry protocol.
    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> Result<usize> {
        self.with_conn(|conn| conn.execute(sql, params))
    }

    /// Execute an INSERT, returning the new row id.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails after the retry protocol.
    pub fn insert(&self, sql: &str, params: &[&dyn ToSql]) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(sql, params)?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Run a query and collect every row through `map`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row mapping fails after the
    /// retry protocol.
    pub fn query_rows<T>(
        &self,
        sql: &str,
        params: &[&dyn ToSql],
        map: impl Fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt.query_map(params, &map)?;
            rows.collect()
        })
    }

    /// Run a query expected to yield at most one row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails after the retry protocol. A
    /// missing row is `Ok(None)`, not an error.
    pub fn query_row_opt<T>(
        &self,
        sql: &str,
        params: &[&dyn ToSql],
        map: impl Fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Option<T>> {
        self.with_conn(|conn| conn.query_row(sql, params, &map).optional())
    }

    /// Run `f` against the live connection with the lock-retry protocol:
    /// on BUSY/LOCKED the connection is closed, reopened, and `f` runs
    /// exactly once more.
    fn with_conn<T>(&self, f: impl Fn(&Connection) -> rusqlite::Result<T>) -> Result<T> {
        let mut store = self.store.lock().expect("store mutex poisoned");
        match &mut *store {
            Store::Memory(conn) => match f(conn) {
                Err(err) if is_lock_error(&err) => {
                    warn!(error = %err, "store busy, retrying statement");
                    Ok(f(conn)?)
                }
                result => Ok(result?),
            },
            Store::File { path, conn: slot } => {
                // A previous failed reopen leaves the slot empty; connect
                // lazily in that case.
                let conn = match slot.take() {
                    Some(conn) => conn,
                    None => connect(path)?,
                };
                match f(&conn) {
                    Err(err) if is_lock_error(&err) => {
                        warn!(error = %err, "store locked, reopening connection for one retry");
                        drop(conn);
                        let conn = connect(path)?;
                        let retried = f(&conn);
                        *slot = Some(conn);
                        Ok(retried?)
                    }
                    result => {
                        *slot = Some(conn);
                        Ok(result?)
                    }
                }
            }
        }
    }
}

/// Open a connection at `path` with the standard timeout, pragmas, and
/// schema applied.
fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_schema(&conn)?;
    Ok(conn)
}

fn is_lock_error(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(
            ffi::Error {
                code: ffi::ErrorCode::DatabaseBusy | ffi::ErrorCode::DatabaseLocked,
                ..
            },
            _,
        )
    )
}
