//! Metadata store: connection lifecycle and query execution.
//!
//! [`MetaStore`] owns exactly one SQLite connection per database target,
//! opened lazily on first use and reused until [`MetaStore::disconnect`].
//! All access goes through a mutex, so concurrent callers are serialized —
//! the single-writer assumption of the ingestion pipeline holds by
//! construction, and interleaved mutations from cloned handles each commit
//! independently (per-statement autocommit, no client-visible
//! multi-statement transactions).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};
use tracing::{debug, info, warn};

use crate::crud;
use crate::error::{StoreError, StoreResult};
use crate::row::Row;

/// Where the database lives.
#[derive(Debug, Clone)]
enum Target {
    File(PathBuf),
    Memory,
}

/// Handle to one metadata database.
///
/// Cloning shares the underlying connection slot; the mutex serializes all
/// operations across clones and threads.
#[derive(Debug, Clone)]
pub struct MetaStore {
    target: Target,
    conn: Arc<Mutex<Option<Connection>>>,
}

impl MetaStore {
    /// A store backed by the database file at `path`. No I/O happens until
    /// the first operation; the parent directory is created on connect.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            target: Target::File(path.into()),
            conn: Arc::new(Mutex::new(None)),
        }
    }

    /// An in-memory store, for tests. Note that disconnecting drops the
    /// database; a subsequent operation opens a fresh, empty one.
    pub fn in_memory() -> Self {
        Self {
            target: Target::Memory,
            conn: Arc::new(Mutex::new(None)),
        }
    }

    /// The database file path, or `:memory:`.
    pub fn path(&self) -> &Path {
        match &self.target {
            Target::File(path) => path,
            Target::Memory => Path::new(":memory:"),
        }
    }

    /// Open the connection now instead of on first use. Idempotent:
    /// connecting while connected reuses the existing connection.
    pub fn connect(&self) -> StoreResult<()> {
        self.with_conn(|_| Ok(()))
    }

    /// Close the connection, returning the store to "not connected".
    /// Idempotent: disconnecting while disconnected is a no-op.
    pub fn disconnect(&self) -> StoreResult<()> {
        let mut guard = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        if let Some(conn) = guard.take() {
            if let Err((_, err)) = conn.close() {
                warn!(path = %self.path().display(), %err, "error closing connection");
            }
            debug!(path = %self.path().display(), "disconnected");
        }
        Ok(())
    }

    /// Run a SELECT, returning each result row as a column-name-keyed [`Row`].
    pub fn query(&self, sql: &str, params: &[Value]) -> StoreResult<Vec<Row>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let names: Vec<String> = stmt
                .column_names()
                .into_iter()
                .map(str::to_owned)
                .collect();

            let mut rows = stmt.query(params_from_iter(params.iter()))?;
            let mut out = Vec::new();
            while let Some(sql_row) = rows.next()? {
                let mut row = Row::new();
                for (i, name) in names.iter().enumerate() {
                    let value: Value = sql_row.get(i)?;
                    row.push(name.clone(), value);
                }
                out.push(row);
            }

            debug!(sql = preview(sql), rows = out.len(), "query executed");
            Ok(out)
        })
    }

    /// Run one mutating statement, returning the affected row count.
    ///
    /// The connection stays in autocommit mode, so every statement commits
    /// as soon as it finishes.
    pub fn execute(&self, sql: &str, params: &[Value]) -> StoreResult<usize> {
        self.with_conn(|conn| {
            let affected = conn.execute(sql, params_from_iter(params.iter()))?;
            debug!(sql = preview(sql), affected, "statement executed");
            Ok(affected)
        })
    }

    /// Run one statement once per parameter set, returning the number of
    /// sets processed.
    ///
    /// Each execution commits individually; a failure mid-batch leaves the
    /// earlier statements of that batch already committed.
    pub fn execute_many(&self, sql: &str, param_sets: &[Vec<Value>]) -> StoreResult<usize> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            for params in param_sets {
                stmt.execute(params_from_iter(params.iter()))?;
            }
            debug!(sql = preview(sql), processed = param_sets.len(), "batch executed");
            Ok(param_sets.len())
        })
    }

    /// Insert one row. Fails with [`StoreError::EmptyInput`] on an empty
    /// row, without touching the database.
    pub fn insert(&self, table: &str, row: &Row) -> StoreResult<()> {
        let (sql, values) = crud::build_insert(table, row)?;
        self.execute(&sql, &values)?;
        debug!(table, "row inserted");
        Ok(())
    }

    /// Update rows matching the AND-conjoined equality conditions in
    /// `where_`, returning the affected row count. Empty `set` or empty
    /// `where_` is refused without touching the database.
    pub fn update(&self, table: &str, set: &Row, where_: &Row) -> StoreResult<usize> {
        let (sql, values) = crud::build_update(table, set, where_)?;
        let affected = self.execute(&sql, &values)?;
        if affected == 0 {
            debug!(table, "update matched no rows");
        }
        Ok(affected)
    }

    /// Delete rows matching `where_`, returning the affected row count.
    /// An empty `where_` is refused without touching the database.
    pub fn delete(&self, table: &str, where_: &Row) -> StoreResult<usize> {
        let (sql, values) = crud::build_delete(table, where_)?;
        let affected = self.execute(&sql, &values)?;
        if affected == 0 {
            debug!(table, "delete matched no rows");
        }
        Ok(affected)
    }

    // ── connection internals ─────────────────────────────────────────

    /// Run `f` against the connection, opening it first if needed.
    pub(crate) fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut guard = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let conn = match guard.take() {
            Some(conn) => conn,
            None => self.open_connection()?,
        };
        let result = f(&conn);
        *guard = Some(conn);
        result
    }

    fn open_connection(&self) -> StoreResult<Connection> {
        let conn = match &self.target {
            Target::File(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent).map_err(|e| StoreError::Connection {
                            path: path.clone(),
                            message: format!("failed to create parent directory: {e}"),
                        })?;
                    }
                }
                Connection::open(path).map_err(|e| StoreError::Connection {
                    path: path.clone(),
                    message: e.to_string(),
                })?
            }
            Target::Memory => {
                Connection::open_in_memory().map_err(|e| StoreError::Connection {
                    path: PathBuf::from(":memory:"),
                    message: e.to_string(),
                })?
            }
        };

        apply_pragmas(&conn)?;
        info!(path = %self.path().display(), "database connected");
        Ok(conn)
    }
}

/// Apply concurrency and durability pragmas to a fresh connection.
fn apply_pragmas(conn: &Connection) -> StoreResult<()> {
    // Enforce foreign key constraints.
    conn.pragma_update(None, "foreign_keys", "ON")?;

    // WAL mode: concurrent readers, non-blocking writes.
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // NORMAL sync is safe with WAL; at worst the last transaction is lost
    // on power failure, never corrupted.
    conn.pragma_update(None, "synchronous", "NORMAL")?;

    // 10 000 pages of page cache (~40 MiB at the default page size).
    conn.pragma_update(None, "cache_size", 10_000_i64)?;

    // Temp tables and indices in memory, not on disk.
    conn.pragma_update(None, "temp_store", "MEMORY")?;

    // Wait up to 30 s for a competing writer instead of failing immediately.
    conn.pragma_update(None, "busy_timeout", 30_000_i64)?;

    debug!("pragmas applied (foreign_keys, WAL, cache 10000 pages)");
    Ok(())
}

/// Truncate SQL for log lines.
fn preview(sql: &str) -> &str {
    sql.get(..60).unwrap_or(sql)
}

// ── tests ────────────────────────────────────────────────────────────
