//! Schema bootstrap and table introspection.
//!
//! The schema lives in a plain SQL script: statements separated by `;`,
//! with whitespace-only and comment-only segments ignored. The whole
//! script runs as one transaction — schema creation is a single logical
//! unit, so a half-created schema is rolled back rather than committed
//! piecemeal.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::crud;
use crate::error::{StoreError, StoreResult};
use crate::meta::MetaStore;
use crate::row::Row;

impl MetaStore {
    /// Execute the schema script at `script`, committing once at the end.
    ///
    /// A missing script fails with [`StoreError::SchemaMissing`]; a failing
    /// statement rolls back everything the script did.
    pub fn bootstrap_schema(&self, script: &Path) -> StoreResult<()> {
        if !script.exists() {
            return Err(StoreError::SchemaMissing(script.to_path_buf()));
        }
        let sql = fs::read_to_string(script).map_err(|e| StoreError::Io {
            path: script.to_path_buf(),
            source: e,
        })?;

        let statements = split_statements(&sql);

        self.with_conn(|conn| {
            conn.execute_batch("BEGIN IMMEDIATE;")?;

            let result = (|| -> StoreResult<()> {
                for statement in &statements {
                    conn.execute(statement, [])?;
                }
                Ok(())
            })();

            match &result {
                Ok(()) => {
                    conn.execute_batch("COMMIT;")?;
                    info!(
                        script = %script.display(),
                        statements = statements.len(),
                        "schema bootstrapped"
                    );
                }
                Err(err) => {
                    warn!(script = %script.display(), %err, "schema bootstrap failed, rolling back");
                    let _ = conn.execute_batch("ROLLBACK;");
                }
            }
            result
        })
    }

    /// Does a table with this exact name exist?
    pub fn table_exists(&self, name: &str) -> StoreResult<bool> {
        let rows = self.query(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            &[rusqlite::types::Value::Text(name.to_string())],
        )?;
        Ok(!rows.is_empty())
    }

    /// Column metadata for a table, one [`Row`] per column
    /// (`PRAGMA table_info`). The name passes the identifier allow-list
    /// since PRAGMA arguments cannot be parameter-bound.
    pub fn table_info(&self, name: &str) -> StoreResult<Vec<Row>> {
        crud::checked_identifier(name)?;
        self.query(&format!("PRAGMA table_info({name})"), &[])
    }
}

/// Split a script on the `;` terminator, dropping segments that are empty
/// or contain only `--` comments.
fn split_statements(sql: &str) -> Vec<&str> {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty() && !is_comment_only(stmt))
        .collect()
}

fn is_comment_only(stmt: &str) -> bool {
    stmt.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .all(|line| line.starts_with("--"))
}

// ── tests ────────────────────────────────────────────────────────────
