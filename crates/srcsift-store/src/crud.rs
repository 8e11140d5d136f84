//! Generic single-table SQL generation.
//!
//! The builders are pure functions from a table name and [`Row`] mappings
//! to parameterized SQL plus its positional values, so they unit-test
//! without a live connection. Values are always parameter-bound; table and
//! column identifiers are interpolated, and therefore must pass the strict
//! allow-list first.

use rusqlite::types::Value;

use crate::error::{StoreError, StoreResult};
use crate::row::Row;

/// Allow-list for interpolated identifiers: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) fn checked_identifier(name: &str) -> StoreResult<&str> {
    if valid_identifier(name) {
        Ok(name)
    } else {
        Err(StoreError::InvalidIdentifier(name.to_string()))
    }
}

/// `INSERT INTO <table> (<columns...>) VALUES (<placeholders...>)`, with
/// column order and placeholder order in positional correspondence.
pub fn build_insert(table: &str, row: &Row) -> StoreResult<(String, Vec<Value>)> {
    if row.is_empty() {
        return Err(StoreError::EmptyInput {
            operation: "insert",
            table: table.to_string(),
            reason: "row has no columns",
        });
    }
    checked_identifier(table)?;

    let mut columns = Vec::with_capacity(row.len());
    let mut placeholders = Vec::with_capacity(row.len());
    let mut values = Vec::with_capacity(row.len());
    for (i, (column, value)) in row.iter().enumerate() {
        checked_identifier(column)?;
        columns.push(column);
        placeholders.push(format!("?{}", i + 1));
        values.push(value.clone());
    }

    let sql = format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", "),
    );
    Ok((sql, values))
}

/// `UPDATE <table> SET col = ?, ... WHERE col = ? AND ...`.
///
/// WHERE conditions are equality tests conjoined with AND only. An empty
/// SET or an empty WHERE is refused; an unconditioned UPDATE is never
/// permitted by this API.
pub fn build_update(table: &str, set: &Row, where_: &Row) -> StoreResult<(String, Vec<Value>)> {
    if set.is_empty() {
        return Err(StoreError::EmptyInput {
            operation: "update",
            table: table.to_string(),
            reason: "no values to set",
        });
    }
    if where_.is_empty() {
        return Err(StoreError::EmptyInput {
            operation: "update",
            table: table.to_string(),
            reason: "no WHERE conditions",
        });
    }
    checked_identifier(table)?;

    let mut values = Vec::with_capacity(set.len() + where_.len());
    let set_clause = clause(set, ", ", &mut values)?;
    let where_clause = clause(where_, " AND ", &mut values)?;

    let sql = format!("UPDATE {table} SET {set_clause} WHERE {where_clause}");
    Ok((sql, values))
}

/// `DELETE FROM <table> WHERE col = ? AND ...` — mirrors [`build_update`]'s
/// WHERE construction without a SET clause.
pub fn build_delete(table: &str, where_: &Row) -> StoreResult<(String, Vec<Value>)> {
    if where_.is_empty() {
        return Err(StoreError::EmptyInput {
            operation: "delete",
            table: table.to_string(),
            reason: "no WHERE conditions",
        });
    }
    checked_identifier(table)?;

    let mut values = Vec::with_capacity(where_.len());
    let where_clause = clause(where_, " AND ", &mut values)?;

    let sql = format!("DELETE FROM {table} WHERE {where_clause}");
    Ok((sql, values))
}

/// Build `col = ?N` fragments joined by `separator`, appending values and
/// numbering placeholders after whatever is already in `values`.
fn clause(row: &Row, separator: &str, values: &mut Vec<Value>) -> StoreResult<String> {
    let mut parts = Vec::with_capacity(row.len());
    for (column, value) in row.iter() {
        checked_identifier(column)?;
        values.push(value.clone());
        parts.push(format!("{column} = ?{}", values.len()));
    }
    Ok(parts.join(separator))
}

// ── tests ────────────────────────────────────────────────────────────
