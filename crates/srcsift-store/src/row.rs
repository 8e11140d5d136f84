//! Ordered column/value rows.
//!
//! [`Row`] is the uniform unit of CRUD input and query output: an ordered
//! mapping from column name to SQL value. Insertion order is preserved so
//! an INSERT's column list and its placeholder list stay in positional
//! correspondence.

use rusqlite::types::Value;

/// An ordered mapping from column name to scalar value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: append a column/value pair.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(column, value);
        self
    }

    /// Builder-style: append a text column. Convenience over [`Row::set`],
    /// since `rusqlite::types::Value` has no `From<&str>`.
    pub fn set_text(self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(column, Value::Text(value.into()))
    }

    /// Append a column/value pair in place.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.push((column.into(), value.into()));
    }

    /// Value of the first column with this name, if any.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn get_str(&self, column: &str) -> Option<&str> {
        match self.get(column)? {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_i64(&self, column: &str) -> Option<i64> {
        match self.get(column)? {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved() {
        let row = Row::new()
            .set_text("z_last", "a")
            .set("a_first", 1_i64)
            .set_text("middle", "b");

        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["z_last", "a_first", "middle"]);
    }

    #[test]
    fn typed_accessors() {
        let row = Row::new().set_text("name", "files").set("count", 3_i64);
        assert_eq!(row.get_str("name"), Some("files"));
        assert_eq!(row.get_i64("count"), Some(3));
        assert_eq!(row.get_i64("name"), None);
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn empty_row() {
        let row = Row::new();
        assert!(row.is_empty());
        assert_eq!(row.len(), 0);
    }
}
