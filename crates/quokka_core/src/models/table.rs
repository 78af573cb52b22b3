//! Table identifiers, values and snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QuokkaError;

/// Wrap an identifier in brackets so embedded spaces and keywords survive.
///
/// Names containing a closing bracket cannot be escaped this way and are rejected.
pub fn quote_identifier(name: &str) -> Result<String, QuokkaError> {
    if name.is_empty() || name.contains(']') {
        return Err(QuokkaError::invalid_identifier(name));
    }
    Ok(format!("[{name}]"))
}

/// Name of a user table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName(String);

impl TableName {
    /// Create a table name, rejecting names that cannot be bracket-escaped.
    pub fn new(name: impl Into<String>) -> Result<Self, QuokkaError> {
        let name = name.into();
        quote_identifier(&name)?;
        Ok(Self(name))
    }

    /// Get the raw name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the bracket-escaped name for embedding in SQL.
    pub fn quoted(&self) -> String {
        format!("[{}]", self.0)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TableName {
    type Error = QuokkaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TableName> for String {
    fn from(value: TableName) -> Self {
        value.0
    }
}

/// Ordered column names, in the order the engine described the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSet(Vec<String>);

impl ColumnSet {
    /// Create a column set from names.
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no columns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Column name at a position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Iterate over the names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A scalar read from or written to the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Integer types, including booleans.
    Integer(i64),
    /// Floating point types.
    Real(f64),
    /// Character data.
    Text(String),
    /// Character data that is not valid UTF-8, kept byte-for-byte.
    RawText(Vec<u8>),
    /// Binary data.
    Blob(Vec<u8>),
}

impl Value {
    /// Check if this is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::RawText(v) => f.write_str(&String::from_utf8_lossy(v)),
            Self::Blob(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

/// One row, positionally aligned with a [`ColumnSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRecord(Vec<Value>);

impl RowRecord {
    /// Create a row from values.
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at a position.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// All values in column order.
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Printable form of every value.
    pub fn texts(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl<V: Into<Value>> FromIterator<V> for RowRecord {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Point-in-time copy of a table's columns and rows.
///
/// Every row has exactly as many values as there are columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot {
    table: TableName,
    columns: ColumnSet,
    rows: Vec<RowRecord>,
}

impl TableSnapshot {
    /// Build a snapshot, rejecting rows whose width differs from the column set.
    pub fn new(
        table: TableName,
        columns: ColumnSet,
        rows: Vec<RowRecord>,
    ) -> Result<Self, QuokkaError> {
        if let Some((index, row)) =
            rows.iter().enumerate().find(|(_, row)| row.len() != columns.len())
        {
            return Err(QuokkaError::internal(format!(
                "Row {index} of {table} has {} values for {} columns",
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { table, columns, rows })
    }

    /// Table the snapshot was read from.
    pub fn table(&self) -> &TableName {
        &self.table
    }

    /// Column names.
    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Rows in fetch order.
    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    /// Row at a position.
    pub fn row(&self, index: usize) -> Option<&RowRecord> {
        self.rows.get(index)
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Remove one row from the in-memory copy.
    pub(crate) fn remove_row(&mut self, index: usize) -> Option<RowRecord> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }
}
