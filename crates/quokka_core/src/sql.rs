//! SQL statement builders.
//!
//! Identifiers are bracket-escaped; values are always bound as `?` parameters.

use crate::error::QuokkaError;
use crate::models::{quote_identifier, ColumnSet, RowRecord, TableName, Value};

/// A statement ready to execute with its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// SQL text with `?` placeholders.
    pub sql: String,
    /// Values bound to the placeholders, in order.
    pub params: Vec<Value>,
}

/// `SELECT * FROM [<table>]`.
pub fn select_all(table: &TableName) -> String {
    format!("SELECT * FROM {}", table.quoted())
}

/// Delete statement matching every column to its fetched value.
///
/// NULL values are matched with `IS NULL` and bind nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    /// The executable statement.
    pub statement: Statement,
    /// The WHERE clause alone, for error reporting.
    pub filter: String,
}

/// `DELETE FROM [<table>] WHERE [<c1>] = ? AND [<c2>] = ? ...`.
pub fn delete_matching(
    table: &TableName,
    columns: &ColumnSet,
    row: &RowRecord,
) -> Result<DeleteStatement, QuokkaError> {
    if columns.len() != row.len() {
        return Err(QuokkaError::internal(format!(
            "Row has {} values for {} columns of {table}",
            row.len(),
            columns.len()
        )));
    }
    if columns.is_empty() {
        return Err(QuokkaError::internal(format!("{table} has no columns to match on")));
    }

    let mut conditions = Vec::with_capacity(columns.len());
    let mut params = Vec::with_capacity(columns.len());
    for (column, value) in columns.iter().zip(row.values()) {
        let column = quote_identifier(column)?;
        if value.is_null() {
            conditions.push(format!("{column} IS NULL"));
        } else {
            conditions.push(format!("{column} = ?"));
            params.push(value.clone());
        }
    }

    let filter = conditions.join(" AND ");
    let sql = format!("DELETE FROM {} WHERE {filter}", table.quoted());
    Ok(DeleteStatement { statement: Statement { sql, params }, filter })
}

/// `INSERT INTO [<table>] ([<c1>], ...) VALUES (?, ...)`.
pub fn insert_row(table: &TableName, columns: &ColumnSet) -> Result<String, QuokkaError> {
    if columns.is_empty() {
        return Err(QuokkaError::internal(format!("{table} has no columns to insert into")));
    }
    let names = columns.iter().map(quote_identifier).collect::<Result<Vec<_>, _>>()?;
    let placeholders = vec!["?"; names.len()].join(", ");
    Ok(format!(
        "INSERT INTO {} ({}) VALUES ({placeholders})",
        table.quoted(),
        names.join(", ")
    ))
}
