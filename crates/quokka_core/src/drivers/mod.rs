//! Database drivers.
//!
//! Each driver turns one open handle into the three primitives the services
//! need: list user tables, run a row-returning statement, run a statement with
//! bound parameters.
//! - `sqlite` - in-process SQLite via rusqlite
//! - `odbc` - Access and other ODBC sources via odbc-api (feature `odbc`)

#[cfg(feature = "odbc")]
pub mod odbc;
pub mod sqlite;

use crate::error::DriverError;
use crate::models::Value;

/// Columns and rows returned by a row-returning statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// Column names from the result description, in order.
    pub columns: Vec<String>,
    /// Rows, each as wide as `columns`.
    pub rows: Vec<Vec<Value>>,
}

/// An open handle to one database file.
pub trait Backend {
    /// Names of ordinary user tables, excluding system and catalog tables.
    fn list_tables(&mut self) -> Result<Vec<String>, DriverError>;

    /// Run a statement and fetch every row eagerly.
    fn query(&mut self, sql: &str) -> Result<ResultSet, DriverError>;

    /// Run a statement with positional `?` parameters; returns affected rows.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64, DriverError>;
}
