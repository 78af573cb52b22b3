//! Error types for Quokka.
//!
//! `QuokkaError` is the taxonomy surfaced to the user: one variant per
//! failing operation kind. Drivers report [`DriverError`], which the
//! services wrap with the context of the operation that failed.

use thiserror::Error;

/// Boxed error source carried by driver and service errors.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for Quokka.
#[derive(Debug, Error)]
pub enum QuokkaError {
    /// The driver could not be loaded or the database file could not be opened.
    #[error("Connection error: {message}")]
    Connection {
        /// Human-readable error message.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<BoxedSource>,
    },

    /// Listing tables or fetching rows failed.
    #[error("Query error: {message}")]
    Query {
        /// Driver message.
        message: String,
        /// Table being read, if any.
        table: Option<String>,
        /// Optional underlying error source.
        #[source]
        source: Option<BoxedSource>,
    },

    /// Deleting a row failed.
    #[error("Delete error: {message}")]
    Delete {
        /// Driver message.
        message: String,
        /// Table the row belongs to.
        table: String,
        /// The attempted filter, with values replaced by placeholders.
        filter: String,
        /// Optional underlying error source.
        #[source]
        source: Option<BoxedSource>,
    },

    /// Inserting a row failed.
    #[error("Insert error: {message}")]
    Insert {
        /// Driver message.
        message: String,
        /// Target table.
        table: String,
        /// Optional underlying error source.
        #[source]
        source: Option<BoxedSource>,
    },

    /// A table or column name cannot be bracket-escaped.
    #[error("Invalid identifier: {name:?}")]
    InvalidIdentifier {
        /// The rejected name.
        name: String,
    },

    /// Configuration error.
    #[error("Config error: {message}")]
    Config {
        /// Human-readable error message.
        message: String,
    },

    /// Unexpected internal error.
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message.
        message: String,
    },
}

impl QuokkaError {
    // ========== Constructors ==========

    /// Create a new connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection { message: message.into(), source: None }
    }

    /// Create a new connection error from a driver failure.
    pub fn connection_from(err: DriverError) -> Self {
        Self::Connection { message: err.message, source: err.source }
    }

    /// Create a new query error from a driver failure.
    pub fn query(table: Option<&str>, err: DriverError) -> Self {
        Self::Query { message: err.message, table: table.map(String::from), source: err.source }
    }

    /// Create a new delete error from a driver failure.
    pub fn delete(table: impl Into<String>, filter: impl Into<String>, err: DriverError) -> Self {
        Self::Delete {
            message: err.message,
            table: table.into(),
            filter: filter.into(),
            source: err.source,
        }
    }

    /// Create a new insert error from a driver failure.
    pub fn insert(table: impl Into<String>, err: DriverError) -> Self {
        Self::Insert { message: err.message, table: table.into(), source: err.source }
    }

    /// Create a new invalid identifier error.
    pub fn invalid_identifier(name: impl Into<String>) -> Self {
        Self::InvalidIdentifier { name: name.into() }
    }

    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    // ========== Methods ==========

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection { .. } => "Connection",
            Self::Query { .. } => "Query",
            Self::Delete { .. } => "Delete",
            Self::Insert { .. } => "Insert",
            Self::InvalidIdentifier { .. } => "Identifier",
            Self::Config { .. } => "Config",
            Self::Internal { .. } => "Internal",
        }
    }

    /// Get actionable hint for the user.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Connection { .. } => {
                Some("Check that the database file exists, is not locked and the driver is installed")
            }
            Self::Query { .. } => None,
            Self::Delete { .. } => Some("The row may have been changed or removed elsewhere"),
            Self::Insert { .. } => Some("Check the entered values against the column types"),
            Self::InvalidIdentifier { .. } => Some("Names containing ']' cannot be used"),
            Self::Config { .. } => Some("Fix or remove quokka.json"),
            Self::Internal { .. } => Some("Please report this issue"),
        }
    }

    /// Get the table the failed operation targeted (if applicable).
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::Query { table, .. } => table.as_deref(),
            Self::Delete { table, .. } | Self::Insert { table, .. } => Some(table),
            _ => None,
        }
    }

    /// Convert to user-displayable error info.
    pub fn to_error_info(&self) -> ErrorInfo {
        let error_type = format!("{} Error", self.category());
        let message = self.to_string();
        let hint = self.hint().map(String::from);

        let technical_detail = match self {
            Self::Delete { table, filter, .. } => {
                Some(format!("Table: {table}\nFilter: {filter}"))
            }
            Self::Query { table: Some(table), .. } | Self::Insert { table, .. } => {
                Some(format!("Table: {table}"))
            }
            _ => None,
        };

        ErrorInfo { error_type, message, hint, technical_detail }
    }
}

/// User-displayable error information.
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Category name (e.g., "Delete Error").
    pub error_type: String,
    /// User-friendly message.
    pub message: String,
    /// Actionable suggestion.
    pub hint: Option<String>,
    /// Technical detail for "Show Details" expansion.
    pub technical_detail: Option<String>,
}

/// Failure reported by a database driver, before operation context is known.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DriverError {
    /// Driver message.
    pub message: String,
    /// Underlying driver error.
    #[source]
    pub source: Option<BoxedSource>,
}

impl DriverError {
    /// Create a driver error without an underlying source.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), source: None }
    }

    /// Error returned when a closed connection is used.
    pub fn closed() -> Self {
        Self::new("Connection is closed")
    }
}

// ========== Error Conversions ==========

/// Convert from rusqlite::Error to DriverError.
impl From<rusqlite::Error> for DriverError {
    fn from(err: rusqlite::Error) -> Self {
        DriverError { message: err.to_string(), source: Some(Box::new(err)) }
    }
}

/// Convert from odbc_api::Error to DriverError.
#[cfg(feature = "odbc")]
impl From<odbc_api::Error> for DriverError {
    fn from(err: odbc_api::Error) -> Self {
        DriverError { message: err.to_string(), source: Some(Box::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_error_info_names_table_and_filter() {
        let err = QuokkaError::delete(
            "Order Items",
            "[Qty] = ? AND [Note] IS NULL",
            DriverError::new("database is locked"),
        );

        let info = err.to_error_info();
        assert_eq!(info.error_type, "Delete Error");
        assert_eq!(info.message, "Delete error: database is locked");
        assert!(info.hint.is_some());
        let detail = info.technical_detail.unwrap();
        assert!(detail.contains("Table: Order Items"));
        assert!(detail.contains("Filter: [Qty] = ? AND [Note] IS NULL"));
    }

    #[test]
    fn test_query_error_without_table_has_no_detail() {
        let err = QuokkaError::query(None, DriverError::new("no such table"));
        assert_eq!(err.table(), None);
        assert!(err.to_error_info().technical_detail.is_none());
    }

    #[test]
    fn test_connection_error_keeps_driver_source() {
        let sqlite_err = rusqlite::Error::InvalidQuery;
        let err = QuokkaError::connection_from(DriverError::from(sqlite_err));
        assert_eq!(err.category(), "Connection");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_every_category_produces_error_info() {
        let errors = vec![
            QuokkaError::connection("file not found"),
            QuokkaError::query(Some("Books"), DriverError::new("syntax error")),
            QuokkaError::insert("Books", DriverError::new("UNIQUE constraint failed")),
            QuokkaError::invalid_identifier("a]b"),
            QuokkaError::config("expected value"),
            QuokkaError::internal("editor closed"),
        ];

        for err in errors {
            let info = err.to_error_info();
            assert!(info.error_type.ends_with("Error"));
            assert!(!info.message.is_empty());
        }
    }
}
