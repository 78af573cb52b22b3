//! Short-lived database connections.
//!
//! A connection is opened for one logical operation (list tables, fetch rows,
//! delete, insert) and closed right after. Nothing is pooled or kept open for
//! the lifetime of the application.

use crate::drivers::sqlite::SqliteBackend;
use crate::drivers::{Backend, ResultSet};
use crate::error::{DriverError, QuokkaError};
use crate::models::{ConnectionDescriptor, Driver, Value};

/// Opens connections from descriptors.
pub struct ConnectionProvider;

impl ConnectionProvider {
    /// Open a connection for the given descriptor.
    ///
    /// Fails when the driver cannot be loaded or the file is missing,
    /// unreachable or locked.
    pub fn open(descriptor: &ConnectionDescriptor) -> Result<Connection, QuokkaError> {
        tracing::debug!(database = %descriptor.display_name(), "Opening connection");

        let backend = Self::open_backend(descriptor).map_err(|e| {
            tracing::warn!(
                database = %descriptor.display_name(),
                error = %e,
                "Failed to open connection"
            );
            QuokkaError::connection_from(e)
        })?;

        Ok(Connection { label: descriptor.display_name(), backend: Some(backend) })
    }

    /// Open a connection, run one operation on it and close it.
    pub fn with_connection<T>(
        descriptor: &ConnectionDescriptor,
        operation: impl FnOnce(&mut Connection) -> Result<T, QuokkaError>,
    ) -> Result<T, QuokkaError> {
        let mut connection = Self::open(descriptor)?;
        let result = operation(&mut connection);
        connection.close();
        result
    }

    fn open_backend(descriptor: &ConnectionDescriptor) -> Result<Box<dyn Backend>, DriverError> {
        match descriptor.driver() {
            Driver::Sqlite => Ok(Box::new(SqliteBackend::open(descriptor.database())?)),
            Driver::Odbc { .. } => Self::open_odbc(descriptor),
        }
    }

    #[cfg(feature = "odbc")]
    fn open_odbc(descriptor: &ConnectionDescriptor) -> Result<Box<dyn Backend>, DriverError> {
        if !descriptor.database().exists() {
            return Err(DriverError::new(format!(
                "Database file not found: {}",
                descriptor.database().display()
            )));
        }
        let backend = crate::drivers::odbc::OdbcBackend::connect(&descriptor.connection_string())?;
        Ok(Box::new(backend))
    }

    #[cfg(not(feature = "odbc"))]
    fn open_odbc(descriptor: &ConnectionDescriptor) -> Result<Box<dyn Backend>, DriverError> {
        Err(DriverError::new(format!(
            "ODBC driver '{}' requested but this build has no ODBC support (enable the `odbc` feature)",
            descriptor.driver().as_str()
        )))
    }
}

/// An open connection to one database file.
///
/// Closing is idempotent; dropping an open connection closes it.
pub struct Connection {
    label: String,
    backend: Option<Box<dyn Backend>>,
}

impl Connection {
    /// Wrap an already-open driver handle.
    pub fn from_backend(label: impl Into<String>, backend: Box<dyn Backend>) -> Self {
        Self { label: label.into(), backend: Some(backend) }
    }

    /// Label of the database this connection points at.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Check if the connection has been closed.
    pub fn is_closed(&self) -> bool {
        self.backend.is_none()
    }

    /// Release the driver handle. Calling this again does nothing.
    pub fn close(&mut self) {
        if self.backend.take().is_some() {
            tracing::debug!(database = %self.label, "Connection closed");
        }
    }

    /// Names of ordinary user tables.
    pub fn list_tables(&mut self) -> Result<Vec<String>, DriverError> {
        self.backend()?.list_tables()
    }

    /// Run a row-returning statement and fetch every row.
    pub fn query(&mut self, sql: &str) -> Result<ResultSet, DriverError> {
        tracing::debug!(database = %self.label, sql, "Executing query");
        self.backend()?.query(sql)
    }

    /// Run a statement with bound parameters; returns affected rows.
    pub fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64, DriverError> {
        // Bound values may carry user data and are not logged.
        tracing::debug!(database = %self.label, sql, params = params.len(), "Executing statement");
        self.backend()?.execute(sql, params)
    }

    fn backend(&mut self) -> Result<&mut (dyn Backend + 'static), DriverError> {
        self.backend.as_deref_mut().ok_or_else(DriverError::closed)
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("label", &self.label)
            .field("is_closed", &self.is_closed())
            .finish()
    }
}
