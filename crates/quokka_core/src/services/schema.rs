//! Schema listing.
//!
//! Reads the engine's catalog and keeps only ordinary user tables.

use crate::error::QuokkaError;
use crate::models::TableName;
use crate::services::connection::Connection;

/// Schema listing service.
pub struct SchemaService;

impl SchemaService {
    /// List user tables in catalog order.
    ///
    /// A store without user tables yields an empty list. Names that cannot be
    /// bracket-escaped are skipped.
    pub fn list_tables(conn: &mut Connection) -> Result<Vec<TableName>, QuokkaError> {
        let names = conn.list_tables().map_err(|e| {
            tracing::warn!(database = %conn.label(), error = %e, "Failed to list tables");
            QuokkaError::query(None, e)
        })?;

        let tables: Vec<TableName> = names
            .into_iter()
            .filter_map(|name| match TableName::new(name.clone()) {
                Ok(table) => Some(table),
                Err(_) => {
                    tracing::warn!(table = %name, "Skipping table whose name cannot be escaped");
                    None
                }
            })
            .collect();

        tracing::debug!(database = %conn.label(), count = tables.len(), "Listed tables");
        Ok(tables)
    }
}
