//! Table fetching.
//!
//! Reads a whole table eagerly into a [`TableSnapshot`]. There is no paging or
//! streaming; this suits small local files only.

use crate::error::QuokkaError;
use crate::models::{ColumnSet, RowRecord, TableName, TableSnapshot};
use crate::services::connection::Connection;
use crate::sql;

/// Table data service.
pub struct TableService;

impl TableService {
    /// Fetch every row and the column names of a table.
    pub fn fetch_table(
        conn: &mut Connection,
        table: &TableName,
    ) -> Result<TableSnapshot, QuokkaError> {
        let sql = sql::select_all(table);
        let result = conn.query(&sql).map_err(|e| {
            tracing::warn!(table = %table, error = %e, "Failed to fetch table");
            QuokkaError::query(Some(table.as_str()), e)
        })?;

        let columns = ColumnSet::new(result.columns);
        let rows = result.rows.into_iter().map(RowRecord::new).collect();
        let snapshot = TableSnapshot::new(table.clone(), columns, rows)?;

        tracing::debug!(
            table = %table,
            columns = snapshot.columns().len(),
            rows = snapshot.row_count(),
            "Fetched table"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConnectionDescriptor, Value};
    use crate::services::ConnectionProvider;

    #[test]
    fn test_fetch_keeps_column_order_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.db");
        rusqlite::Connection::open(&path)
            .unwrap()
            .execute_batch(
                "CREATE TABLE Books (Year INTEGER, Title TEXT, Author TEXT);
                 INSERT INTO Books VALUES (1965, 'Dune', 'Herbert');
                 INSERT INTO Books VALUES (NULL, 'Beowulf', NULL);",
            )
            .unwrap();

        let mut conn = ConnectionProvider::open(&ConnectionDescriptor::sqlite(&path)).unwrap();
        let table = TableName::new("Books").unwrap();
        let snapshot = TableService::fetch_table(&mut conn, &table).unwrap();

        assert_eq!(snapshot.columns().iter().collect::<Vec<_>>(), vec!["Year", "Title", "Author"]);
        assert_eq!(snapshot.row_count(), 2);
        assert_eq!(snapshot.rows()[0].texts(), vec!["1965", "Dune", "Herbert"]);
        assert_eq!(snapshot.rows()[1].get(0), Some(&Value::Null));
    }

    #[test]
    fn test_fetch_missing_table_is_query_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.db");
        rusqlite::Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE Books (Title TEXT);")
            .unwrap();

        let mut conn = ConnectionProvider::open(&ConnectionDescriptor::sqlite(&path)).unwrap();
        let table = TableName::new("Authors").unwrap();
        let err = TableService::fetch_table(&mut conn, &table).unwrap_err();

        assert!(matches!(err, QuokkaError::Query { .. }));
        assert_eq!(err.table(), Some("Authors"));
    }
}
