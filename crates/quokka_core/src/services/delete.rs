//! Row deletion.
//!
//! Rows are matched on the full set of fetched values, since no primary key
//! is known. When several stored rows carry identical values in every
//! column, all of them are deleted, while the in-memory snapshot loses only
//! the row the user picked.

use crate::error::{DriverError, QuokkaError};
use crate::models::{ColumnSet, RowRecord, TableModel, TableName};
use crate::services::connection::Connection;
use crate::services::prompt::{Confirmation, Prompter};
use crate::sql;

/// Result of a confirmed-delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; nothing was executed.
    Declined,
    /// The statement ran and the row left the snapshot.
    Deleted {
        /// Rows the store reported as removed (may exceed one for duplicates).
        affected: u64,
    },
}

/// Row deletion service.
pub struct RowDeleter;

impl RowDeleter {
    /// Delete every stored row equal to `row` in all columns.
    ///
    /// Returns the number of rows the store removed. A statement that matched
    /// nothing is a `Delete` error: the row changed or vanished since it was
    /// fetched.
    pub fn delete_row(
        conn: &mut Connection,
        table: &TableName,
        columns: &ColumnSet,
        row: &RowRecord,
    ) -> Result<u64, QuokkaError> {
        let delete = sql::delete_matching(table, columns, row)?;

        let affected = conn
            .execute(&delete.statement.sql, &delete.statement.params)
            .map_err(|e| {
                tracing::warn!(table = %table, filter = %delete.filter, error = %e, "Delete failed");
                QuokkaError::delete(table.as_str(), delete.filter.as_str(), e)
            })?;

        if affected == 0 {
            tracing::warn!(table = %table, filter = %delete.filter, "Delete matched no rows");
            return Err(QuokkaError::delete(
                table.as_str(),
                delete.filter.as_str(),
                DriverError::new("No stored row matched the selected values"),
            ));
        }

        if affected > 1 {
            tracing::info!(table = %table, affected, "Delete matched duplicate rows");
        } else {
            tracing::debug!(table = %table, affected, "Row deleted");
        }
        Ok(affected)
    }

    /// Ask the user to confirm deleting the row at `index`.
    pub fn request_confirmation(
        model: &TableModel,
        index: usize,
        prompter: &mut dyn Prompter,
    ) -> Result<Confirmation, QuokkaError> {
        let row = model
            .row(index)
            .ok_or_else(|| QuokkaError::internal(format!("No row {index} in {}", model.table())))?;

        let message = format!(
            "Delete this row from {}? This cannot be undone.\n{}",
            model.table(),
            row.texts().join(" | ")
        );
        let answer = prompter.confirm("Delete row", &message);
        if answer == Confirmation::Dismissed {
            tracing::debug!(table = %model.table(), index, "Delete declined");
        }
        Ok(answer)
    }

    /// Delete the row at `index` from the store, then from the model.
    ///
    /// The model loses exactly one row however many stored rows matched.
    pub fn delete_selected(
        conn: &mut Connection,
        model: &mut TableModel,
        index: usize,
    ) -> Result<u64, QuokkaError> {
        let row = model
            .row(index)
            .cloned()
            .ok_or_else(|| QuokkaError::internal(format!("No row {index} in {}", model.table())))?;

        let affected = Self::delete_row(conn, model.table(), model.columns(), &row)?;
        model.remove_row(index);
        Ok(affected)
    }

    /// Ask for confirmation, then delete the row at `index` from the store and
    /// from the model.
    ///
    /// `connect` runs only after the user confirmed; a declined confirmation
    /// opens nothing, executes nothing and leaves the model unchanged.
    pub fn confirm_and_delete(
        model: &mut TableModel,
        index: usize,
        prompter: &mut dyn Prompter,
        connect: impl FnOnce() -> Result<Connection, QuokkaError>,
    ) -> Result<DeleteOutcome, QuokkaError> {
        match Self::request_confirmation(model, index, prompter)? {
            Confirmation::Dismissed => Ok(DeleteOutcome::Declined),
            Confirmation::Confirmed => {
                let mut conn = connect()?;
                let result = Self::delete_selected(&mut conn, model, index);
                conn.close();
                Ok(DeleteOutcome::Deleted { affected: result? })
            }
        }
    }
}
