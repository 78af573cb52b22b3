//! Insert form for new rows.
//!
//! State machine:
//! - `Closed` → open → `Editing`
//! - `Editing` → save ok → `Closed`
//! - `Editing` → save error → `Editing` (inputs kept, error recorded)
//! - `Editing` → cancel → `Closed` (inputs discarded)
//!
//! Saving does not refresh any displayed snapshot; the table has to be
//! selected again to show the new row.

use crate::error::QuokkaError;
use crate::models::{ColumnSet, TableName, Value};
use crate::services::connection::Connection;
use crate::sql;

/// Contents of an open insert form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorForm {
    table: TableName,
    columns: ColumnSet,
    fields: Vec<String>,
    last_error: Option<String>,
}

/// State of the record editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    /// No form is shown.
    #[default]
    Closed,
    /// A form is open for a table.
    Editing(EditorForm),
}

/// Record editor holding the insert form.
#[derive(Debug, Clone, Default)]
pub struct RecordEditor {
    state: EditorState,
}

impl RecordEditor {
    /// Create a closed editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Check if a form is open.
    pub fn is_open(&self) -> bool {
        matches!(self.state, EditorState::Editing(_))
    }

    /// Open the form with one empty field per column, discarding previous input.
    pub fn open(&mut self, table: TableName, columns: ColumnSet) {
        tracing::debug!(table = %table, columns = columns.len(), "Opening record editor");
        let fields = vec![String::new(); columns.len()];
        self.state = EditorState::Editing(EditorForm { table, columns, fields, last_error: None });
    }

    /// Table the open form inserts into.
    pub fn table(&self) -> Option<&TableName> {
        self.form().map(|form| &form.table)
    }

    /// Columns of the open form.
    pub fn columns(&self) -> Option<&ColumnSet> {
        self.form().map(|form| &form.columns)
    }

    /// Field values of the open form, aligned with its columns.
    pub fn fields(&self) -> Option<&[String]> {
        self.form().map(|form| form.fields.as_slice())
    }

    /// Error message from the last failed save.
    pub fn last_error(&self) -> Option<&str> {
        self.form().and_then(|form| form.last_error.as_deref())
    }

    /// Set one field. Returns false when no form is open or the index is out of range.
    pub fn set_field(&mut self, index: usize, text: impl Into<String>) -> bool {
        let EditorState::Editing(form) = &mut self.state else {
            return false;
        };
        match form.fields.get_mut(index) {
            Some(field) => {
                *field = text.into();
                true
            }
            None => false,
        }
    }

    /// Insert the entered values as a new row.
    ///
    /// Every field is bound as text. On failure the form stays open with its
    /// values intact.
    pub fn save(&mut self, conn: &mut Connection) -> Result<(), QuokkaError> {
        let EditorState::Editing(form) = &mut self.state else {
            return Err(QuokkaError::internal("Record editor is not open"));
        };

        let result = Self::insert(conn, form);
        match result {
            Ok(()) => {
                tracing::debug!(table = %form.table, "Row inserted");
                self.state = EditorState::Closed;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(table = %form.table, error = %e, "Insert failed");
                form.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Close the form and discard its input.
    pub fn cancel(&mut self) {
        if self.is_open() {
            tracing::debug!("Record editor cancelled");
        }
        self.state = EditorState::Closed;
    }

    fn insert(conn: &mut Connection, form: &EditorForm) -> Result<(), QuokkaError> {
        let sql = sql::insert_row(&form.table, &form.columns)?;
        let params: Vec<Value> = form.fields.iter().cloned().map(Value::Text).collect();
        conn.execute(&sql, &params)
            .map_err(|e| QuokkaError::insert(form.table.as_str(), e))?;
        Ok(())
    }

    fn form(&self) -> Option<&EditorForm> {
        match &self.state {
            EditorState::Editing(form) => Some(form),
            EditorState::Closed => None,
        }
    }
}
