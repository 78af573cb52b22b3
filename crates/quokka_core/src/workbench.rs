//! Application state wired to user events.
//!
//! The workbench owns what the window shows: the table list, the grid model
//! for the selected table and the insert form. Each event opens its own
//! connection through [`ConnectionProvider::with_connection`]. Failures are
//! reported through the [`Prompter`] and leave the affected view in its last
//! successful state.

use crate::error::QuokkaError;
use crate::models::{ConnectionDescriptor, TableModel, TableName};
use crate::services::{
    ConnectionProvider, DeleteOutcome, Prompter, RecordEditor, RowDeleter, SchemaService,
    TableService,
};

/// Central application state.
pub struct Workbench<P: Prompter> {
    descriptor: ConnectionDescriptor,
    tables: Vec<TableName>,
    model: Option<TableModel>,
    editor: RecordEditor,
    prompter: P,
}

impl<P: Prompter> Workbench<P> {
    /// Create a workbench for one database file.
    pub fn new(descriptor: ConnectionDescriptor, prompter: P) -> Self {
        tracing::info!(database = %descriptor.display_name(), "Workbench initialized");
        Self { descriptor, tables: Vec::new(), model: None, editor: RecordEditor::new(), prompter }
    }

    // ========== Accessors ==========

    /// Descriptor used for every operation.
    pub fn descriptor(&self) -> &ConnectionDescriptor {
        &self.descriptor
    }

    /// Tables offered for selection.
    pub fn tables(&self) -> &[TableName] {
        &self.tables
    }

    /// Grid model of the selected table, if one loaded successfully.
    pub fn model(&self) -> Option<&TableModel> {
        self.model.as_ref()
    }

    /// Mutable grid model, for subscribing view listeners.
    pub fn model_mut(&mut self) -> Option<&mut TableModel> {
        self.model.as_mut()
    }

    /// The insert form.
    pub fn editor(&self) -> &RecordEditor {
        &self.editor
    }

    /// The insert form, for editing fields.
    pub fn editor_mut(&mut self) -> &mut RecordEditor {
        &mut self.editor
    }

    /// The prompter handling dialogs.
    pub fn prompter_mut(&mut self) -> &mut P {
        &mut self.prompter
    }

    // ========== Events ==========

    /// Load the table list. On failure the list is left empty.
    pub fn load_tables(&mut self) -> bool {
        self.tables.clear();
        match ConnectionProvider::with_connection(&self.descriptor, SchemaService::list_tables) {
            Ok(tables) => {
                self.tables = tables;
                true
            }
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    /// Table chosen: fetch its rows. On failure the previous grid stays.
    pub fn select_table(&mut self, table: &TableName) -> bool {
        let result = ConnectionProvider::with_connection(&self.descriptor, |conn| {
            TableService::fetch_table(conn, table)
        });
        match result {
            Ok(snapshot) => {
                self.model = Some(TableModel::new(snapshot));
                true
            }
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    /// Fetch the selected table again.
    pub fn refresh(&mut self) -> bool {
        match self.model.as_ref().map(|model| model.table().clone()) {
            Some(table) => self.select_table(&table),
            None => false,
        }
    }

    /// Delete icon clicked on `row`: confirm, delete, drop the row from the grid.
    ///
    /// No connection is opened until the user has confirmed.
    pub fn delete_row(&mut self, row: usize) -> Option<DeleteOutcome> {
        let descriptor = &self.descriptor;
        let result = match self.model.as_mut() {
            None => Err(QuokkaError::internal("No table is selected")),
            Some(model) => RowDeleter::confirm_and_delete(model, row, &mut self.prompter, || {
                ConnectionProvider::open(descriptor)
            }),
        };

        match result {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    /// Add clicked: open the insert form for the selected table.
    pub fn open_editor(&mut self) -> bool {
        match self.model.as_ref() {
            Some(model) => {
                self.editor.open(model.table().clone(), model.columns().clone());
                true
            }
            None => {
                self.report(&QuokkaError::internal("No table is selected"));
                false
            }
        }
    }

    /// Save the insert form. The displayed grid is not refreshed.
    pub fn save_editor(&mut self) -> bool {
        if !self.editor.is_open() {
            self.report(&QuokkaError::internal("Record editor is not open"));
            return false;
        }

        let editor = &mut self.editor;
        let result =
            ConnectionProvider::with_connection(&self.descriptor, |conn| editor.save(conn));
        match result {
            Ok(()) => true,
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    /// Close the insert form without saving.
    pub fn cancel_editor(&mut self) {
        self.editor.cancel();
    }

    fn report(&mut self, err: &QuokkaError) {
        tracing::warn!(category = err.category(), error = %err, "Operation failed");
        self.prompter.show_error(&err.to_error_info());
    }
}
