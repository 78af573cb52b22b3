//! Grid-facing view over a [`TableSnapshot`].
//!
//! The grid addresses cells by (row, column). Data columns map one-to-one
//! onto the snapshot's columns; one synthetic trailing column carries the
//! per-row delete affordance and stores nothing.

use super::table::{ColumnSet, RowRecord, TableName, TableSnapshot, Value};

/// Tooltip shown on the delete affordance.
const DELETE_TOOLTIP: &str = "Delete row";

/// Content of one addressed cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// A stored value.
    Data(&'a Value),
    /// The trailing delete affordance.
    DeleteAction,
}

impl Cell<'_> {
    /// Text the grid displays for this cell.
    pub fn display_text(&self) -> String {
        match self {
            Self::Data(value) => value.to_string(),
            Self::DeleteAction => String::new(),
        }
    }

    /// Tooltip text, if the cell has one.
    pub fn tooltip(&self) -> Option<&'static str> {
        match self {
            Self::Data(_) => None,
            Self::DeleteAction => Some(DELETE_TOOLTIP),
        }
    }
}

/// Change notifications sent to the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    /// Rows `first..=last` were removed.
    RowsRemoved {
        /// First removed row index.
        first: usize,
        /// Last removed row index.
        last: usize,
    },
}

type Subscriber = Box<dyn FnMut(&TableEvent)>;

/// Read-only, randomly addressable model for a table grid.
pub struct TableModel {
    snapshot: TableSnapshot,
    subscribers: Vec<Subscriber>,
}

impl TableModel {
    /// Wrap a freshly fetched snapshot.
    pub fn new(snapshot: TableSnapshot) -> Self {
        Self { snapshot, subscribers: Vec::new() }
    }

    /// The underlying snapshot.
    pub fn snapshot(&self) -> &TableSnapshot {
        &self.snapshot
    }

    /// Table shown by this model.
    pub fn table(&self) -> &TableName {
        self.snapshot.table()
    }

    /// Data column names.
    pub fn columns(&self) -> &ColumnSet {
        self.snapshot.columns()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.snapshot.row_count()
    }

    /// Number of grid columns, including the trailing delete column.
    pub fn column_count(&self) -> usize {
        self.snapshot.columns().len() + 1
    }

    /// Whether `col` is the delete affordance column.
    pub fn is_delete_column(&self, col: usize) -> bool {
        col == self.snapshot.columns().len()
    }

    /// Header text for a grid column.
    pub fn header(&self, col: usize) -> Option<&str> {
        if self.is_delete_column(col) {
            return Some("");
        }
        self.snapshot.columns().get(col)
    }

    /// Row at a position.
    pub fn row(&self, row: usize) -> Option<&RowRecord> {
        self.snapshot.row(row)
    }

    /// Address one cell.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell<'_>> {
        let record = self.snapshot.row(row)?;
        if self.is_delete_column(col) {
            return Some(Cell::DeleteAction);
        }
        record.get(col).map(Cell::Data)
    }

    /// Displayed text of one cell; empty for the delete column or out-of-range addresses.
    pub fn cell_text(&self, row: usize, col: usize) -> String {
        self.cell(row, col).map(|cell| cell.display_text()).unwrap_or_default()
    }

    /// Register a view-layer listener.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&TableEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Remove one row and notify subscribers.
    pub fn remove_row(&mut self, row: usize) -> Option<RowRecord> {
        let removed = self.snapshot.remove_row(row)?;
        let event = TableEvent::RowsRemoved { first: row, last: row };
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
        Some(removed)
    }
}

impl std::fmt::Debug for TableModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableModel")
            .field("table", self.snapshot.table())
            .field("columns", self.snapshot.columns())
            .field("row_count", &self.snapshot.row_count())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
