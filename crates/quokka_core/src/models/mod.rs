//! Data models for Quokka.
//!
//! - `connection` - ConnectionDescriptor, Driver
//! - `table` - TableName, ColumnSet, Value, RowRecord, TableSnapshot
//! - `grid` - TableModel, the grid-facing view over a snapshot

pub mod connection;
pub mod grid;
pub mod table;

pub use connection::{ConnectionDescriptor, Driver, DEFAULT_ACCESS_DRIVER};
pub use grid::{Cell, TableEvent, TableModel};
pub use table::{quote_identifier, ColumnSet, RowRecord, TableName, TableSnapshot, Value};
