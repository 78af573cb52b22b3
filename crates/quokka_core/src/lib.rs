//! Core types and services for Quokka, a table browser for Access and SQLite files.
//!
//! This crate provides everything below the window:
//!
//! - **error**: Error taxonomy and user-displayable error info
//! - **models**: Connection descriptors, table snapshots and the grid model
//! - **drivers**: SQLite and ODBC backends
//! - **sql**: Statement builders with bracket-escaped identifiers
//! - **services**: Connections, schema listing, table fetch, delete, insert form
//! - **workbench**: Application state wired to user events
//! - **config**: `quokka.json` loading and data directories
//! - **logging**: Structured logging setup

pub mod config;
pub mod drivers;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod sql;
pub mod workbench;

#[cfg(test)]
mod verification_tests;

pub use config::AppConfig;
pub use error::{ErrorInfo, QuokkaError};
pub use models::{
    Cell, ColumnSet, ConnectionDescriptor, Driver, RowRecord, TableEvent, TableModel, TableName,
    TableSnapshot, Value,
};
pub use services::{
    Confirmation, Connection, ConnectionProvider, DeleteOutcome, Prompter, RecordEditor,
    RowDeleter, SchemaService, TableService,
};
pub use workbench::Workbench;
