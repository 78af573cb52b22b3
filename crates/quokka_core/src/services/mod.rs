//! Backend services for Quokka.
//!
//! - `connection` - Per-operation connections opened from descriptors
//! - `schema` - User table listing
//! - `table` - Eager table fetch into snapshots
//! - `delete` - Full-row-match deletion with confirmation
//! - `editor` - Insert form state machine
//! - `prompt` - Confirmation and error dialogs implemented by the front-end

pub mod connection;
pub mod delete;
pub mod editor;
pub mod prompt;
pub mod schema;
pub mod table;

pub use connection::{Connection, ConnectionProvider};
pub use delete::{DeleteOutcome, RowDeleter};
pub use editor::{EditorForm, EditorState, RecordEditor};
pub use prompt::{Confirmation, Prompter};
pub use schema::SchemaService;
pub use table::TableService;
