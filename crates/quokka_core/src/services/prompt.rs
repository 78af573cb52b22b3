//! User prompts raised by core operations.
//!
//! The front-end implements [`Prompter`] with its own dialogs; both calls
//! block until the user answers or acknowledges.

use crate::error::ErrorInfo;

/// Answer to a confirmation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// User confirmed the action.
    Confirmed,
    /// User dismissed/cancelled the dialog.
    Dismissed,
}

/// Blocking dialogs owned by the front-end.
pub trait Prompter {
    /// Ask the user to confirm an irreversible action.
    fn confirm(&mut self, title: &str, message: &str) -> Confirmation;

    /// Show an error and wait for the user to acknowledge it.
    fn show_error(&mut self, info: &ErrorInfo);
}
