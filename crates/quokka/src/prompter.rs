//! Terminal dialogs for confirmations and errors.

use quokka_core::{Confirmation, ErrorInfo, Prompter};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Blocking yes/no and error dialogs on the terminal.
pub struct TerminalPrompter {
    editor: DefaultEditor,
}

impl TerminalPrompter {
    /// Create a prompter with its own line editor (no history).
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Self { editor: DefaultEditor::new()? })
    }

    /// Read one line for a form field. `None` on Ctrl-C or end of input.
    pub fn read_field(&mut self, label: &str, current: &str) -> Option<String> {
        match self.editor.readline_with_initial(&format!("{label}: "), (current, "")) {
            Ok(line) => Some(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read field");
                None
            }
        }
    }

    /// Read a single answer line, trimmed and lowercased.
    pub fn ask(&mut self, question: &str) -> Option<String> {
        match self.editor.readline(question) {
            Ok(line) => Some(line.trim().to_lowercase()),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read answer");
                None
            }
        }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, title: &str, message: &str) -> Confirmation {
        println!("\n== {title} ==");
        println!("{message}");
        match self.ask("Proceed? [y/N] ").as_deref() {
            Some("y") | Some("yes") => Confirmation::Confirmed,
            _ => Confirmation::Dismissed,
        }
    }

    fn show_error(&mut self, info: &ErrorInfo) {
        eprintln!("\n== {} ==", info.error_type);
        eprintln!("{}", info.message);
        if let Some(hint) = &info.hint {
            eprintln!("Hint: {hint}");
        }
        if let Some(detail) = &info.technical_detail {
            eprintln!("{detail}");
        }
        // Acknowledge before returning, like a modal.
        let _ = self.ask("Press Enter to continue ");
    }
}
