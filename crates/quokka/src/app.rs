//! Quokka terminal application: a line-editing loop over the workbench.

use quokka_core::{
    ConnectionDescriptor, DeleteOutcome, QuokkaError, TableEvent, TableName, Workbench,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::grid::format_grid;
use crate::prompter::TerminalPrompter;

const HELP: &str = r#"
Commands:
  tables             List the tables in the database
  open <table|#>     Load a table by name or by its number in the list
  show               Redraw the current table
  delete <row>       Delete a row (asks for confirmation)
  add                Enter a new row for the current table
  refresh            Fetch the current table again
  help               Show this help message
  quit               Exit Quokka
"#;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Tables,
    Open(String),
    Show,
    Delete(usize),
    Add,
    Refresh,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_lowercase().as_str() {
            "" => Self::Empty,
            "tables" | "ls" => Self::Tables,
            "open" if !rest.is_empty() => Self::Open(rest.to_string()),
            "show" => Self::Show,
            "delete" | "rm" => match rest.parse() {
                Ok(row) => Self::Delete(row),
                Err(_) => Self::Unknown(line.to_string()),
            },
            "add" => Self::Add,
            "refresh" => Self::Refresh,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Resolve an `open` argument: a number picks from the listed tables, anything
/// else (including a number past the end of the list) is taken as a name.
fn resolve_table(tables: &[TableName], target: &str) -> Result<TableName, QuokkaError> {
    if let Some(table) = target.parse::<usize>().ok().and_then(|index| tables.get(index)) {
        return Ok(table.clone());
    }
    TableName::new(target)
}

/// Root application driving the workbench from terminal input.
pub struct QuokkaApp {
    workbench: Workbench<TerminalPrompter>,
    editor: DefaultEditor,
}

impl QuokkaApp {
    /// Create the application for one database file.
    pub fn new(
        descriptor: ConnectionDescriptor,
        prompter: TerminalPrompter,
    ) -> Result<Self, ReadlineError> {
        Ok(Self { workbench: Workbench::new(descriptor, prompter), editor: DefaultEditor::new()? })
    }

    /// Run until `quit`, Ctrl-D or Ctrl-C.
    pub fn run(&mut self) {
        println!("Quokka - {}", self.workbench.descriptor().display_name());
        println!("Type 'help' for commands.");
        self.list_tables();

        loop {
            let line = match self.editor.readline("quokka> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read input");
                    break;
                }
            };
            if !line.trim().is_empty() {
                let _ = self.editor.add_history_entry(line.as_str());
            }

            match Command::parse(&line) {
                Command::Tables => self.list_tables(),
                Command::Open(target) => self.open_table(&target),
                Command::Show => self.show(),
                Command::Delete(row) => self.delete(row),
                Command::Add => self.add(),
                Command::Refresh => {
                    if self.workbench.refresh() {
                        self.watch_model();
                        self.show();
                    }
                }
                Command::Help => println!("{HELP}"),
                Command::Quit => break,
                Command::Empty => {}
                Command::Unknown(input) => {
                    eprintln!("Unknown command: {input}");
                    eprintln!("Type 'help' for available commands.");
                }
            }
        }
    }

    fn list_tables(&mut self) {
        if !self.workbench.load_tables() {
            return;
        }
        let tables = self.workbench.tables();
        if tables.is_empty() {
            println!("No tables found.");
            return;
        }
        println!("Tables:");
        for (i, table) in tables.iter().enumerate() {
            println!("  {i:>3}  {table}");
        }
    }

    fn open_table(&mut self, target: &str) {
        let table = match resolve_table(self.workbench.tables(), target) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("{e}");
                return;
            }
        };

        if self.workbench.select_table(&table) {
            self.watch_model();
            self.show();
        }
    }

    /// Print a line whenever rows leave the grid.
    fn watch_model(&mut self) {
        if let Some(model) = self.workbench.model_mut() {
            model.subscribe(|event| match event {
                TableEvent::RowsRemoved { first, last } if first == last => {
                    println!("Row {first} removed.");
                }
                TableEvent::RowsRemoved { first, last } => {
                    println!("Rows {first}-{last} removed.");
                }
            });
        }
    }

    fn show(&self) {
        match self.workbench.model() {
            Some(model) => print!("{}", format_grid(model)),
            None => println!("No table is open. Use 'open <table>'."),
        }
    }

    fn delete(&mut self, row: usize) {
        match self.workbench.delete_row(row) {
            Some(DeleteOutcome::Deleted { affected }) if affected > 1 => {
                println!("{affected} identical rows were deleted from the database.");
                self.show();
            }
            Some(DeleteOutcome::Deleted { .. }) => self.show(),
            Some(DeleteOutcome::Declined) => println!("Nothing deleted."),
            None => {}
        }
    }

    fn add(&mut self) {
        if !self.workbench.open_editor() {
            return;
        }

        loop {
            let Some(columns) = self.workbench.editor().columns().cloned() else {
                return;
            };
            println!("New row (Enter keeps the shown value, Ctrl-C cancels):");
            for (index, column) in columns.iter().enumerate() {
                let current = self
                    .workbench
                    .editor()
                    .fields()
                    .and_then(|fields| fields.get(index).cloned())
                    .unwrap_or_default();
                match self.workbench.prompter_mut().read_field(column, &current) {
                    Some(text) => {
                        self.workbench.editor_mut().set_field(index, text);
                    }
                    None => {
                        self.workbench.cancel_editor();
                        println!("Cancelled.");
                        return;
                    }
                }
            }

            let answer = self.workbench.prompter_mut().ask("[s]ave, [e]dit, [c]ancel? ");
            match answer.as_deref() {
                Some("s") | Some("save") | Some("") => {
                    if self.workbench.save_editor() {
                        println!("Row added. Use 'refresh' to see it.");
                        return;
                    }
                    // Form stays open with its values; loop to correct them.
                }
                Some("e") | Some("edit") => {}
                _ => {
                    self.workbench.cancel_editor();
                    println!("Cancelled.");
                    return;
                }
            }
        }
    }
}
