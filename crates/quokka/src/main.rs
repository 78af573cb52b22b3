//! Quokka - Browse and edit tables in Access and SQLite files.

mod app;
mod grid;
mod prompter;

use std::process::ExitCode;

use app::QuokkaApp;
use prompter::TerminalPrompter;
use quokka_core::logging::{init_logging, log_dir, LogConfig};
use quokka_core::AppConfig;

fn main() -> ExitCode {
    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("Cannot determine working directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Config is read before logging so its filter applies from the start.
    let config = AppConfig::load(&cwd);

    let mut log_config = LogConfig::new(log_dir());
    if let Some(filter) = config.as_ref().ok().and_then(|c| c.log_filter.clone()) {
        log_config = log_config.with_filter(filter);
    }
    let _logging_guard = init_logging(log_config);

    tracing::info!("Starting Quokka");

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let prompter = match TerminalPrompter::new() {
        Ok(prompter) => prompter,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize terminal");
            eprintln!("Failed to initialize terminal: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = match QuokkaApp::new(config.descriptor(&cwd), prompter) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize terminal");
            eprintln!("Failed to initialize terminal: {e}");
            return ExitCode::FAILURE;
        }
    };

    app.run();
    tracing::info!("Quokka exited");
    ExitCode::SUCCESS
}
