//! Application configuration.
//!
//! Read from `quokka.json` in the working directory when present:
//!
//! ```json
//! {
//!   "database": "library.accdb",
//!   "driver": "Microsoft Access Driver (*.mdb, *.accdb)",
//!   "charset": "UTF8",
//!   "log_filter": "info"
//! }
//! ```
//!
//! Every key is optional.
//!
//! # Data Directory Locations
//!
//! - **macOS**: `~/Library/Application Support/dev.quokka.Quokka`
//! - **Windows**: `%APPDATA%\quokka\Quokka`
//! - **Linux**: `~/.local/share/quokka`
//! - **Debug builds**: `./quokka_data` in current directory

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::QuokkaError;
use crate::models::{ConnectionDescriptor, Driver, DEFAULT_ACCESS_DRIVER};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "quokka.json";

/// Database file opened when none is configured.
pub const DEFAULT_DATABASE: &str = "database.accdb";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database file, relative to the working directory unless absolute.
    pub database: PathBuf,
    /// ODBC driver name, or `sqlite`.
    pub driver: String,
    /// Character-set hint passed to the driver.
    pub charset: Option<String>,
    /// Log filter directive overriding the build default.
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            driver: DEFAULT_ACCESS_DRIVER.to_string(),
            charset: None,
            log_filter: None,
        }
    }
}

impl AppConfig {
    /// Load `quokka.json` from `dir`, or defaults when the file does not exist.
    pub fn load(dir: &Path) -> Result<Self, QuokkaError> {
        Self::load_from(&dir.join(CONFIG_FILE_NAME))
    }

    /// Load a configuration file, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, QuokkaError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(QuokkaError::config(format!(
                    "Failed to read '{}': {e}",
                    path.display()
                )))
            }
        };

        let config: Self = serde_json::from_str(&text).map_err(|e| {
            QuokkaError::config(format!("Invalid config '{}': {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Build the connection descriptor, resolving the database path against `cwd`.
    pub fn descriptor(&self, cwd: &Path) -> ConnectionDescriptor {
        let database =
            if self.database.is_absolute() { self.database.clone() } else { cwd.join(&self.database) };
        let descriptor = ConnectionDescriptor::new(Driver::parse(&self.driver), database);
        match &self.charset {
            Some(charset) => descriptor.with_charset(charset),
            None => descriptor,
        }
    }
}

/// Get the default data directory for the application.
pub fn default_data_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from("./quokka_data")
    }

    #[cfg(not(debug_assertions))]
    {
        dirs::data_dir()
            .map(|d| {
                #[cfg(target_os = "macos")]
                {
                    d.join("dev.quokka.Quokka")
                }
                #[cfg(target_os = "windows")]
                {
                    d.join("quokka").join("Quokka")
                }
                #[cfg(not(any(target_os = "macos", target_os = "windows")))]
                {
                    d.join("quokka")
                }
            })
            .unwrap_or_else(|| PathBuf::from("./quokka_data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "database": "books.db", "driver": "sqlite" }"#,
        )
        .unwrap();

        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.database, PathBuf::from("books.db"));
        assert_eq!(config.charset, None);

        let descriptor = config.descriptor(dir.path());
        assert_eq!(descriptor.driver(), &Driver::Sqlite);
        assert_eq!(descriptor.database(), dir.path().join("books.db"));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ database: ").unwrap();
        assert!(matches!(AppConfig::load(dir.path()), Err(QuokkaError::Config { .. })));
    }

    #[test]
    fn test_descriptor_resolves_relative_path_and_charset() {
        let config = AppConfig { charset: Some("UTF8".into()), ..AppConfig::default() };
        let descriptor = config.descriptor(Path::new("/work"));
        assert_eq!(descriptor.database(), Path::new("/work/database.accdb"));
        assert_eq!(descriptor.charset(), Some("UTF8"));
        assert_eq!(descriptor.driver(), &Driver::default());
    }
}
