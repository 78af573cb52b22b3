//! Connection descriptor models.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// ODBC driver used for Access files when none is configured.
pub const DEFAULT_ACCESS_DRIVER: &str = "Microsoft Access Driver (*.mdb, *.accdb)";

/// Driver used to reach the database file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// An ODBC driver identified by its registered name.
    Odbc {
        /// Driver name as registered with the driver manager.
        name: String,
    },
    /// A SQLite file opened in-process.
    Sqlite,
}

impl Default for Driver {
    fn default() -> Self {
        Self::Odbc { name: DEFAULT_ACCESS_DRIVER.to_string() }
    }
}

impl Driver {
    /// Convert to string representation for storage.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Odbc { name } => name,
            Self::Sqlite => "sqlite",
        }
    }

    /// Parse from string representation.
    ///
    /// `"sqlite"` selects the in-process driver; anything else names an ODBC driver.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("sqlite") {
            Self::Sqlite
        } else if trimmed.is_empty() {
            Self::default()
        } else {
            Self::Odbc { name: trimmed.to_string() }
        }
    }
}

/// Everything needed to open a connection to one database file.
///
/// Built once per operation and passed explicitly; there is no shared open
/// connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    driver: Driver,
    database: PathBuf,
    charset: Option<String>,
}

impl ConnectionDescriptor {
    /// Create a descriptor for the given driver and file.
    pub fn new(driver: Driver, database: impl Into<PathBuf>) -> Self {
        Self { driver, database: database.into(), charset: None }
    }

    /// Create a descriptor for an Access file through the default ODBC driver.
    pub fn access(database: impl Into<PathBuf>) -> Self {
        Self::new(Driver::default(), database)
    }

    /// Create a descriptor for a SQLite file.
    pub fn sqlite(database: impl Into<PathBuf>) -> Self {
        Self::new(Driver::Sqlite, database)
    }

    /// Set the character-set hint passed to the driver.
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Get the driver.
    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Get the database file path.
    pub fn database(&self) -> &Path {
        &self.database
    }

    /// Get the character-set hint.
    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    /// Render the ODBC connection string.
    pub fn connection_string(&self) -> String {
        let mut out = format!(
            "Driver={{{}}};DBQ={};",
            self.driver.as_str(),
            self.database.display()
        );
        if let Some(charset) = &self.charset {
            out.push_str(&format!("CHARSET={charset};"));
        }
        out
    }

    /// Short label for logs and window titles.
    pub fn display_name(&self) -> String {
        let file = self
            .database
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.database.display().to_string());
        format!("{file} ({})", self.driver.as_str())
    }
}
