//! Application Configuration
//! Source path, column schema and window title, optionally read from a JSON file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "roster_viewer.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Column names of the student roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    pub name: String,
    pub enrollment_number: String,
    pub roll_number: String,
    pub batch: String,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            name: "Name".to_string(),
            enrollment_number: "Enrollment_Number".to_string(),
            roll_number: "Roll_Number".to_string(),
            batch: "Batch".to_string(),
        }
    }
}

impl ColumnSchema {
    /// Friendly header for a column, falling back to its raw name.
    pub fn display_name<'a>(&self, column: &'a str) -> &'a str {
        if column == self.name {
            "Student Name"
        } else if column == self.enrollment_number {
            "Enrollment Number"
        } else if column == self.roll_number {
            "Roll Number"
        } else if column == self.batch {
            "Batch Year"
        } else {
            column
        }
    }
}

/// Settings passed into the load operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub source_path: PathBuf,
    pub title: String,
    pub columns: ColumnSchema,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("ct_bcit_students.csv"),
            title: "NED University CT/BCIT Students List (1999-2000 to 2008-2009)".to_string(),
            columns: ColumnSchema::default(),
        }
    }
}

impl RosterConfig {
    /// Read a config file. Fields absent from the file keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `roster_viewer.json` if present, otherwise defaults.
    ///
    /// A broken config file is logged and ignored so the viewer still starts.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(config) => {
                info!(path = %path.display(), source = %config.source_path.display(), "loaded config");
                config
            }
            Err(e) => {
                warn!("{e}; using default config");
                Self::default()
            }
        }
    }
}
