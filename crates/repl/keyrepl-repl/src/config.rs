//! Console configuration.
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or no file at all) yields a working console.
//!
//! ```toml
//! [session]
//! chunk_name = "=stdin"
//! transcript_limit = 256
//!
//! [display]
//! width = 640
//! height = 480
//!
//! [interpreter]
//! max_expr_depth = 64
//! max_operations = 0
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::pointer::Bounds;

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplConfig {
    /// Statement and transcript settings.
    pub session: SessionConfig,
    /// Screen geometry for the pointer and key cursor.
    pub display: DisplayConfig,
    /// Interpreter resource limits.
    pub interpreter: InterpreterConfig,
}

/// `[session]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Name attached to every chunk handed to the interpreter.
    pub chunk_name: String,
    /// Maximum number of transcript lines retained.
    pub transcript_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chunk_name: "=stdin".into(),
            transcript_limit: 256,
        }
    }
}

/// `[display]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Frame width in pixels.
    pub width: u16,
    /// Frame height in pixels.
    pub height: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

impl DisplayConfig {
    /// Frame bounds used for clamping.
    pub fn bounds(self) -> Bounds {
        Bounds {
            width: i32::from(self.width),
            height: i32::from(self.height),
        }
    }
}

/// `[interpreter]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterpreterConfig {
    /// Maximum expression nesting depth, 0 for unlimited.
    pub max_expr_depth: usize,
    /// Maximum operations per call, 0 for unlimited.
    pub max_operations: u64,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_expr_depth: 64,
            max_operations: 0,
        }
    }
}

impl ReplConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid TOML or
    /// contains unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
