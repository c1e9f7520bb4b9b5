//! # Configuration
//!
//! Editor settings are read from an optional TOML file. Every key is
//! optional; missing keys fall back to the compiled defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `default_size` | `15` | Side length of a new blank puzzle |
//! | `history_limit` | unbounded | Maximum number of undoable edits kept |
//! | `require_square` | `true` | Reject non-square grids on import |

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use super::types::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Side length of a new blank puzzle.
    pub default_size: usize,
    /// Undo depth cap. `None` keeps every edit for the whole session.
    pub history_limit: Option<usize>,
    /// Reject non-square grids when importing.
    pub require_square: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_size: 15,
            history_limit: None,
            require_square: true,
        }
    }
}

impl EditorConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading editor config from {}", path.display());
        Self::from_toml(&fs::read_to_string(path)?)
    }
}
