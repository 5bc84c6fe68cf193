//! REPL and interpreter configuration
//!
//! Read from a TOML file; every key is optional.
//!
//! ```toml
//! prompt = "mylisp> "
//! history = true
//! history_file = ".mylisp_history"
//! show_ast = false
//! max_depth = 10000
//! ```

use crate::error::{CompileError, Result};
use crate::interp::DEFAULT_MAX_DEPTH;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROMPT: &str = "mylisp> ";
pub const DEFAULT_HISTORY_FILE: &str = ".mylisp_history";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub prompt: String,
    /// Persist line history between sessions
    pub history: bool,
    /// History file; relative paths are resolved against the home directory
    pub history_file: PathBuf,
    /// Print the parse tree before each result
    pub show_ast: bool,
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: DEFAULT_PROMPT.to_string(),
            history: true,
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            show_ast: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(source).map_err(|e| CompileError::config_error(e.message()))?;
        if config.max_depth == 0 {
            return Err(CompileError::config_error("max_depth must be at least 1"));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| CompileError::io_error(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Where history is kept, if history is enabled and a location exists
    pub fn history_path(&self) -> Option<PathBuf> {
        if !self.history {
            return None;
        }
        if self.history_file.is_absolute() {
            return Some(self.history_file.clone());
        }
        dirs_home().map(|home| home.join(&self.history_file))
    }
}

/// Get home directory
pub fn dirs_home() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}
