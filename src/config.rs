//! Optional TOML configuration.
//!
//! Looked up from `--config FILE`, else `$LINESEEK_CONFIG`, else defaults.
//! Command-line flags override whatever the file says.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LineseekError;

pub const CONFIG_ENV: &str = "LINESEEK_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Prefix output lines with their line number.
    pub number_lines: bool,
    /// Emit JSON instead of text.
    pub json: bool,
    /// Pager command for long output on a terminal. Falls back to `$PAGER`,
    /// then `less`.
    pub pager: Option<String>,
    /// Output taller than this many lines goes through the pager. Falls back
    /// to `$LINES`, then 24.
    pub pager_threshold: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            number_lines: true,
            json: false,
            pager: None,
            pager_threshold: None,
        }
    }
}

impl Config {
    /// Load from `path`, or from `$LINESEEK_CONFIG` when `path` is `None`.
    /// No file at all means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, LineseekError> {
        let path: Option<PathBuf> = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(p) => Self::from_file(&p),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, LineseekError> {
        let text = fs::read_to_string(path).map_err(|e| LineseekError::from_io(path, e))?;
        let config = Self::parse(&text).map_err(|reason| LineseekError::Config {
            path: path.to_path_buf(),
            reason,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.message().to_string())
    }

    #[must_use]
    pub fn pager_command(&self) -> PagerCommand {
        let cmd = self
            .pager
            .clone()
            .or_else(|| std::env::var("PAGER").ok())
            .unwrap_or_default();
        PagerCommand::parse(&cmd)
    }

    #[must_use]
    pub fn terminal_height(&self) -> usize {
        if let Some(h) = self.pager_threshold {
            return h;
        }
        // LINES is set by some shells
        std::env::var("LINES")
            .ok()
            .and_then(|l| l.parse::<usize>().ok())
            .unwrap_or(24)
    }
}

/// A pager split into program and arguments, ready for `Command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl PagerCommand {
    /// Split on whitespace; blank means `less`. Only `less` gets `-R`, so
    /// escape sequences in the file pass through to the terminal.
    #[must_use]
    pub fn parse(cmd: &str) -> Self {
        let mut words = cmd.split_whitespace().map(str::to_string);
        let program = words.next().unwrap_or_else(|| "less".into());
        let mut args: Vec<String> = words.collect();
        let is_less = Path::new(&program).file_name().is_some_and(|n| n == "less");
        if is_less && !args.iter().any(|a| a == "-R") {
            args.push("-R".into());
        }
        Self { program, args }
    }
}
