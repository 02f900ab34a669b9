// crates/cheetah-core/src/config.rs - Settings File
//
// Cheetah keeps its settings in a plain key-value file, one `KEY value` pair
// per line, read once at startup:
//
// ```text
// # where sheets live
// VAULT $HOME/cheatsheets
// ```
//
// CONFIGURATION HIERARCHY (highest to lowest priority):
// 1. Command-line argument (--vault)
// 2. Environment variable (CHEETAH_VAULT)
// 3. Settings file (--settings, CHEETAH_SETTINGS, or ~/.config/cheetah/settings)
//
// Only the settings file is handled here; the CLI layers the other two on top.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Key holding the vault directory
pub const VAULT_KEY: &str = "VAULT";

/// Errors that can occur while loading the settings file
///
/// All of these are fatal for the current invocation.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Malformed line {line} in {}: '{content}'", file.display())]
    Malformed {
        file: PathBuf,
        line: usize,
        content: String,
    },

    #[error("Missing required key '{key}' in {}", file.display())]
    MissingKey { file: PathBuf, key: &'static str },

    #[error("Could not determine the home directory")]
    NoHomeDir,

    #[error("I/O error on settings file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Parsed settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding one database file per sheet
    pub vault_path: PathBuf,

    /// Every key found in the file, values already expanded
    pub values: HashMap<String, String>,
}

impl Settings {
    /// Default settings location: `$HOME/.config/cheetah/settings`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let home = dirs::home_dir().ok_or(SettingsError::NoHomeDir)?;
        Ok(home.join(".config").join("cheetah").join("settings"))
    }

    /// Read and parse the settings file at `path`
    pub fn load(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading settings");
        Self::parse(&content, path)
    }

    /// Parse settings text; `origin` is only used in error messages
    ///
    /// RULES:
    /// - Blank lines and lines starting with `#` are skipped
    /// - Each remaining line splits at its first space into key and value
    /// - A line with no space is malformed
    /// - Values get `$VAR` / `${VAR}` expansion
    pub fn parse(content: &str, origin: &Path) -> SettingsResult<Self> {
        let mut values = HashMap::new();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim_end();
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once(' ') else {
                return Err(SettingsError::Malformed {
                    file: origin.to_path_buf(),
                    line: index + 1,
                    content: line.to_string(),
                });
            };

            values.insert(key.trim().to_string(), expand_env(value.trim()));
        }

        let vault = values.get(VAULT_KEY).ok_or(SettingsError::MissingKey {
            file: origin.to_path_buf(),
            key: VAULT_KEY,
        })?;

        Ok(Self {
            vault_path: PathBuf::from(vault),
            values,
        })
    }

    /// First-run bootstrap: create the vault directory and write a settings file
    ///
    /// Parent directories of both paths are created as needed. An existing
    /// settings file is overwritten.
    pub fn bootstrap(settings_path: &Path, vault_path: &Path) -> SettingsResult<Self> {
        fs::create_dir_all(vault_path)?;
        if let Some(parent) = settings_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(
            settings_path,
            format!("{} {}\n", VAULT_KEY, vault_path.display()),
        )?;
        debug!(path = %settings_path.display(), "wrote initial settings");

        Self::load(settings_path)
    }
}

/// Expand `$VAR` and `${VAR}` references from the environment
///
/// Unset variables are left untouched, matching what a shell's `expandvars`
/// does.
pub fn expand_env(value: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
            .expect("env var pattern is valid")
    });

    pattern
        .replace_all(value, |caps: &Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            env::var(name).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
