// crates/cheetah-core/src/error.rs - Store error taxonomy

use std::path::PathBuf;
use thiserror::Error;

use crate::command::CommandId;

/// Errors that can occur while working with sheets, commands and tags
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid {what} '{value}': expected a single plain word")]
    InvalidToken { what: &'static str, value: String },

    #[error("Invalid id '{0}': specify <int> or <int>-<int>")]
    InvalidId(String),

    #[error("Tool cannot be empty")]
    EmptyTool,

    #[error("Sheet '{0}' does not exist")]
    SheetNotFound(String),

    #[error("Sheet '{0}' already exists")]
    SheetExists(String),

    #[error("No command with id {0}")]
    CommandNotFound(CommandId),

    #[error("No sheet selected")]
    NoSheetSelected,

    #[error("Vault directory is not usable: {}", .0.display())]
    VaultUnavailable(PathBuf),

    #[error("Could not apply schema to {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad classes of [`StoreError`], used by callers to decide how to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input; nothing was touched
    Usage,
    /// A named sheet or command is missing
    NotFound,
    /// A sheet with that name already exists
    Conflict,
    /// A data operation ran without an active sheet
    Precondition,
    /// Storage or vault failure; the process should stop
    Fatal,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidToken { .. } | Self::InvalidId(_) | Self::EmptyTool => ErrorKind::Usage,
            Self::SheetNotFound(_) | Self::CommandNotFound(_) => ErrorKind::NotFound,
            Self::SheetExists(_) => ErrorKind::Conflict,
            Self::NoSheetSelected => ErrorKind::Precondition,
            Self::VaultUnavailable(_) | Self::Schema { .. } | Self::Database(_) | Self::Io(_) => {
                ErrorKind::Fatal
            }
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Fatal
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Ensure `value` is a single non-empty whitespace-free token
pub(crate) fn single_token(what: &'static str, value: &str) -> StoreResult<String> {
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(token), None) => Ok(token.to_string()),
        _ => Err(StoreError::InvalidToken {
            what,
            value: value.to_string(),
        }),
    }
}
