// crates/cheetah-core/src/sheet.rs - Sheet Registry
//
// A sheet is a named collection of commands stored in its own SQLite file
// inside the vault directory:
//
// ```text
// vault/
// ├── docker.db
// ├── git.db
// └── network.db
// ```
//
// The registry only knows about files; it never keeps a connection open.

use rusqlite::{Connection, OpenFlags};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult, single_token};
use crate::schema;

/// File extension of sheet databases
pub const SHEET_EXTENSION: &str = "db";

/// A validated sheet name
///
/// One whitespace-free token that is also a plain file name: no path
/// separators, no NUL, and not `.` or `..`. Each name maps to exactly one
/// file directly inside the vault.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SheetName(String);

impl SheetName {
    pub fn parse<S: AsRef<str>>(s: S) -> StoreResult<Self> {
        let name = single_token("sheet name", s.as_ref())?;

        let plain_file = Path::new(&name).file_name().and_then(|f| f.to_str()) == Some(name.as_str());
        if !plain_file || name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
            return Err(StoreError::InvalidToken {
                what: "sheet name",
                value: name,
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SheetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SheetName {
    type Err = StoreError;

    fn from_str(s: &str) -> StoreResult<Self> {
        Self::parse(s)
    }
}

/// Enumerates, creates and locates sheet files within the vault
#[derive(Debug, Clone)]
pub struct SheetRegistry {
    vault_path: PathBuf,
}

impl SheetRegistry {
    /// Create a registry over `vault_path`
    ///
    /// Construction does not touch the file system; see [`SheetRegistry::open`]
    /// for a validating constructor.
    pub fn new(vault_path: PathBuf) -> Self {
        Self { vault_path }
    }

    /// Create a registry and check that the vault is an existing directory
    pub fn open(vault_path: PathBuf) -> StoreResult<Self> {
        if !vault_path.is_dir() {
            return Err(StoreError::VaultUnavailable(vault_path));
        }
        Ok(Self::new(vault_path))
    }

    pub fn vault_path(&self) -> &Path {
        &self.vault_path
    }

    /// Path of the database file backing `name`
    pub fn path_for(&self, name: &SheetName) -> PathBuf {
        self.vault_path
            .join(format!("{}.{}", name.as_str(), SHEET_EXTENSION))
    }

    pub fn exists(&self, name: &SheetName) -> bool {
        self.path_for(name).is_file()
    }

    /// All sheets in the vault, sorted by name
    ///
    /// A missing or unreadable vault yields an empty list; callers that care
    /// should validate the vault up front with [`SheetRegistry::open`].
    pub fn list_sheets(&self) -> Vec<SheetName> {
        let Ok(entries) = fs::read_dir(&self.vault_path) else {
            return Vec::new();
        };

        let mut sheets: Vec<SheetName> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().is_some_and(|ext| ext == SHEET_EXTENSION))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .and_then(|stem| SheetName::parse(stem).ok())
            })
            .collect();

        sheets.sort();
        sheets
    }

    /// Create a new, empty sheet from the fixed schema
    ///
    /// Fails with [`StoreError::SheetExists`] if the file is already there.
    /// If the schema cannot be applied the partial file is removed again.
    pub fn create_sheet(&self, name: &SheetName) -> StoreResult<()> {
        let path = self.path_for(name);
        if path.exists() {
            return Err(StoreError::SheetExists(name.to_string()));
        }

        let mut conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        schema::enable_foreign_keys(&conn)?;
        if let Err(source) = schema::apply(&mut conn) {
            drop(conn);
            if let Err(err) = fs::remove_file(&path) {
                debug!(path = %path.display(), %err, "could not remove partial sheet");
            }
            return Err(StoreError::Schema { path, source });
        }
        conn.close().map_err(|(_, err)| err)?;

        info!(sheet = %name, path = %path.display(), "created sheet");
        Ok(())
    }
}
