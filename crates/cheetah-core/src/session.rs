// crates/cheetah-core/src/session.rs - Session Manager
//
// Owns the notion of "the active sheet" and hands out short-lived connections
// to it. Every logical operation runs inside exactly one `with_session` call:
//
// ```text
// select_sheet("git")  ──▶  active = git
// commands().get_all() ──▶  open git.db ─▶ query ─▶ close
// tags().list_all()    ──▶  open git.db ─▶ query ─▶ close
// ```
//
// No connection outlives the operation that opened it, so switching sheets
// never has anything to tear down.

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info};

use crate::command::CommandStore;
use crate::error::{StoreError, StoreResult};
use crate::schema;
use crate::sheet::{SheetName, SheetRegistry};
use crate::tag::TagStore;

/// Tracks the active sheet and scopes connections to it
#[derive(Debug)]
pub struct SessionManager {
    registry: SheetRegistry,
    active: Option<SheetName>,
}

impl SessionManager {
    /// Start with no sheet selected
    pub fn new(registry: SheetRegistry) -> Self {
        Self {
            registry,
            active: None,
        }
    }

    pub fn registry(&self) -> &SheetRegistry {
        &self.registry
    }

    /// The currently selected sheet, if any
    pub fn is_active(&self) -> Option<&SheetName> {
        self.active.as_ref()
    }

    /// Gate for every data operation
    pub fn require_active(&self) -> StoreResult<&SheetName> {
        self.active.as_ref().ok_or(StoreError::NoSheetSelected)
    }

    /// Make `name` the active sheet
    ///
    /// Only existence is checked; the database is not opened until the next
    /// operation. On failure the previous selection stays in place.
    pub fn select_sheet(&mut self, name: &str) -> StoreResult<&SheetName> {
        let name = SheetName::parse(name)?;
        if !self.registry.exists(&name) {
            return Err(StoreError::SheetNotFound(name.to_string()));
        }

        info!(sheet = %name, "selected sheet");
        Ok(self.active.insert(name))
    }

    /// Create a new sheet and make it the active one
    pub fn create_sheet(&mut self, name: &str) -> StoreResult<&SheetName> {
        let name = SheetName::parse(name)?;
        self.registry.create_sheet(&name)?;
        Ok(self.active.insert(name))
    }

    /// Forget the active sheet
    pub fn deselect(&mut self) {
        self.active = None;
    }

    /// Run `body` against a fresh connection to the active sheet
    ///
    /// The connection has foreign-key enforcement on and is closed before
    /// returning, whatever `body` returned. Without an active sheet this
    /// fails with [`StoreError::NoSheetSelected`] before touching the disk.
    pub fn with_session<T, F>(&self, body: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Connection) -> StoreResult<T>,
    {
        let sheet = self.require_active()?;
        let path = self.registry.path_for(sheet);

        // Opened without CREATE: a sheet file that vanished is an error, not a
        // fresh empty sheet.
        let mut conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!(sheet = %sheet, "opened connection");

        let outcome = schema::enable_foreign_keys(&conn)
            .map_err(StoreError::from)
            .and_then(|()| body(&mut conn));

        let closed = conn.close().map_err(|(_, err)| StoreError::from(err));
        debug!(sheet = %sheet, "closed connection");

        let value = outcome?;
        closed?;
        Ok(value)
    }

    /// Command operations on the active sheet
    pub fn commands(&self) -> CommandStore<'_> {
        CommandStore::new(self)
    }

    /// Tag operations on the active sheet
    pub fn tags(&self) -> TagStore<'_> {
        TagStore::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(temp: &TempDir) -> SessionManager {
        SessionManager::new(SheetRegistry::new(temp.path().to_path_buf()))
    }

    #[test]
    fn test_starts_unselected() {
        let temp = TempDir::new().unwrap();
        let session = manager(&temp);
        assert!(session.is_active().is_none());
        assert!(matches!(
            session.with_session(|_| Ok(())),
            Err(StoreError::NoSheetSelected)
        ));
    }

    #[test]
    fn test_select_missing_sheet_keeps_previous() {
        let temp = TempDir::new().unwrap();
        let mut session = manager(&temp);
        session.create_sheet("first").unwrap();

        let err = session.select_sheet("second").unwrap_err();
        assert!(matches!(err, StoreError::SheetNotFound(_)));
        assert_eq!(session.is_active().unwrap().as_str(), "first");
    }

    #[test]
    fn test_select_rejects_multiple_words() {
        let temp = TempDir::new().unwrap();
        let mut session = manager(&temp);
        assert!(matches!(
            session.select_sheet("a b"),
            Err(StoreError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_create_activates_and_switching_works() {
        let temp = TempDir::new().unwrap();
        let mut session = manager(&temp);

        session.create_sheet("one").unwrap();
        session.create_sheet("two").unwrap();
        assert_eq!(session.is_active().unwrap().as_str(), "two");

        session.select_sheet("one").unwrap();
        assert_eq!(session.is_active().unwrap().as_str(), "one");

        session.deselect();
        assert!(session.is_active().is_none());
    }

    #[test]
    fn test_with_session_enables_foreign_keys() {
        let temp = TempDir::new().unwrap();
        let mut session = manager(&temp);
        session.create_sheet("fk").unwrap();

        let on: bool = session
            .with_session(|conn| Ok(conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?))
            .unwrap();
        assert!(on);
    }

    #[test]
    fn test_body_error_is_returned() {
        let temp = TempDir::new().unwrap();
        let mut session = manager(&temp);
        session.create_sheet("err").unwrap();

        let result: StoreResult<()> =
            session.with_session(|_| Err(StoreError::CommandNotFound(42)));
        assert!(matches!(result, Err(StoreError::CommandNotFound(42))));

        // the next operation still gets a working connection
        assert!(session.with_session(|_| Ok(())).is_ok());
    }

    #[test]
    fn test_vanished_sheet_file_is_fatal() {
        let temp = TempDir::new().unwrap();
        let mut session = manager(&temp);
        session.create_sheet("gone").unwrap();
        std::fs::remove_file(temp.path().join("gone.db")).unwrap();

        let err = session.with_session(|_| Ok(())).unwrap_err();
        assert!(err.is_fatal());
        assert!(!temp.path().join("gone.db").exists());
    }

    // Paths are plain file names, never SQLite URIs
    #[cfg(unix)]
    #[test]
    fn test_vault_path_that_looks_like_a_uri() {
        let dir = tempfile::Builder::new().prefix("file:").tempdir_in(".").unwrap();
        let relative = std::path::PathBuf::from(dir.path().file_name().unwrap());

        let mut session = SessionManager::new(SheetRegistry::new(relative));
        session.create_sheet("uri").unwrap();
        assert!(dir.path().join("uri.db").is_file());

        let count: i64 = session
            .with_session(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM commands", [], |row| row.get(0))?))
            .unwrap();
        assert_eq!(count, 0);
    }
}
