//! # Cheetah Core
//!
//! Storage layer for the cheetah cheatsheet manager.
//!
//! Commands (tool, arguments, description, tags) live in named *sheets*, each
//! one a SQLite file inside a *vault* directory. A [`SessionManager`] tracks
//! the active sheet and opens one connection per operation; the
//! [`CommandStore`] and [`TagStore`] it hands out do the actual work.
//!
//! ```no_run
//! use cheetah_core::{NewCommand, SessionManager, SheetRegistry};
//!
//! # fn main() -> cheetah_core::StoreResult<()> {
//! let mut session = SessionManager::new(SheetRegistry::open("/tmp/vault".into())?);
//! session.create_sheet("git")?;
//!
//! let id = session
//!     .commands()
//!     .insert(&NewCommand::new("git", "status -sb", "short status")?.with_tags(["vcs"]))?;
//! assert!(session.commands().get_by_id(id)?.is_some());
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod id;
pub mod schema;
pub mod session;
pub mod sheet;
pub mod tag;

pub use command::{Command, CommandId, CommandStore, CommandUpdate, CommandWithTags, NewCommand, TagMatches};
pub use config::{Settings, SettingsError};
pub use error::{ErrorKind, StoreError, StoreResult};
pub use id::{parse_id, parse_id_list};
pub use session::SessionManager;
pub use sheet::{SheetName, SheetRegistry};
pub use tag::{Tag, TagStore};
