// crates/cheetah-cli/src/commands/mod.rs - Command Handler Modules
//
// Each prompt action (and each non-interactive subcommand) lives in one of
// these modules. Handlers parse their free-text arguments, call into
// cheetah-core and render the result; the storage rules live in the core.
//
// MODULE ORGANIZATION:
// - sheets: list, create and select sheets
// - list: ls, tool, tag
// - tags: tools, tags, prune
// - add / remove / edit / copy: single-command workflows
// - export: JSON dump of one sheet
// - help: help text

pub mod add;
pub mod copy;
pub mod edit;
pub mod export;
pub mod help;
pub mod list;
pub mod remove;
pub mod sheets;
pub mod tags;

use anyhow::Result;
use cheetah_core::{ErrorKind, StoreError};

use crate::output;

/// Report recoverable store errors and keep going; pass everything else up
///
/// Usage, not-found, conflict and "no sheet selected" errors are shown to the
/// user. Fatal store errors and non-store errors end the session.
pub fn recover(result: Result<()>) -> Result<()> {
    let Err(err) = result else {
        return Ok(());
    };

    match err.downcast::<StoreError>() {
        Ok(store) => match store.kind() {
            ErrorKind::Fatal => Err(store.into()),
            ErrorKind::Precondition => {
                output::bad_input("Please select a sheet");
                Ok(())
            }
            _ => {
                output::bad_input(format!("Error: {store}"));
                Ok(())
            }
        },
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recover_swallows_recoverable_errors() {
        assert!(recover(Err(StoreError::NoSheetSelected.into())).is_ok());
        assert!(recover(Err(StoreError::InvalidId("x".into()).into())).is_ok());
        assert!(recover(Err(StoreError::SheetExists("a".into()).into())).is_ok());
    }

    #[test]
    fn test_recover_passes_fatal_errors() {
        let io = std::io::Error::other("disk gone");
        assert!(recover(Err(StoreError::Io(io).into())).is_err());
        assert!(recover(Err(anyhow::anyhow!("not a store error"))).is_err());
    }
}
