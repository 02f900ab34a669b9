use anyhow::Result;
use cheetah_core::parse_id;

use crate::context::Context;
use crate::output;
use crate::services::ClipboardService;

/// `cp <id>`: copy `tool args` to the clipboard
///
/// A missing clipboard program is a warning, not an error.
pub fn handle(ctx: &Context, args: &str) -> Result<()> {
    ctx.session.require_active()?;

    let id = parse_id(args)?;
    let Some(command) = ctx.session.commands().get_by_id(id)? else {
        output::bad_input(format!("Error: id {id} does not exist."));
        return Ok(());
    };

    match ClipboardService::copy(&command.command_line()) {
        Ok(()) => output::success("Copied!"),
        Err(err) => output::warning(format!("Could not copy to clipboard: {err:#}")),
    }
    Ok(())
}
