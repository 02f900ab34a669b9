use anyhow::Result;
use cheetah_core::parse_id_list;

use crate::context::Context;
use crate::output;

/// `rm <id> <start>-<end> ...`: delete commands
///
/// Reports partial success when some ids did not exist.
pub fn handle(ctx: &Context, args: &str) -> Result<()> {
    ctx.session.require_active()?;

    let ids = parse_id_list(args)?;
    if ids.is_empty() {
        output::bad_input("Error: specify <int> or <int>-<int> ids to delete.");
        return Ok(());
    }

    let deleted = ctx.session.commands().delete(ids.iter().copied())?;
    if deleted == ids.len() {
        output::success(format!("Deleted {deleted} rows."));
    } else {
        output::warning(format!("Deleted {deleted} rows out of {}.", ids.len()));
    }
    Ok(())
}
