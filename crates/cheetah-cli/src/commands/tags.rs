use anyhow::Result;

use crate::context::Context;
use crate::output;

/// `tools`: distinct tools in the sheet
pub fn tools(ctx: &Context) -> Result<()> {
    let tools = ctx.session.tags().list_distinct_tools()?;
    if tools.is_empty() {
        output::plain("No tools found. Maybe sheet is empty?");
        return Ok(());
    }

    output::plain("\nAvailable tools:");
    for tool in tools {
        output::plain(format!("    - {tool}"));
    }
    Ok(())
}

/// `tags`: every tag in the sheet
pub fn tags(ctx: &Context) -> Result<()> {
    let tags = ctx.session.tags().list_all()?;
    if tags.is_empty() {
        output::plain("No tags found. Maybe sheet is empty?");
        return Ok(());
    }

    output::plain("\nAvailable tags:");
    for tag in tags {
        output::plain(format!("    {tag}"));
    }
    Ok(())
}

/// Tags of one command, as shown in the edit sub-prompt
pub fn for_command(ctx: &Context, id: i64) -> Result<()> {
    let tags = ctx.session.tags().list_for_command(id)?;
    output::plain("\nTags:");
    for tag in tags {
        output::plain(format!("    {tag}"));
    }
    Ok(())
}

/// `prune`: drop tags no command uses any more
pub fn prune(ctx: &Context) -> Result<()> {
    let pruned = ctx.session.tags().prune_orphans()?;
    output::success(format!("Pruned {pruned} unused tag(s)."));
    Ok(())
}
