use anyhow::Result;

use crate::context::Context;

/// `cheetah export <sheet>`: every command with its tags as pretty JSON
///
/// ```bash
/// cheetah export git | jq -r '.[] | "\(.tool) \(.args)"'
/// ```
pub fn handle(ctx: &mut Context, sheet: &str) -> Result<()> {
    ctx.session.select_sheet(sheet)?;
    let commands = ctx.session.commands().export_all()?;
    println!("{}", serde_json::to_string_pretty(&commands)?);
    Ok(())
}
