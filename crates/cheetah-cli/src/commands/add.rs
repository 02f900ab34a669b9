// crates/cheetah-cli/src/commands/add.rs - Add a command to the active sheet
//
// Walks the user through four prompts:
//
// ```text
// git / add / tool      (exactly one word, re-asked until valid)
// git / add / args
// git / add / desc
// git / add / tag 1     (one per line, blank line to finish)
// ```
//
// The tool is always stored as one of the command's tags.

use anyhow::Result;
use cheetah_core::NewCommand;

use crate::context::Context;
use crate::output;
use crate::stdin::Prompt;

pub fn handle(ctx: &Context, prompt: &mut Prompt) -> Result<()> {
    // gate before the first prompt
    let sheet = ctx.session.require_active()?.to_string();

    let Some(tool) = prompt.read_required(&format!("\n{sheet} / add / tool"), Some(1))? else {
        return Ok(());
    };
    let Some(args) = prompt.read_line(&format!("\n{sheet} / add / args"))? else {
        return Ok(());
    };
    let Some(desc) = prompt.read_line(&format!("\n{sheet} / add / desc"))? else {
        return Ok(());
    };
    let Some(tags) = prompt.read_list(&format!("\n{sheet} / add / tag"))? else {
        return Ok(());
    };

    let command = NewCommand::new(&tool, &args, &desc)?.with_tags(&tags);
    let id = ctx.session.commands().insert(&command)?;

    output::success(format!("\nAdded command {id}."));
    Ok(())
}
