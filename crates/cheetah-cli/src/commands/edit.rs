// crates/cheetah-cli/src/commands/edit.rs - Edit a stored command
//
// `edit <id> [tool] [args] [desc] [tags]`
//
// Each named field (all four when none are named) is prompted with its
// current value already typed in; the submitted line becomes the new value,
// so args and desc can be erased. `tags` opens a small sub-prompt:
//
// ```text
// add <tag> <tag> ...   attach tags
// rm <tag> <tag> ...    detach tags
// ls                    show current tags
// h                     help
// (blank line)          done
// ```
//
// Field changes are written in one update at the end, then the command is
// shown again.

use anyhow::Result;
use cheetah_core::{CommandId, CommandUpdate, StoreError, parse_id};

use crate::commands::{help, list, tags};
use crate::context::Context;
use crate::output;
use crate::stdin::Prompt;

const FIELDS: [&str; 4] = ["tool", "args", "desc", "tags"];

pub fn handle(ctx: &Context, prompt: &mut Prompt, args: &str) -> Result<()> {
    let sheet = ctx.session.require_active()?.to_string();

    let mut words = args.split_whitespace();
    let Some(id) = words.next() else {
        output::bad_input("Error: specify the id of the command.");
        output::plain("Optional: specify attributes to edit (tool, args, desc, tags)");
        return Ok(());
    };
    let id = parse_id(id)?;

    let command = ctx
        .session
        .commands()
        .get_by_id(id)?
        .ok_or(StoreError::CommandNotFound(id))?;

    let mut fields: Vec<&str> = Vec::new();
    for word in words {
        if !fields.contains(&word) {
            fields.push(word);
        }
    }
    if fields.is_empty() {
        fields.extend(FIELDS);
    }

    let mut update = CommandUpdate::default();
    let mut edit_tags = false;

    for field in fields {
        let current = match field {
            "tool" => &command.tool,
            "args" => &command.args,
            "desc" => &command.desc,
            "tags" => {
                edit_tags = true;
                continue;
            }
            other => {
                output::plain(format!(
                    "\nNo such attribute '{other}' ('tool', 'args', 'desc', 'tags')"
                ));
                continue;
            }
        };

        let label = format!("\n{sheet} / edit / {id} / {field}");
        let Some(value) = prompt.read_with_default(&label, current)? else {
            return Ok(());
        };
        if &value == current {
            continue;
        }

        match field {
            "tool" => update.tool = Some(value),
            "args" => update.args = Some(value),
            _ => update.desc = Some(value),
        }
    }

    if edit_tags {
        edit_tag_loop(ctx, prompt, &sheet, id)?;
    }

    if !update.is_empty() {
        ctx.session.commands().update(id, &update)?;
    }

    list::show_one(ctx, &id.to_string())
}

fn edit_tag_loop(
    ctx: &Context,
    prompt: &mut Prompt,
    sheet: &str,
    id: CommandId,
) -> Result<()> {
    let label = format!("\n{sheet} / edit / {id} / tags (h for help)");

    while let Some(line) = prompt.read_line(&label)? {
        let mut words = line.split_whitespace();
        let Some(action) = words.next() else {
            break;
        };
        let tags: Vec<&str> = words.collect();

        match action {
            "h" => help::edit_tags_help(),
            "ls" => tags::for_command(ctx, id)?,
            "add" if !tags.is_empty() => {
                ctx.session.tags().attach(id, &tags)?;
                output::success(format!("Attached {} tag(s).", tags.len()));
            }
            "rm" if !tags.is_empty() => {
                let removed = ctx.session.tags().detach(id, &tags)?;
                output::success(format!("Removed {removed} tag(s)."));
            }
            _ => output::bad_input("Error: specify add/rm followed by tag(s)"),
        }
    }
    Ok(())
}
