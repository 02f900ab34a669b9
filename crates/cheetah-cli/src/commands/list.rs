use anyhow::Result;
use cheetah_core::{Command, parse_id};
use console::Style;

use crate::context::Context;
use crate::output;

/// `ls` lists every command; `ls <id>` shows one
pub fn handle(ctx: &Context, args: &str) -> Result<()> {
    if args.is_empty() {
        let commands = ctx.session.commands().get_all()?;
        if commands.is_empty() {
            output::plain("\nNo commands yet. Add one with 'add'.");
            return Ok(());
        }
        print_commands(&commands, None);
        return Ok(());
    }

    show_one(ctx, args)
}

/// Print a single command by id
pub fn show_one(ctx: &Context, id: &str) -> Result<()> {
    let id = parse_id(id)?;
    match ctx.session.commands().get_by_id(id)? {
        Some(command) => print_commands(&[command], None),
        None => output::bad_input(format!("Error: id {id} does not exist.")),
    }
    Ok(())
}

/// `tool <tool>`: commands using exactly one tool
pub fn by_tool(ctx: &Context, args: &str) -> Result<()> {
    if args.split_whitespace().count() != 1 {
        output::bad_input("Error: specify only one tool.");
        return Ok(());
    }

    let commands = ctx.session.commands().get_by_tool(args)?;
    if commands.is_empty() {
        output::plain(format!("\nNo commands for tool '{args}'."));
        return Ok(());
    }
    print_commands(&commands, None);
    Ok(())
}

/// `tag <t1> <t2> ...`: commands grouped per tag
pub fn by_tags(ctx: &Context, args: &str) -> Result<()> {
    if args.is_empty() {
        output::bad_input("Error: specify at least one tag.");
        return Ok(());
    }

    let matches = ctx.session.commands().get_by_tags(args.split_whitespace())?;

    for (index, (tag, commands)) in matches.by_tag.iter().enumerate() {
        output::plain(format!("\n#{tag}"));
        print_commands(commands, Some(output::palette(index)));
    }

    if !matches.not_found.is_empty() {
        let missing: Vec<String> = matches.not_found.iter().map(|t| format!("#{t}")).collect();
        output::warning(format!("\nTags not found: {}", missing.join(" ")));
    }
    Ok(())
}

/// One line per command: `<id> # <tool> <args> -> <desc>`
pub fn print_commands(commands: &[Command], style: Option<Style>) {
    println!();
    let style = style.unwrap_or_else(|| Style::new().bold());
    for command in commands {
        println!("{}", style.apply_to(command));
    }
}
