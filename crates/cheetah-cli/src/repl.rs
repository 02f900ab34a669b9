// crates/cheetah-cli/src/repl.rs - Interactive prompt loop
//
// Reads one action per line and dispatches it:
//
// ```text
// cheetah
//  🐾 git
// Switched to git sheet.
//
// git
//  🐾 tool git
// ```
//
// The first word picks the action, the rest of the line is its argument
// string. A word that is not an action is taken as a sheet name. Recoverable
// errors are reported and the loop continues; anything fatal ends the run.

use anyhow::{Context as AnyhowContext, Result};
use console::Term;
use tracing::debug;

use crate::commands::{self, add, copy, edit, help, list, remove, sheets, tags};
use crate::context::Context;
use crate::output;
use crate::stdin::Prompt;

const WELCOME: &str =
    "Welcome to Cheetah CLI 🐾! (type 'help' or 'h' for available actions, 'exit' to quit)";
const BYE: &str = "🐆💨💨 Bye!";

pub fn run(ctx: &mut Context, prompt: &mut Prompt) -> Result<()> {
    output::plain(WELCOME);

    loop {
        let label = format!("\n{}", ctx.prompt_label());
        let Some(line) = prompt.read_line(&label)? else {
            break;
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (action, args) = match line.split_once(char::is_whitespace) {
            Some((action, rest)) => (action, rest.trim()),
            None => (line, ""),
        };
        debug!(action, args, "dispatching");

        let result = match action {
            "exit" | "quit" => break,
            "help" | "h" => {
                help::main_help();
                Ok(())
            }
            "clear" => Term::stdout()
                .clear_screen()
                .context("Failed to clear the screen"),
            "sheets" => sheets::show(ctx),
            "create" => sheets::create(ctx, args),
            "ls" => list::handle(ctx, args),
            "tool" => list::by_tool(ctx, args),
            "tag" => list::by_tags(ctx, args),
            "tools" => tags::tools(ctx),
            "tags" => tags::tags(ctx),
            "prune" => tags::prune(ctx),
            "add" => add::handle(ctx, prompt),
            "rm" => remove::handle(ctx, args),
            "edit" => edit::handle(ctx, prompt, args),
            "cp" => copy::handle(ctx, args),
            _ => sheets::select(ctx, line),
        };

        commands::recover(result)?;
    }

    output::plain(format!("\n{BYE}"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cheetah_core::SheetName;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_script(script: &str) -> (TempDir, Context) {
        let temp = TempDir::new().unwrap();
        let mut prompt = Prompt::scripted(Cursor::new(script.as_bytes().to_vec()), false);
        let mut ctx = Context::new(Some(temp.path().to_path_buf()), None, &mut prompt).unwrap();
        run(&mut ctx, &mut prompt).unwrap();
        (temp, ctx)
    }

    #[test]
    fn test_create_add_and_switch() {
        let script = "create git\nadd\ngit\nstatus\nshow state\ngit\nstate\n\ncreate docker\ngit\nexit\n";
        let (_temp, ctx) = run_script(script);

        assert_eq!(ctx.session.is_active(), Some(&SheetName::parse("git").unwrap()));
        let all = ctx.session.commands().get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].command_line(), "git status");
        assert_eq!(all[0].desc, "show state");
    }

    #[test]
    fn test_errors_do_not_end_the_loop() {
        // ls without a sheet, unknown sheet, bad id, then real work
        let script = "ls\nnowhere\ncreate s\nrm abc\nrm 5\nls 9\n";
        let (temp, ctx) = run_script(script);

        assert!(temp.path().join("s.db").is_file());
        assert!(!temp.path().join("nowhere.db").exists());
        assert!(ctx.session.is_active().is_some());
    }

    #[test]
    fn test_edit_updates_fields_and_tags() {
        let script = concat!(
            "create git\n",
            "add\ngit\nstatus\nold\n\n",
            "edit 1 desc tags\nnew desc\nadd vcs\nrm git\n\n",
        );
        let (_temp, ctx) = run_script(script);

        let command = ctx.session.commands().get_by_id(1).unwrap().unwrap();
        assert_eq!(command.desc, "new desc");
        let tags: Vec<String> = ctx
            .session
            .tags()
            .list_for_command(1)
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(tags, vec!["vcs".to_string()]);
    }

    #[test]
    fn test_edit_can_clear_desc() {
        let script = "create git\nadd\ngit\nstatus\nold desc\n\nedit 1 desc\n\n";
        let (_temp, ctx) = run_script(script);

        let command = ctx.session.commands().get_by_id(1).unwrap().unwrap();
        assert_eq!(command.desc, "");
        assert_eq!(command.args, "status");
    }

    #[test]
    fn test_path_like_sheet_name_is_recoverable() {
        let (temp, ctx) = run_script("create a/b\ncreate ../up\ncreate ok\n");

        assert!(temp.path().join("ok.db").is_file());
        assert!(!temp.path().join("a").exists());
        assert_eq!(ctx.session.is_active().unwrap().as_str(), "ok");
    }
}
