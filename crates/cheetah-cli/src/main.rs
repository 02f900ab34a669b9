// crates/cheetah-cli/src/main.rs - CLI Application Entry Point
//
// Without a subcommand cheetah runs the interactive prompt. The few
// subcommands exist for scripting:
//
// ```bash
// cheetah                                  # interactive prompt
// cheetah --sheet git                      # prompt with a sheet already selected
// cheetah sheets                           # sheet names, one per line
// cheetah export git | jq '.[].tool'       # a sheet as JSON
// cheetah completions zsh > _cheetah       # shell completions
// ```
//
// ┌─────────────┐    ┌──────────────┐    ┌─────────────────────┐
// │ clap / repl │───▶│   Context    │───▶│  cheetah-core       │
// │  (input)    │    │ (session)    │    │ (sheets, commands)  │
// └─────────────┘    └──────────────┘    └─────────────────────┘

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::Level;

mod cli; // Command-line interface definitions
mod commands; // Prompt actions and subcommands
mod context; // Vault resolution and the session
mod output; // Styled messages
mod repl; // Interactive loop
mod services; // Clipboard
mod stdin; // Line prompts

use cli::{Cli, Commands};
use context::Context;
use stdin::Prompt;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::fatal(format!("Error: {err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // Completions need no vault
    #[cfg(feature = "completions")]
    {
        if let Some(Commands::Completions { shell }) = &cli.command {
            use clap::CommandFactory;
            clap_complete::generate(*shell, &mut Cli::command(), "cheetah", &mut std::io::stdout());
            return Ok(());
        }
    }

    let mut prompt = Prompt::stdin()?;
    let mut ctx = Context::new(cli.vault, cli.settings, &mut prompt)?;

    match cli.command {
        None => {
            if let Some(sheet) = &cli.sheet {
                commands::recover(commands::sheets::select(&mut ctx, sheet))?;
            }
            repl::run(&mut ctx, &mut prompt)
        }
        Some(Commands::Sheets) => commands::sheets::print_names(&ctx),
        Some(Commands::Export { sheet }) => commands::export::handle(&mut ctx, &sheet),
        #[cfg(feature = "completions")]
        Some(Commands::Completions { .. }) => Ok(()),
    }
}
