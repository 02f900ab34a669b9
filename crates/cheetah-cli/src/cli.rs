use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "cheetah")]
#[command(about = "A personal cheatsheet manager for shell commands")]
#[command(version)]
pub struct Cli {
    /// Vault directory (skips the settings file)
    #[arg(long, global = true, env = "CHEETAH_VAULT")]
    pub vault: Option<PathBuf>,

    /// Settings file (defaults to ~/.config/cheetah/settings)
    #[arg(long, global = true, env = "CHEETAH_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Sheet to select on startup
    #[arg(short, long)]
    pub sheet: Option<String>,

    /// Log storage activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Without a subcommand, cheetah starts the interactive prompt
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Non-interactive commands
#[derive(Subcommand)]
pub enum Commands {
    /// List sheets in the vault
    Sheets,

    /// Print a sheet's commands and tags as JSON
    Export {
        /// Sheet to export
        sheet: String,
    },

    /// Generate shell completions
    #[cfg(feature = "completions")]
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}
