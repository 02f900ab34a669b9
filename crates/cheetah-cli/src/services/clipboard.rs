// crates/cheetah-cli/src/services/clipboard.rs - Clipboard Integration Service
//
// Copies command lines to the system clipboard by piping them into the
// platform's clipboard program. No clipboard library is linked; whatever the
// desktop already provides does the work.

use anyhow::{Context as AnyhowContext, Result, bail};
use std::env;
use std::io::Write;
use std::process::{Command, Stdio};

/// Handles clipboard operations
///
/// CLIPBOARD PROGRAM SELECTION:
/// 1. CHEETAH_CLIPBOARD environment variable (program plus arguments)
/// 2. macOS: pbcopy
/// 3. Windows: clip
/// 4. Wayland session (WAYLAND_DISPLAY set): wl-copy
/// 5. Otherwise: xclip -selection clipboard
///
/// EXAMPLES:
/// ```bash
/// export CHEETAH_CLIPBOARD="xsel --clipboard --input"
/// export CHEETAH_CLIPBOARD="tmux load-buffer -"
/// ```
pub struct ClipboardService;

impl ClipboardService {
    /// Program and arguments used to reach the clipboard
    pub fn get_clipboard_command() -> Vec<String> {
        if let Ok(custom) = env::var("CHEETAH_CLIPBOARD") {
            let parts: Vec<String> = custom.split_whitespace().map(str::to_string).collect();
            if !parts.is_empty() {
                return parts;
            }
        }

        let default: &[&str] = if cfg!(target_os = "macos") {
            &["pbcopy"]
        } else if cfg!(windows) {
            &["clip"]
        } else if env::var_os("WAYLAND_DISPLAY").is_some() {
            &["wl-copy"]
        } else {
            &["xclip", "-selection", "clipboard"]
        };
        default.iter().map(|s| s.to_string()).collect()
    }

    /// Write `text` to the clipboard
    ///
    /// Spawns the clipboard program, feeds it `text` on stdin and waits for
    /// it to exit. Fails if the program is missing or exits unsuccessfully.
    pub fn copy(text: &str) -> Result<()> {
        let command = Self::get_clipboard_command();
        let (program, args) = command
            .split_first()
            .context("Clipboard command is empty")?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| {
                format!("Failed to launch '{program}'. Is it installed? Set CHEETAH_CLIPBOARD to override")
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .with_context(|| format!("Failed to write to '{program}'"))?;
        }

        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for '{program}'"))?;
        if !status.success() {
            bail!("'{}' exited with status {:?}", program, status.code());
        }

        tracing::debug!(program = %program, bytes = text.len(), "copied to clipboard");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_not_empty() {
        assert!(!ClipboardService::get_clipboard_command().is_empty());
    }
}
