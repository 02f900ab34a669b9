// crates/cheetah-cli/src/stdin.rs - Line-oriented prompt
//
// All interactive input goes through `Prompt`. It prints a label, then reads
// one line after the paw marker:
//
// ```text
// git / add / tool
//  🐾 docker
// ```
//
// On a terminal lines come from a `rustyline` editor: arrow-key history,
// editable pre-filled values for `edit`, and path completion while asking for
// the vault. Piped input (and tests) go through a plain `BufRead` script.
// End of input (Ctrl-D, Ctrl-C, or the end of a script) is reported as
// `None` and callers treat it as "stop".

use anyhow::{Context as AnyhowContext, Result};
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::config::Config;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use std::io::{self, BufRead, IsTerminal, Write};

use crate::output;

const MARKER: &str = " 🐾 ";

type LineEditor = Editor<PromptHelper, DefaultHistory>;

enum Input {
    Terminal(Box<LineEditor>),
    Script { reader: Box<dyn BufRead>, echo: bool },
}

pub struct Prompt {
    input: Input,
}

impl Prompt {
    /// Prompt on the process stdin
    ///
    /// A terminal gets the line editor. Piped stdin is read as a script and
    /// each line is echoed after the marker so the transcript stays readable.
    pub fn stdin() -> Result<Self> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return Ok(Self::scripted(stdin.lock(), true));
        }

        let config = Config::builder().auto_add_history(true).build();
        let mut editor = LineEditor::with_config(config).context("Failed to start line editor")?;
        editor.set_helper(Some(PromptHelper::new()));
        Ok(Self {
            input: Input::Terminal(Box::new(editor)),
        })
    }

    /// Read lines from `reader` instead of a terminal
    pub fn scripted(reader: impl BufRead + 'static, echo: bool) -> Self {
        Self {
            input: Input::Script {
                reader: Box::new(reader),
                echo,
            },
        }
    }

    /// Print `label`, read one line; `None` on end of input
    pub fn read_line(&mut self, label: &str) -> Result<Option<String>> {
        self.read(label, "", false)
    }

    /// Read a non-empty line, optionally with an exact word count
    ///
    /// Re-asks until the answer is acceptable or input ends.
    pub fn read_required(&mut self, label: &str, words: Option<usize>) -> Result<Option<String>> {
        self.read_checked(label, words, false)
    }

    /// Like [`Prompt::read_required`], with file-name completion on Tab
    pub fn read_path(&mut self, label: &str) -> Result<Option<String>> {
        self.read_checked(label, None, true)
    }

    /// Read numbered entries (`label 1`, `label 2`, ...) until a blank line
    pub fn read_list(&mut self, label: &str) -> Result<Option<Vec<String>>> {
        let mut items = Vec::new();
        loop {
            let Some(line) = self.read_line(&format!("{label} {}", items.len() + 1))? else {
                return Ok(None);
            };
            let line = line.trim();
            if line.is_empty() {
                return Ok(Some(items));
            }
            items.push(line.to_string());
        }
    }

    /// Read a new value for a field that currently holds `current`
    ///
    /// The answer replaces the value, so an empty answer clears it. On a
    /// terminal the line starts out holding `current`, so Enter keeps it;
    /// a script sees `current` in the label instead.
    pub fn read_with_default(&mut self, label: &str, current: &str) -> Result<Option<String>> {
        let line = if matches!(self.input, Input::Terminal(_)) {
            self.read(label, current, false)?
        } else {
            self.read(&format!("{label} [{current}]"), "", false)?
        };
        Ok(line.map(|line| line.trim().to_string()))
    }

    fn read_checked(
        &mut self,
        label: &str,
        words: Option<usize>,
        complete_paths: bool,
    ) -> Result<Option<String>> {
        loop {
            let Some(line) = self.read(label, "", complete_paths)? else {
                return Ok(None);
            };
            let line = line.trim().to_string();

            if line.is_empty() {
                output::bad_input("Error: cannot provide an empty value.");
                continue;
            }
            if let Some(words) = words {
                if line.split_whitespace().count() != words {
                    output::bad_input(format!("Error: introduce exactly {words} word(s)."));
                    continue;
                }
            }
            return Ok(Some(line));
        }
    }

    fn read(&mut self, label: &str, initial: &str, complete_paths: bool) -> Result<Option<String>> {
        if !label.is_empty() {
            println!("{}", output::prompt_style().apply_to(label));
        }

        match &mut self.input {
            Input::Terminal(editor) => {
                if let Some(helper) = editor.helper_mut() {
                    helper.complete_paths = complete_paths;
                }
                match editor.readline_with_initial(MARKER, (initial, "")) {
                    Ok(line) => Ok(Some(line)),
                    Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
                    Err(err) => Err(err).context("Failed to read input"),
                }
            }
            Input::Script { reader, echo } => {
                print!("{MARKER}");
                io::stdout().flush().context("Failed to flush stdout")?;

                let mut buffer = String::new();
                let read = reader
                    .read_line(&mut buffer)
                    .context("Failed to read input")?;
                if read == 0 {
                    println!();
                    return Ok(None);
                }

                let line = buffer.trim_end_matches(['\n', '\r']).to_string();
                if *echo {
                    println!("{line}");
                }
                Ok(Some(line))
            }
        }
    }
}

/// Editor helper: file-name completion, switched on per prompt
struct PromptHelper {
    files: FilenameCompleter,
    complete_paths: bool,
}

impl PromptHelper {
    fn new() -> Self {
        Self {
            files: FilenameCompleter::new(),
            complete_paths: false,
        }
    }
}

impl Helper for PromptHelper {}

impl Highlighter for PromptHelper {}

impl Hinter for PromptHelper {
    type Hint = String;
}

impl Validator for PromptHelper {}

impl Completer for PromptHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if self.complete_paths {
            self.files.complete(line, pos, ctx)
        } else {
            Ok((pos, Vec::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(script: &str) -> Prompt {
        Prompt::scripted(Cursor::new(script.as_bytes().to_vec()), false)
    }

    #[test]
    fn test_read_line_and_eof() {
        let mut p = prompt("first\r\nsecond\n");
        assert_eq!(p.read_line("").unwrap().as_deref(), Some("first"));
        assert_eq!(p.read_line("").unwrap().as_deref(), Some("second"));
        assert_eq!(p.read_line("").unwrap(), None);
    }

    #[test]
    fn test_read_required_reasks() {
        let mut p = prompt("\ntwo words\ndocker\n");
        assert_eq!(
            p.read_required("tool", Some(1)).unwrap().as_deref(),
            Some("docker")
        );
    }

    #[test]
    fn test_read_required_gives_up_on_eof() {
        let mut p = prompt("\n");
        assert_eq!(p.read_required("tool", None).unwrap(), None);
    }

    #[test]
    fn test_read_path_keeps_spaces() {
        let mut p = prompt("\n~/my vault\n");
        assert_eq!(p.read_path("vault").unwrap().as_deref(), Some("~/my vault"));
    }

    #[test]
    fn test_read_list_stops_at_blank() {
        let mut p = prompt("net\nhttp proxy\n\nleftover\n");
        assert_eq!(
            p.read_list("tag").unwrap(),
            Some(vec!["net".to_string(), "http proxy".to_string()])
        );
        assert_eq!(p.read_line("").unwrap().as_deref(), Some("leftover"));
    }

    #[test]
    fn test_read_with_default_replaces_value() {
        let mut p = prompt("  new value \n\n");
        assert_eq!(
            p.read_with_default("desc", "old").unwrap().as_deref(),
            Some("new value")
        );
        assert_eq!(p.read_with_default("desc", "old").unwrap().as_deref(), Some(""));
        assert_eq!(p.read_with_default("desc", "old").unwrap(), None);
    }
}
