// crates/cheetah-cli/src/output.rs - Styled terminal output
//
// Every user-facing message goes through here so colours stay consistent:
// green for success, yellow for bad input, orange for warnings and prompts,
// red for fatal errors. `console` drops the styling automatically when stdout
// is not a terminal.

use console::{Color, Style};
use std::fmt::Display;

const ORANGE: Color = Color::Color256(208);

/// Message categories, each with its own colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgType {
    Plain,
    Success,
    BadInput,
    Warning,
    Fatal,
}

impl MsgType {
    fn style(self) -> Style {
        let style = Style::new().bold();
        match self {
            Self::Plain => style,
            Self::Success => style.green(),
            Self::BadInput => style.yellow(),
            Self::Warning => style.fg(ORANGE),
            Self::Fatal => style.red(),
        }
    }
}

pub fn print(msg: impl Display, kind: MsgType) {
    println!("{}", kind.style().apply_to(msg));
}

pub fn plain(msg: impl Display) {
    print(msg, MsgType::Plain);
}

pub fn success(msg: impl Display) {
    print(msg, MsgType::Success);
}

pub fn bad_input(msg: impl Display) {
    print(msg, MsgType::BadInput);
}

pub fn warning(msg: impl Display) {
    print(msg, MsgType::Warning);
}

pub fn fatal(msg: impl Display) {
    eprintln!("{}", MsgType::Fatal.style().apply_to(msg));
}

/// Orange, bold; used for prompt labels
pub fn prompt_style() -> Style {
    Style::new().bold().fg(ORANGE)
}

/// Rotating palette for per-tag listings
pub fn palette(index: usize) -> Style {
    const COLORS: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
    ];
    Style::new().bold().fg(COLORS[index % COLORS.len()])
}
