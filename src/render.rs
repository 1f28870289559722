//! Terminal presentation of a host's current state
//!
//! Presentation only decides how activation looks; which letters are active
//! is entirely up to the navigator.

use std::fmt::Write as _;

use crossterm::style::{Color, Stylize};
use serde::{Deserialize, Serialize};

use crate::host::CodeSteps;
use crate::letters::LetterCell;
use crate::syntax::TOKEN_CLASS;

/// How active letters are distinguished from the rest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    /// Active letters are bold, the rest render normally
    #[default]
    Emphasis,
    /// Inactive letters are dimmed, the rest render normally
    Dim,
}

const PREVIOUS_ARROW: &str = "◀";
const NEXT_ARROW: &str = "▶";
const CARET: char = '^';

/// Renders hosts to text, with or without ANSI styling
#[derive(Debug, Clone, Copy)]
pub struct TerminalPresenter {
    pub mode: PresentationMode,
    /// Emit ANSI escapes. Without color, active letters are marked by a
    /// caret line under each code line.
    pub color: bool,
}

impl TerminalPresenter {
    pub fn new(mode: PresentationMode, color: bool) -> Self {
        Self { mode, color }
    }

    pub fn render(&self, host: &CodeSteps) -> String {
        let mut out = String::new();
        let grid = host.grid();
        let navigator = host.navigator();

        for line in grid.lines() {
            let mut carets = String::new();
            for cell in line {
                let active = navigator.is_emphasized(grid.letter_ref(cell));
                if self.color {
                    let _ = write!(out, "{}", self.styled(cell, active));
                } else {
                    out.push(cell.character);
                    carets.push(if active { CARET } else { ' ' });
                }
            }
            out.push('\n');

            let carets = carets.trim_end();
            if !carets.is_empty() {
                out.push_str(carets);
                out.push('\n');
            }
        }

        out.push_str(&self.footer(host));
        out
    }

    fn styled(&self, cell: &LetterCell, active: bool) -> crossterm::style::StyledContent<char> {
        let mut content = cell.character.stylize();
        if let Some(color) = class_color(&cell.classes) {
            content = content.with(color);
        }
        match (self.mode, active) {
            (PresentationMode::Emphasis, true) => content.bold().underlined(),
            (PresentationMode::Dim, false) => content.dim(),
            _ => content,
        }
    }

    /// Step counter, navigation arrows and the visible description
    fn footer(&self, host: &CodeSteps) -> String {
        let navigator = host.navigator();
        let Some(current) = navigator.current() else {
            return String::new();
        };

        let previous = if navigator.can_previous() { PREVIOUS_ARROW } else { " " };
        let next = if navigator.can_next() { NEXT_ARROW } else { " " };
        let mut footer = format!(
            "{} step {}/{} {}\n",
            previous,
            current + 1,
            navigator.step_count(),
            next
        );

        if let Some(text) = navigator
            .visible_description()
            .and_then(|i| navigator.steps().get(i))
            .and_then(|step| step.description())
        {
            if self.color {
                let _ = writeln!(footer, "{}", text.italic());
            } else {
                footer.push_str(text);
                footer.push('\n');
            }
        }

        footer
    }
}

/// Foreground color for a cell's token classes
fn class_color(classes: &[String]) -> Option<Color> {
    let class = classes.iter().rev().find(|c| c.as_str() != TOKEN_CLASS)?;
    let base = class.split('.').next().unwrap_or(class);
    let color = match base {
        "keyword" | "storage" => Color::Magenta,
        "string" | "escape" => Color::Green,
        "comment" => Color::DarkGrey,
        "number" | "constant" | "boolean" => Color::Yellow,
        "function" | "constructor" => Color::Blue,
        "type" | "attribute" | "tag" => Color::Cyan,
        "operator" | "punctuation" | "delimiter" => Color::Grey,
        "variable" | "property" | "label" => Color::Red,
        _ => return None,
    };
    Some(color)
}
