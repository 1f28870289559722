//! Letter index: a two-dimensional, per-character view of tokenized code
//!
//! Every character of the token tree becomes one [`LetterCell`] at its
//! (line, column) in the reconstructed text. Line breaks end a line and are
//! not cells themselves. Steps refer to cells through [`LetterRef`] handles.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::syntax::{TokenNode, TokenTree};

/// Tab characters are expanded to this many spaces before indexing
pub const TAB_WIDTH: usize = 4;

static NEXT_GRID_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one letter grid within the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct GridId(pub u64);

impl GridId {
    fn next() -> Self {
        GridId(NEXT_GRID_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Non-owning handle to a letter cell
///
/// Ordering is document order (line-major, then column) within a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct LetterRef {
    pub grid: GridId,
    pub line: usize,
    pub column: usize,
}

/// One rendered character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterCell {
    pub character: char,
    /// Class tags inherited from the innermost enclosing span
    pub classes: Vec<String>,
    pub line: usize,
    pub column: usize,
}

/// Ordered lines of letter cells
#[derive(Debug, Clone)]
pub struct LetterGrid {
    id: GridId,
    lines: Vec<Vec<LetterCell>>,
}

/// Replace every tab with [`TAB_WIDTH`] spaces
pub fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

impl LetterGrid {
    /// Index a token tree into lines of cells
    pub fn from_tree(tree: &TokenTree) -> Self {
        let mut builder = GridBuilder::default();
        for node in &tree.nodes {
            builder.visit(node, &[]);
        }
        builder.finish()
    }

    /// Index untagged text (no tokenizer involved)
    pub fn from_text(text: &str) -> Self {
        Self::from_tree(&TokenTree::plain(text))
    }

    pub fn id(&self) -> GridId {
        self.id
    }

    pub fn lines(&self) -> &[Vec<LetterCell>] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of cells on `line` (0 for lines that don't exist)
    pub fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, Vec::len)
    }

    pub fn cell_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    pub fn cell(&self, line: usize, column: usize) -> Option<&LetterCell> {
        self.lines.get(line)?.get(column)
    }

    /// Resolve a handle; `None` if it belongs to another grid
    pub fn get(&self, letter: LetterRef) -> Option<&LetterCell> {
        if letter.grid != self.id {
            return None;
        }
        self.cell(letter.line, letter.column)
    }

    pub fn letter_ref(&self, cell: &LetterCell) -> LetterRef {
        LetterRef {
            grid: self.id,
            line: cell.line,
            column: cell.column,
        }
    }

    /// Every cell in document order
    pub fn cells(&self) -> impl Iterator<Item = &LetterCell> {
        self.lines.iter().flatten()
    }

    /// Text of one line, without terminator
    pub fn line_text(&self, line: usize) -> String {
        self.lines
            .get(line)
            .map(|cells| cells.iter().map(|c| c.character).collect())
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct GridBuilder {
    lines: Vec<Vec<LetterCell>>,
    line: Vec<LetterCell>,
    last_char: Option<char>,
}

impl GridBuilder {
    fn visit(&mut self, node: &TokenNode, classes: &[String]) {
        match node {
            TokenNode::Text(text) => {
                for ch in text.chars() {
                    self.push_char(ch, classes);
                }
            }
            TokenNode::Span {
                classes: span_classes,
                children,
            } => {
                for child in children {
                    self.visit(child, span_classes);
                }
            }
        }
    }

    fn push_char(&mut self, ch: char, classes: &[String]) {
        if ch == '\n' {
            self.lines.push(std::mem::take(&mut self.line));
        } else {
            self.line.push(LetterCell {
                character: ch,
                classes: classes.to_vec(),
                line: self.lines.len(),
                column: self.line.len(),
            });
        }
        self.last_char = Some(ch);
    }

    fn finish(mut self) -> LetterGrid {
        // A trailing line break already pushed the last line
        if self.last_char != Some('\n') {
            self.lines.push(self.line);
        }
        LetterGrid {
            id: GridId::next(),
            lines: self.lines,
        }
    }
}
