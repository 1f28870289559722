//! Range tokens: `*`, `A` or `A-B` where A and B are positions

use serde::Serialize;

use super::position::{Coordinate, PositionToken};
use crate::error::CodeStepsError;
use crate::letters::{LetterGrid, LetterRef};

/// Token selecting the whole code block
pub const WILDCARD: &str = "*";

/// Resolved span of coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Range {
    pub const fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    /// Range spanning the entire grid
    pub fn whole(grid: &LetterGrid) -> Self {
        let last_line = grid.line_count().saturating_sub(1);
        let last_column = grid.line_len(last_line).saturating_sub(1);
        Self::new(Coordinate::new(0, 0), Coordinate::new(last_line, last_column))
    }

    /// Whether the cell at (`line`, `column`) falls inside this range.
    ///
    /// Lines strictly between start and end are included whole. A same-line
    /// range with start column past end column selects nothing.
    pub fn contains(&self, line: usize, column: usize) -> bool {
        let (start, end) = (self.start, self.end);

        if line > start.line && line < end.line {
            return true;
        }

        if start.line == end.line {
            return line == start.line && column >= start.column && column <= end.column;
        }

        (line == start.line && column >= start.column) || (line == end.line && column <= end.column)
    }

    /// Every cell of `grid` inside this range, in document order.
    ///
    /// Scans the full grid; no spatial index.
    pub fn letters<'a>(&'a self, grid: &'a LetterGrid) -> impl Iterator<Item = LetterRef> + 'a {
        grid.cells()
            .filter(move |cell| self.contains(cell.line, cell.column))
            .map(move |cell| grid.letter_ref(cell))
    }
}

/// Parse and resolve a single range token against `grid`
pub fn resolve_range(input: &str, grid: &LetterGrid) -> Result<Range, CodeStepsError> {
    let token = input.trim();

    if token == WILDCARD {
        return Ok(Range::whole(grid));
    }

    let parts: Vec<&str> = token.split('-').map(str::trim).collect();
    let (start, end) = match parts.as_slice() {
        [single] => {
            let position = PositionToken::parse(single)?;
            (position, position)
        }
        [start, end] => (PositionToken::parse(start)?, PositionToken::parse(end)?),
        _ => return Err(CodeStepsError::MalformedRange(token.to_string())),
    };

    Ok(Range::new(start.resolve(grid, false), end.resolve(grid, true)))
}
