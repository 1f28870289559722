//! Position tokens: `l<N>` or `l<N>c<M>`, 1-based

use serde::Serialize;

use crate::error::CodeStepsError;
use crate::letters::LetterGrid;

/// A 0-based (line, column) coordinate, clamped to the grid
///
/// Ordering is document order: line first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coordinate {
    pub line: usize,
    pub column: usize,
}

impl Coordinate {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// 1-based line and optional column as written in the DSL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionToken {
    pub line: usize,
    pub column: Option<usize>,
}

impl PositionToken {
    /// Parse `l<digits>[c<digits>]`; surrounding whitespace is ignored
    pub fn parse(input: &str) -> Result<Self, CodeStepsError> {
        let malformed = || CodeStepsError::MalformedPosition(input.to_string());
        let token = input.trim();

        let rest = token.strip_prefix('l').ok_or_else(malformed)?;
        let (line_digits, column_digits) = match rest.split_once('c') {
            Some((line, column)) => (line, Some(column)),
            None => (rest, None),
        };

        let line = parse_digits(line_digits).ok_or_else(malformed)?;
        let column = match column_digits {
            Some(digits) => Some(parse_digits(digits).ok_or_else(malformed)?),
            None => None,
        };

        Ok(Self { line, column })
    }

    /// Convert to a 0-based coordinate clamped to `grid`.
    ///
    /// Without an explicit column, a start position (`include_end == false`)
    /// lands on column 0 and an end position on the last column of the line.
    pub fn resolve(&self, grid: &LetterGrid, include_end: bool) -> Coordinate {
        let last_line = grid.line_count().saturating_sub(1);
        let line = self.line.saturating_sub(1).min(last_line);

        // Empty lines clamp to column 0 and simply hold no cells
        let last_column = grid.line_len(line).saturating_sub(1);
        let column = match self.column {
            Some(column) => column.saturating_sub(1),
            None if include_end => last_column,
            None => 0,
        };

        Coordinate::new(line, column.min(last_column))
    }
}

/// Parse a non-empty run of ASCII digits, saturating on overflow
fn parse_digits(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse::<usize>().unwrap_or(usize::MAX))
}

/// Parse and resolve a position token in one go
pub fn resolve_position(
    input: &str,
    grid: &LetterGrid,
    include_end: bool,
) -> Result<Coordinate, CodeStepsError> {
    Ok(PositionToken::parse(input)?.resolve(grid, include_end))
}
