//! Step-definition parser
//!
//! ```text
//! steps    := step (";" step)*
//! step     := ranges ":" text
//! ranges   := range ("," range)*
//! ```
//!
//! Malformed steps, ranges and positions are dropped and reported as
//! diagnostics; parsing always yields at least one step.

use std::collections::BTreeSet;

use super::range::{resolve_range, Range};
use super::Step;
use crate::error::{CodeStepsError, Diagnostic};
use crate::letters::LetterGrid;

/// Definition used when none is given: one whole-code step without text
pub const DEFAULT_DEFINITION: &str = "*:";

const STEP_SEPARATOR: char = ';';
const PART_SEPARATOR: char = ':';
const RANGE_SEPARATOR: char = ',';

/// Result of parsing a step definition
#[derive(Debug, Clone)]
pub struct ParsedSteps {
    pub steps: Vec<Step>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a step definition against `grid`.
///
/// `None` or a blank definition yields [`DEFAULT_DEFINITION`]. When every
/// declared step is malformed the result also degrades to that single step,
/// keeping the diagnostics.
pub fn parse_steps(definition: Option<&str>, grid: &LetterGrid) -> ParsedSteps {
    let definition = match definition {
        Some(d) if !d.trim().is_empty() => d,
        _ => DEFAULT_DEFINITION,
    };

    let mut diagnostics = Vec::new();
    let mut steps = Vec::new();

    let normalized = normalize(definition);
    for token in split_separator(&normalized, STEP_SEPARATOR) {
        match parse_step(token, grid, &mut diagnostics) {
            Ok(step) => steps.push(step),
            Err(e) => record(&mut diagnostics, &e),
        }
    }

    if steps.is_empty() {
        tracing::warn!(
            "No valid step in {:?}, falling back to {:?}",
            definition,
            DEFAULT_DEFINITION
        );
        let mut unused = Vec::new();
        if let Ok(step) = parse_step(DEFAULT_DEFINITION, grid, &mut unused) {
            steps.push(step);
        }
    }

    tracing::debug!(
        "Parsed {} steps ({} diagnostics) over {} lines",
        steps.len(),
        diagnostics.len(),
        grid.line_count()
    );

    ParsedSteps { steps, diagnostics }
}

/// Parse one `ranges:text` token
fn parse_step(
    input: &str,
    grid: &LetterGrid,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Step, CodeStepsError> {
    let parts = split_separator(input, PART_SEPARATOR);
    let [ranges_part, text] = parts.as_slice() else {
        return Err(CodeStepsError::MalformedStep(input.to_string()));
    };

    let mut ranges: Vec<Range> = Vec::new();
    for token in ranges_part.split(RANGE_SEPARATOR) {
        match resolve_range(token, grid) {
            Ok(range) => ranges.push(range),
            Err(e) => record(diagnostics, &e),
        }
    }

    let letters: BTreeSet<_> = ranges
        .iter()
        .flat_map(|range| range.letters(grid))
        .collect();

    Ok(Step {
        ranges,
        text: (*text).to_string(),
        letters,
    })
}

fn record(diagnostics: &mut Vec<Diagnostic>, error: &CodeStepsError) {
    if let Some(diagnostic) = Diagnostic::from_error(error) {
        tracing::warn!("Dropping {}", diagnostic);
        diagnostics.push(diagnostic);
    }
}

/// Drop every newline whose whitespace run starts or ends a line, so blank
/// and indent-only lines vanish anywhere in the definition. Leading
/// whitespace is dropped, as is a trailing run holding a newline. Trailing
/// spaces on a single-line end belong to the last description.
fn normalize(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\n' {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let run_end = chars[i + 1..]
            .iter()
            .position(|c| !c.is_whitespace())
            .map_or(chars.len(), |offset| i + 1 + offset);
        let at_line_start = i == 0 || chars[i - 1] == '\n';

        if at_line_start && run_end > i + 1 {
            i = run_end;
        } else if let Some(end) =
            (i + 2..=run_end).rev().find(|&k| k == chars.len() || chars[k] == '\n')
        {
            i = end;
        } else {
            out.push('\n');
            i += 1;
        }
    }

    let out = out.trim_start();
    let trimmed = out.trim_end();
    if out[trimmed.len()..].contains('\n') {
        trimmed.to_string()
    } else {
        out.to_string()
    }
}

/// Split on `separator`, consuming whitespace on both sides of each
/// separator but not at the outer ends of `input`
fn split_separator(input: &str, separator: char) -> Vec<&str> {
    let parts: Vec<&str> = input.split(separator).collect();
    let last = parts.len() - 1;
    parts
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            let part = if i > 0 { part.trim_start() } else { part };
            if i < last {
                part.trim_end()
            } else {
                part
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticKind;

    fn coords(step: &Step) -> Vec<(usize, usize)> {
        step.letters.iter().map(|r| (r.line, r.column)).collect()
    }

    #[test]
    fn test_split_separator_consumes_inner_whitespace() {
        assert_eq!(split_separator("a ; b\n;c ", ';'), vec!["a", "b", "c "]);
        assert_eq!(split_separator(" a", ';'), vec![" a"]);
        assert_eq!(split_separator("a;", ';'), vec!["a", ""]);
    }

    #[test]
    fn test_normalize_strips_blank_lines() {
        assert_eq!(normalize("\n   l1:a;\n  l2:b\n   "), "l1:a;\n  l2:b");
        assert_eq!(normalize("l1:a  "), "l1:a  ");
    }

    #[test]
    fn test_normalize_drops_inner_blank_lines() {
        assert_eq!(normalize("l1:a\n\n   more;l2:b"), "l1:a\nmore;l2:b");
        assert_eq!(normalize("l1:a\n  \nl2:b"), "l1:a\nl2:b");
        assert_eq!(normalize("l1:a\nb"), "l1:a\nb");
        assert_eq!(normalize("l1:a\n"), "l1:a");

        let grid = LetterGrid::from_text("ab\ncd");
        let parsed = parse_steps(Some("l1:a\n\n   more;l2:b"), &grid);
        assert_eq!(parsed.steps[0].text, "a\nmore");
        assert_eq!(parsed.steps[1].text, "b");
    }

    #[test]
    fn test_default_definition() {
        let grid = LetterGrid::from_text("ab\ncd");
        for definition in [None, Some(""), Some("  \n\t ")] {
            let parsed = parse_steps(definition, &grid);
            assert_eq!(parsed.steps.len(), 1);
            assert_eq!(parsed.steps[0].text, "");
            assert_eq!(parsed.steps[0].letters.len(), 4);
            assert!(parsed.diagnostics.is_empty());
        }
    }

    #[test]
    fn test_union_deduplicates() {
        let grid = LetterGrid::from_text("abc\ndef");
        let parsed = parse_steps(Some("l1, l1c2-l2c1, l2c1:x"), &grid);
        assert_eq!(
            coords(&parsed.steps[0]),
            vec![(0, 0), (0, 1), (0, 2), (1, 0)]
        );
        assert_eq!(parsed.steps[0].ranges.len(), 3);
    }

    #[test]
    fn test_description_whitespace() {
        let grid = LetterGrid::from_text("abc");
        let parsed = parse_steps(Some("l1 :  First step ; l1c1: Last  "), &grid);
        assert_eq!(parsed.steps[0].text, "First step");
        assert_eq!(parsed.steps[1].text, "Last  ");
    }

    #[test]
    fn test_extra_colon_is_malformed_step() {
        let grid = LetterGrid::from_text("abc");
        let parsed = parse_steps(Some("l1:Note: colon;l1c2:ok"), &grid);
        assert_eq!(parsed.steps.len(), 1);
        assert_eq!(parsed.steps[0].text, "ok");
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::new(DiagnosticKind::MalformedStep, "l1:Note: colon")]
        );
    }

    #[test]
    fn test_step_with_no_valid_range_is_kept_empty() {
        let grid = LetterGrid::from_text("abc");
        let parsed = parse_steps(Some("x1:nothing;l1:all"), &grid);
        assert_eq!(parsed.steps.len(), 2);
        assert!(parsed.steps[0].letters.is_empty());
        assert_eq!(parsed.diagnostics[0].kind, DiagnosticKind::MalformedPosition);
    }

    #[test]
    fn test_all_malformed_falls_back_to_wildcard() {
        let grid = LetterGrid::from_text("ab\ncd");
        let parsed = parse_steps(Some("garbage;more garbage"), &grid);
        assert_eq!(parsed.steps.len(), 1);
        assert_eq!(parsed.steps[0].letters.len(), 4);
        assert_eq!(parsed.diagnostics.len(), 2);
    }

    #[test]
    fn test_trailing_separator_reports_empty_step() {
        let grid = LetterGrid::from_text("ab");
        let parsed = parse_steps(Some("l1:a;"), &grid);
        assert_eq!(parsed.steps.len(), 1);
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::new(DiagnosticKind::MalformedStep, "")]
        );
    }
}
