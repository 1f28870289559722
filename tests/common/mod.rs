//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use codesteps::observer::NoopObserver;
use codesteps::syntax::PlainTokenizer;
use codesteps::{CodeSteps, HostOptions, LetterGrid, Step};

/// Build an enabled plain-text host with the given step definition
pub fn test_host(text: &str, steps: &str) -> CodeSteps {
    CodeSteps::new(
        HostOptions::new(text, "plain").with_steps(steps),
        &mut PlainTokenizer,
        &mut NoopObserver,
    )
    .unwrap()
}

/// (line, column) pairs of a step's letters, in document order
pub fn coords(step: &Step) -> Vec<(usize, usize)> {
    step.letters.iter().map(|l| (l.line, l.column)).collect()
}

/// (line, column) pairs of every emphasized letter, sorted
pub fn active_coords(host: &CodeSteps) -> Vec<(usize, usize)> {
    let mut out: Vec<(usize, usize)> = host
        .navigator()
        .active()
        .letters
        .iter()
        .map(|l| (l.line, l.column))
        .collect();
    out.sort();
    out
}

/// Every cell of a grid as (line, column)
pub fn all_coords(grid: &LetterGrid) -> Vec<(usize, usize)> {
    grid.cells().map(|c| (c.line, c.column)).collect()
}
