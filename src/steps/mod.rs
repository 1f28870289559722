//! Step definitions: the DSL and what it resolves to
//!
//! ```text
//! "l1c1-l1c2:First;l2:Second"
//!   └─ parse_steps ─┬─ Step { ranges: [(0,0)-(0,1)], text: "First", letters }
//!                   └─ Step { ranges: [(1,0)-(1,1)], text: "Second", letters }
//! ```

mod parser;
mod position;
mod range;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::letters::LetterRef;

pub use parser::{parse_steps, ParsedSteps, DEFAULT_DEFINITION};
pub use position::{resolve_position, Coordinate, PositionToken};
pub use range::{resolve_range, Range, WILDCARD};

/// One highlighted subset of the code plus an optional description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Successfully resolved ranges, in declaration order
    pub ranges: Vec<Range>,
    /// Description text; empty means no description entry
    pub text: String,
    /// Union of every range's cells, in document order
    pub letters: BTreeSet<LetterRef>,
}

impl Step {
    pub fn description(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }

    pub fn has_description(&self) -> bool {
        !self.text.is_empty()
    }
}
