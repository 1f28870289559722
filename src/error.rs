//! Error taxonomy for step parsing, navigation and host construction
//!
//! Malformed positions, ranges and steps are recovered locally by the step
//! parser and surface as [`Diagnostic`]s. Everything else is returned to the
//! caller.

use std::fmt;

/// Errors produced while building or driving a code steps host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeStepsError {
    /// Position token does not match `l<N>[c<M>]`
    MalformedPosition(String),
    /// Range token has more than two `-`-separated parts
    MalformedRange(String),
    /// Step token does not split into exactly two `:`-separated parts
    MalformedStep(String),
    /// Explicit navigation to a step that does not exist
    IndexOutOfRange { index: usize, count: usize },
    /// No tokenizer is available for the requested language
    MissingCollaborator(String),
    /// Host text is empty (after normalization), nothing to index
    EmptyText,
}

impl CodeStepsError {
    /// Diagnostic kind for recoverable parse errors, `None` for fatal ones
    pub fn diagnostic_kind(&self) -> Option<DiagnosticKind> {
        match self {
            Self::MalformedPosition(_) => Some(DiagnosticKind::MalformedPosition),
            Self::MalformedRange(_) => Some(DiagnosticKind::MalformedRange),
            Self::MalformedStep(_) => Some(DiagnosticKind::MalformedStep),
            _ => None,
        }
    }
}

impl fmt::Display for CodeStepsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPosition(p) => write!(f, "position not properly formatted: {:?}", p),
            Self::MalformedRange(r) => write!(f, "range not properly formatted: {:?}", r),
            Self::MalformedStep(s) => write!(f, "step not properly formatted: {:?}", s),
            Self::IndexOutOfRange { index, count } => {
                write!(f, "step index {} out of range (0..{})", index, count)
            }
            Self::MissingCollaborator(what) => write!(f, "missing collaborator: {}", what),
            Self::EmptyText => write!(f, "host text is empty"),
        }
    }
}

impl std::error::Error for CodeStepsError {}

/// Kind of a recoverable parse problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MalformedPosition,
    MalformedRange,
    MalformedStep,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MalformedPosition => "malformed position",
            Self::MalformedRange => "malformed range",
            Self::MalformedStep => "malformed step",
        };
        f.write_str(name)
    }
}

/// A dropped position, range or step together with the raw input fragment
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub fragment: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, fragment: impl Into<String>) -> Self {
        Self {
            kind,
            fragment: fragment.into(),
        }
    }

    /// Convert a recoverable error into a diagnostic
    pub fn from_error(error: &CodeStepsError) -> Option<Self> {
        let kind = error.diagnostic_kind()?;
        let fragment = match error {
            CodeStepsError::MalformedPosition(s)
            | CodeStepsError::MalformedRange(s)
            | CodeStepsError::MalformedStep(s) => s.clone(),
            _ => String::new(),
        };
        Some(Self { kind, fragment })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", self.kind, self.fragment)
    }
}
