//! Code steps - walk through source code one highlighted step at a time
//!
//! An author describes steps with a compact DSL (`"l1c1-l1c3:Keyword;l2:Body"`).
//! Each step resolves to a set of letters over a per-character index of the
//! tokenized code, and a navigator activates the steps in order.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod host;
pub mod letters;
pub mod manager;
pub mod navigator;
pub mod observer;
pub mod render;
pub mod steps;
pub mod syntax;
pub mod tracing;

// Re-export commonly used types
pub use error::{CodeStepsError, Diagnostic, DiagnosticKind};
pub use host::{CodeSteps, HostOptions};
pub use letters::{LetterCell, LetterGrid, LetterRef};
pub use manager::CodeStepsManager;
pub use navigator::Navigator;
pub use observer::{RecordingObserver, StepEvent, StepObserver};
pub use steps::{parse_steps, Step};
