//! Language identification
//!
//! Maps host language names and file extensions to language IDs.

use std::path::Path;

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageId {
    #[default]
    PlainText,
    Rust,
    Python,
    Go,
    C,
    Cpp,
    Java,
    Bash,
}

impl LanguageId {
    /// All languages, plain text first
    pub const ALL: &'static [LanguageId] = &[
        LanguageId::PlainText,
        LanguageId::Rust,
        LanguageId::Python,
        LanguageId::Go,
        LanguageId::C,
        LanguageId::Cpp,
        LanguageId::Java,
        LanguageId::Bash,
    ];

    /// Resolve a host language identifier (`data-type` style names).
    ///
    /// Returns `None` for languages without a tokenizer; callers treat that
    /// as a missing collaborator.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "" | "plain" | "text" | "plaintext" | "txt" => Some(LanguageId::PlainText),
            "rust" | "rs" => Some(LanguageId::Rust),
            "python" | "py" => Some(LanguageId::Python),
            "go" | "golang" => Some(LanguageId::Go),
            "c" | "h" => Some(LanguageId::C),
            "cpp" | "c++" | "cc" | "cxx" | "hpp" => Some(LanguageId::Cpp),
            "java" => Some(LanguageId::Java),
            "bash" | "sh" | "shell" => Some(LanguageId::Bash),
            _ => None,
        }
    }

    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "rs" => LanguageId::Rust,
            "py" | "pyi" => LanguageId::Python,
            "go" => LanguageId::Go,
            "c" | "h" => LanguageId::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" => LanguageId::Cpp,
            "java" => LanguageId::Java,
            "sh" | "bash" => LanguageId::Bash,
            _ => LanguageId::PlainText,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(LanguageId::PlainText)
    }

    /// Canonical name, accepted back by [`LanguageId::from_name`]
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "plaintext",
            LanguageId::Rust => "rust",
            LanguageId::Python => "python",
            LanguageId::Go => "go",
            LanguageId::C => "c",
            LanguageId::Cpp => "cpp",
            LanguageId::Java => "java",
            LanguageId::Bash => "bash",
        }
    }
}
