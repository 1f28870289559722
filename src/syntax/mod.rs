//! Syntax tokenization
//!
//! The step engine only sees a [`TokenTree`]; where it comes from is behind
//! the [`Tokenizer`] trait.
//!
//! ## Architecture
//!
//! ```text
//! host text → Tokenizer::tokenize → TokenTree → LetterGrid::from_tree
//! ```
//!
//! ## Supported Languages
//!
//! Rust, Python, Go, C, C++, Java and Bash through tree-sitter, plus plain
//! text.

mod languages;
mod token_tree;
mod tokenizer;

pub use languages::LanguageId;
pub use token_tree::{TokenNode, TokenTree};
pub use tokenizer::{HighlightTokenizer, PlainTokenizer, Tokenizer, TOKEN_CLASS};
