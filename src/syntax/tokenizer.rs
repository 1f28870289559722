//! Tokenizers: turn raw text into a token tree
//!
//! [`HighlightTokenizer`] is the default implementation backed by tree-sitter
//! grammars and their bundled highlight queries.

use std::collections::HashMap;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Parser, Query, QueryCursor, Tree};

use super::languages::LanguageId;
use super::token_tree::{TokenNode, TokenTree};
use crate::error::CodeStepsError;

/// Class tag prepended to every highlighted span
pub const TOKEN_CLASS: &str = "token";

/// External highlighter seam
pub trait Tokenizer {
    /// Tokenize `text` for the host language `language`.
    ///
    /// Unknown languages fail with [`CodeStepsError::MissingCollaborator`].
    fn tokenize(&mut self, text: &str, language: &str) -> Result<TokenTree, CodeStepsError>;
}

/// Tokenizer that never highlights; accepts any language name
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn tokenize(&mut self, text: &str, _language: &str) -> Result<TokenTree, CodeStepsError> {
        Ok(TokenTree::plain(text))
    }
}

/// A highlighted run within a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CaptureSpan {
    /// Start column (0-indexed, inclusive)
    start_col: usize,
    /// End column (exclusive)
    end_col: usize,
    /// Index into the query's capture names
    capture: usize,
}

/// Capture spans of one line, sorted by (start, end)
#[derive(Debug, Default)]
struct LineCaptures {
    spans: Vec<CaptureSpan>,
}

impl LineCaptures {
    /// Narrowest capture covering `col`; the earliest wins a tie
    fn capture_at(&self, col: usize) -> Option<usize> {
        let mut best: Option<&CaptureSpan> = None;
        for span in &self.spans {
            if span.start_col > col {
                break;
            }
            if col < span.end_col
                && best.map_or(true, |b| span.end_col - span.start_col < b.end_col - b.start_col)
            {
                best = Some(span);
            }
        }
        best.map(|span| span.capture)
    }
}

/// Tree-sitter backed tokenizer (parsers are !Sync, keep one per thread)
pub struct HighlightTokenizer {
    parsers: HashMap<LanguageId, Parser>,
    queries: HashMap<LanguageId, Query>,
}

impl HighlightTokenizer {
    /// Create a tokenizer with every supported grammar initialized
    pub fn new() -> Self {
        let mut tokenizer = Self {
            parsers: HashMap::new(),
            queries: HashMap::new(),
        };
        for lang in LanguageId::ALL {
            tokenizer.init_language(*lang);
        }
        tokenizer
    }

    fn grammar(lang: LanguageId) -> Option<(Language, &'static str)> {
        let grammar: (Language, &'static str) = match lang {
            LanguageId::Rust => (
                tree_sitter_rust::LANGUAGE.into(),
                tree_sitter_rust::HIGHLIGHTS_QUERY,
            ),
            LanguageId::Python => (
                tree_sitter_python::LANGUAGE.into(),
                tree_sitter_python::HIGHLIGHTS_QUERY,
            ),
            LanguageId::Go => (
                tree_sitter_go::LANGUAGE.into(),
                tree_sitter_go::HIGHLIGHTS_QUERY,
            ),
            LanguageId::C => (tree_sitter_c::LANGUAGE.into(), tree_sitter_c::HIGHLIGHT_QUERY),
            LanguageId::Cpp => (
                tree_sitter_cpp::LANGUAGE.into(),
                tree_sitter_cpp::HIGHLIGHT_QUERY,
            ),
            LanguageId::Java => (
                tree_sitter_java::LANGUAGE.into(),
                tree_sitter_java::HIGHLIGHTS_QUERY,
            ),
            LanguageId::Bash => (
                tree_sitter_bash::LANGUAGE.into(),
                tree_sitter_bash::HIGHLIGHT_QUERY,
            ),
            LanguageId::PlainText => return None,
        };
        Some(grammar)
    }

    /// Initialize a language's parser and query
    fn init_language(&mut self, lang: LanguageId) {
        let Some((ts_lang, highlights_scm)) = Self::grammar(lang) else {
            return;
        };

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&ts_lang) {
            tracing::error!("Failed to set language for {:?}: {}", lang, e);
            return;
        }
        self.parsers.insert(lang, parser);

        match Query::new(&ts_lang, highlights_scm) {
            Ok(query) => {
                self.queries.insert(lang, query);
            }
            Err(e) => {
                tracing::error!("Failed to compile query for {:?}: {:?}", lang, e);
            }
        }
    }

    /// Whether a usable parser exists for `lang`
    pub fn supports(&self, lang: LanguageId) -> bool {
        lang == LanguageId::PlainText || self.parsers.contains_key(&lang)
    }

    /// Tokenize text for a resolved language
    pub fn tokenize_language(
        &mut self,
        source: &str,
        language: LanguageId,
    ) -> Result<TokenTree, CodeStepsError> {
        if language == LanguageId::PlainText {
            return Ok(TokenTree::plain(source));
        }

        let parser = self.parsers.get_mut(&language).ok_or_else(|| {
            CodeStepsError::MissingCollaborator(format!("no parser for {}", language.name()))
        })?;

        let Some(tree) = parser.parse(source, None) else {
            // Parse timeouts/cancellation leave the code uncolored, not unusable
            tracing::warn!("Parse failed for {:?}, falling back to plain text", language);
            return Ok(TokenTree::plain(source));
        };

        let Some(query) = self.queries.get(&language) else {
            return Ok(TokenTree::plain(source));
        };

        let lines = extract_captures(source, &tree, query);
        Ok(build_tree(source, &lines, query.capture_names()))
    }
}

impl Default for HighlightTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for HighlightTokenizer {
    fn tokenize(&mut self, text: &str, language: &str) -> Result<TokenTree, CodeStepsError> {
        let lang = LanguageId::from_name(language).ok_or_else(|| {
            CodeStepsError::MissingCollaborator(format!("unknown language `{}`", language))
        })?;
        self.tokenize_language(text, lang)
    }
}

/// Convert byte column to character column on a given line.
/// Tree-sitter positions are in bytes, letter cells are characters.
fn byte_to_char_col(line: &str, byte_col: usize) -> usize {
    let byte_col = byte_col.min(line.len());
    let mut valid_byte = byte_col;
    while valid_byte > 0 && !line.is_char_boundary(valid_byte) {
        valid_byte -= 1;
    }
    line[..valid_byte].chars().count()
}

/// Run the highlight query and bucket captures per line
fn extract_captures(source: &str, tree: &Tree, query: &Query) -> Vec<LineCaptures> {
    let lines: Vec<&str> = source.split('\n').collect();
    let mut out: Vec<LineCaptures> = lines.iter().map(|_| LineCaptures::default()).collect();
    let capture_names = query.capture_names();

    let mut cursor = QueryCursor::new();
    let mut captures = cursor.captures(query, tree.root_node(), source.as_bytes());
    while let Some((query_match, capture_idx)) = captures.next() {
        let capture = &query_match.captures[*capture_idx];
        let index = capture.index as usize;

        // Underscore captures are query-internal helpers
        if capture_names[index].starts_with('_') {
            continue;
        }

        let start = capture.node.start_position();
        let end = capture.node.end_position();

        for row in start.row..=end.row {
            let Some(line) = lines.get(row) else {
                break;
            };
            let line_char_len = line.chars().count();
            let start_char = if row == start.row {
                byte_to_char_col(line, start.column)
            } else {
                0
            };
            let end_char = if row == end.row {
                byte_to_char_col(line, end.column)
            } else {
                line_char_len
            };

            if start_char < end_char {
                out[row].spans.push(CaptureSpan {
                    start_col: start_char,
                    end_col: end_char,
                    capture: index,
                });
            }
        }
    }

    for line in &mut out {
        line.spans.sort_by_key(|s| (s.start_col, s.end_col));
    }

    out
}

/// Group each line's characters into runs sharing a capture
fn build_tree(source: &str, lines: &[LineCaptures], capture_names: &[&str]) -> TokenTree {
    let mut nodes = Vec::new();

    for (row, line) in source.split('\n').enumerate() {
        if row > 0 {
            nodes.push(TokenNode::text("\n"));
        }

        let captures = lines.get(row);
        let mut run = String::new();
        let mut run_capture: Option<usize> = None;

        for (col, ch) in line.chars().enumerate() {
            let capture = captures.and_then(|c| c.capture_at(col));
            if capture != run_capture && !run.is_empty() {
                nodes.push(make_node(std::mem::take(&mut run), run_capture, capture_names));
            }
            run_capture = capture;
            run.push(ch);
        }

        if !run.is_empty() {
            nodes.push(make_node(run, run_capture, capture_names));
        }
    }

    TokenTree::new(nodes)
}

fn make_node(text: String, capture: Option<usize>, capture_names: &[&str]) -> TokenNode {
    match capture {
        Some(index) => TokenNode::span([TOKEN_CLASS, capture_names[index]], text),
        None => TokenNode::Text(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes_of<'a>(tree: &'a TokenTree, text: &str) -> Option<&'a [String]> {
        tree.nodes.iter().find_map(|node| match node {
            TokenNode::Span { classes, .. } if node.text_content() == text => {
                Some(classes.as_slice())
            }
            _ => None,
        })
    }

    #[test]
    fn test_rust_keyword_is_tagged() {
        let mut tokenizer = HighlightTokenizer::new();
        let tree = tokenizer
            .tokenize("fn main() {\n    let x = 42;\n}", "rust")
            .unwrap();

        assert_eq!(tree.text_content(), "fn main() {\n    let x = 42;\n}");
        let classes = classes_of(&tree, "fn").expect("`fn` should be highlighted");
        assert_eq!(classes[0], TOKEN_CLASS);
        assert!(classes[1].starts_with("keyword"));
    }

    #[test]
    fn test_text_is_preserved_with_trailing_newline() {
        let mut tokenizer = HighlightTokenizer::new();
        let source = "def f(x):\n    return x\n";
        let tree = tokenizer.tokenize(source, "python").unwrap();
        assert_eq!(tree.text_content(), source);
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        let mut tokenizer = HighlightTokenizer::new();
        let source = "let s = \"héllo wörld\";";
        let tree = tokenizer.tokenize(source, "rs").unwrap();
        assert_eq!(tree.text_content(), source);
    }

    #[test]
    fn test_plain_text_has_no_spans() {
        let mut tokenizer = HighlightTokenizer::new();
        let tree = tokenizer.tokenize("hello\nworld", "plain").unwrap();
        assert_eq!(tree, TokenTree::plain("hello\nworld"));
    }

    #[test]
    fn test_unknown_language_is_missing_collaborator() {
        let mut tokenizer = HighlightTokenizer::new();
        let err = tokenizer.tokenize("x", "cobol").unwrap_err();
        assert!(matches!(err, CodeStepsError::MissingCollaborator(_)));
    }

    #[test]
    fn test_every_grammar_initializes() {
        let tokenizer = HighlightTokenizer::new();
        for lang in LanguageId::ALL {
            assert!(tokenizer.supports(*lang), "{:?} not initialized", lang);
        }
    }

    #[test]
    fn test_nested_capture_wins_over_outer() {
        let span = |start_col, end_col, capture| CaptureSpan {
            start_col,
            end_col,
            capture,
        };
        let line = LineCaptures {
            spans: vec![span(0, 10, 0), span(3, 5, 1), span(3, 8, 2)],
        };
        assert_eq!(line.capture_at(1), Some(0));
        assert_eq!(line.capture_at(4), Some(1));
        assert_eq!(line.capture_at(6), Some(2));
        assert_eq!(line.capture_at(9), Some(0));
        assert_eq!(line.capture_at(10), None);
    }

    #[test]
    fn test_escape_inside_string_is_tagged() {
        let mut tokenizer = HighlightTokenizer::new();
        let tree = tokenizer.tokenize("let s = \"a\\nb\";", "rust").unwrap();
        let classes = classes_of(&tree, "\\n").expect("escape should be its own span");
        assert_eq!(classes[1], "escape");
    }

    #[test]
    fn test_byte_to_char_col() {
        assert_eq!(byte_to_char_col("héllo", 3), 2);
        assert_eq!(byte_to_char_col("héllo", 2), 1);
        assert_eq!(byte_to_char_col("abc", 10), 3);
    }
}
