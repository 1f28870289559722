//! Token tree produced by a tokenizer and consumed by the letter index

/// A node of highlighted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenNode {
    /// Untagged literal text
    Text(String),
    /// A marked span carrying class tags, wrapping further nodes
    Span {
        classes: Vec<String>,
        children: Vec<TokenNode>,
    },
}

impl TokenNode {
    pub fn text(text: impl Into<String>) -> Self {
        TokenNode::Text(text.into())
    }

    /// A span holding a single run of text
    pub fn span<I, S>(classes: I, text: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TokenNode::Span {
            classes: classes.into_iter().map(Into::into).collect(),
            children: vec![TokenNode::Text(text.into())],
        }
    }

    /// Concatenated text of this node and its children
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            TokenNode::Text(t) => out.push_str(t),
            TokenNode::Span { children, .. } => {
                for child in children {
                    child.push_text(out);
                }
            }
        }
    }
}

/// Top-level sequence of token nodes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTree {
    pub nodes: Vec<TokenNode>,
}

impl TokenTree {
    pub fn new(nodes: Vec<TokenNode>) -> Self {
        Self { nodes }
    }

    /// Tree with the whole text as one untagged node
    pub fn plain(text: &str) -> Self {
        Self {
            nodes: vec![TokenNode::text(text)],
        }
    }

    /// Reconstructed plain text
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.push_text(&mut out);
        }
        out
    }
}
