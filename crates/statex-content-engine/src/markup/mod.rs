//! # Markup parsing
//!
//! A small, tolerant HTML fragment parser. Article bodies are authored in a
//! CMS and rendered as-is, so the parser must accept anything and never fail.
//!
//! ## Phases
//!
//! 1. **Lexing** (`lexer`): Logos splits the source into tags, text, comments
//!    and declarations. Every byte lands in exactly one token.
//! 2. **Tree building** (`tree`): a stack of open elements turns the token
//!    stream into a [`MarkupNode`] forest, applying void elements, raw text
//!    bodies and the common implied end tags.
//!
//! ## Key Invariants
//!
//! - Nodes store byte spans into the source; serializing a node is slicing
//!   the source, so markup round-trips byte for byte.
//! - Sibling spans at the same level are ordered and non-overlapping, and the
//!   root nodes tile the whole input.

pub mod elements;
pub mod lexer;
mod tree;

use std::ops::Range;

pub use tree::{Element, MarkupNode, NodeKind};

/// A parsed markup fragment borrowing its source.
#[derive(Debug, Clone)]
pub struct Fragment<'a> {
    source: &'a str,
    nodes: Vec<MarkupNode>,
}

impl<'a> Fragment<'a> {
    pub fn parse(source: &'a str) -> Self {
        let nodes = tree::TreeBuilder::new().build(source);
        Self { source, nodes }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Top-level nodes in document order
    pub fn nodes(&self) -> &[MarkupNode] {
        &self.nodes
    }

    pub fn slice(&self, span: Range<usize>) -> &'a str {
        &self.source[span]
    }

    /// Serialized markup of a node, including its own tags.
    pub fn outer_html(&self, node: &MarkupNode) -> &'a str {
        self.slice(node.span.clone())
    }

    /// Concatenated, entity-decoded text of a node and its descendants.
    ///
    /// Comments and declarations contribute nothing.
    pub fn text_content(&self, node: &MarkupNode) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: &MarkupNode, out: &mut String) {
        match &node.kind {
            NodeKind::Text => {
                out.push_str(&html_escape::decode_html_entities(self.outer_html(node)));
            }
            NodeKind::Element(element) => {
                for child in &element.children {
                    self.collect_text(child, out);
                }
            }
            NodeKind::Comment | NodeKind::Declaration | NodeKind::StrayEndTag => {}
        }
    }
}
