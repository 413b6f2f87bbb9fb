use std::ops::Range;

use super::{
    elements::{closes_implicitly, heading_rank, is_raw_text, is_void},
    lexer::{TagEnd, TokenKind, Tokens},
};

/// What a node in the markup tree is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    Text,
    Comment,
    /// Doctype, CDATA, processing instructions and other declarations
    Declaration,
    /// An end tag with no matching open element
    StrayEndTag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercased tag name
    pub tag: String,
    pub children: Vec<MarkupNode>,
    /// Byte range between the start tag and the end tag
    pub inner: Range<usize>,
}

/// A node of the parsed tree. Spans index into the parsed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupNode {
    pub kind: NodeKind,
    pub span: Range<usize>,
}

impl MarkupNode {
    pub fn element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.element().map(|e| e.tag.as_str())
    }
}

struct OpenElement {
    tag: String,
    start: usize,
    inner_start: usize,
    children: Vec<MarkupNode>,
}

/// Stack machine building a [`MarkupNode`] forest from tokens.
///
/// Tolerates unclosed elements, stray end tags and mis-nested headings the
/// way browsers broadly do, without implementing the full HTML tree
/// construction algorithm.
pub(super) struct TreeBuilder {
    open: Vec<OpenElement>,
    roots: Vec<MarkupNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            open: vec![],
            roots: vec![],
        }
    }

    pub fn build(mut self, source: &str) -> Vec<MarkupNode> {
        let mut tokens = Tokens::new(source);

        while let Some(token) = tokens.next() {
            match token.kind {
                TokenKind::Text | TokenKind::StrayLt => self.push_text(token.span),
                TokenKind::Comment => self.push_leaf(NodeKind::Comment, token.span),
                TokenKind::Declaration | TokenKind::ProcessingInstruction => {
                    self.push_leaf(NodeKind::Declaration, token.span)
                }
                // A tag cut off by the end of input is not a tag
                TokenKind::StartTag(TagEnd::Unterminated) => self.push_text(token.span),
                TokenKind::StartTag(_) => {
                    let Some(tag) = token.tag_name() else {
                        continue;
                    };
                    self.close_implied_by(&tag, token.span.start);

                    // A trailing `/` only ends void elements: `<h2/>x</h2>` is an open h2
                    if is_void(&tag) {
                        self.push_leaf(
                            NodeKind::Element(Element {
                                tag,
                                children: vec![],
                                inner: token.span.end..token.span.end,
                            }),
                            token.span,
                        );
                        continue;
                    }

                    let raw = is_raw_text(&tag);
                    self.open.push(OpenElement {
                        tag: tag.clone(),
                        start: token.span.start,
                        inner_start: token.span.end,
                        children: vec![],
                    });
                    if raw {
                        let body = tokens.raw_text_until(&tag);
                        if !body.is_empty() {
                            self.push_leaf(NodeKind::Text, body);
                        }
                    }
                }
                TokenKind::EndTag => {
                    let Some(tag) = token.tag_name() else {
                        continue;
                    };
                    match self.find_open(&tag) {
                        Some(index) => {
                            // Everything opened after the match ends where the end tag starts
                            while self.open.len() > index + 1 {
                                self.close_top(token.span.start, token.span.start);
                            }
                            self.close_top(token.span.start, token.span.end);
                        }
                        None => self.push_leaf(NodeKind::StrayEndTag, token.span),
                    }
                }
            }
        }

        while !self.open.is_empty() {
            self.close_top(source.len(), source.len());
        }
        self.roots
    }

    /// Index of the open element an end tag for `tag` closes.
    ///
    /// Any heading end tag closes the nearest open heading, so `<h2>x</h3>`
    /// does not leave the heading open.
    fn find_open(&self, tag: &str) -> Option<usize> {
        self.open
            .iter()
            .rposition(|e| e.tag == tag)
            .or_else(|| {
                heading_rank(tag)?;
                self.open
                    .iter()
                    .rposition(|e| heading_rank(&e.tag).is_some())
            })
    }

    fn close_implied_by(&mut self, new_tag: &str, at: usize) {
        while self
            .open
            .last()
            .is_some_and(|top| closes_implicitly(&top.tag, new_tag))
        {
            self.close_top(at, at);
        }
    }

    fn close_top(&mut self, inner_end: usize, end: usize) {
        if let Some(open) = self.open.pop() {
            let node = MarkupNode {
                kind: NodeKind::Element(Element {
                    tag: open.tag,
                    children: open.children,
                    inner: open.inner_start..inner_end,
                }),
                span: open.start..end,
            };
            self.children_mut().push(node);
        }
    }

    fn push_text(&mut self, span: Range<usize>) {
        // Merge adjacent text runs (e.g. "a " + "<" + " b")
        if let Some(last) = self.children_mut().last_mut()
            && last.kind == NodeKind::Text
            && last.span.end == span.start
        {
            last.span.end = span.end;
            return;
        }
        self.push_leaf(NodeKind::Text, span);
    }

    fn push_leaf(&mut self, kind: NodeKind, span: Range<usize>) {
        self.children_mut().push(MarkupNode { kind, span });
    }

    fn children_mut(&mut self) -> &mut Vec<MarkupNode> {
        match self.open.last_mut() {
            Some(open) => &mut open.children,
            None => &mut self.roots,
        }
    }
}
