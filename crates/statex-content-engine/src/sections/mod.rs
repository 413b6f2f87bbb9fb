//! # Content sectioning
//!
//! Turns a flat article body into an outline of titled, collapsible blocks.
//!
//! ## Algorithm
//!
//! 1. Parse the markup ([`crate::markup::Fragment`]).
//! 2. Section headings are the elements, at any depth, whose tag is one of the
//!    four [`HeadingTiers`]. Other headings stay ordinary content.
//! 3. No section headings: a single synthetic block titled with the fallback
//!    title holds the entire input.
//! 4. Otherwise each heading opens a block whose content is the markup up to
//!    the next section heading. Blocks nest under the nearest preceding block
//!    of a shallower tier; blocks with no such ancestor become roots.
//!
//! Elements that wrap section headings (`<article>`, `<section>`, a post
//! `<div>`) are opened up: their tags are dropped and their children take part
//! in sectioning. Any other node is kept whole as content.
//!
//! Markup before the first heading becomes a leading root block titled with
//! the fallback title, so nothing in the input is lost.
//!
//! Ids (`content-block-<n>`) are handed out in creation order and are only
//! meaningful for one parse. Re-parsing edited content renumbers them.

mod builder;

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Range;

use crate::markup::{Fragment, MarkupNode};
use crate::source::DocumentSource;
use builder::SectionBuilder;

/// Identifier of a block within one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(u32);

impl BlockId {
    pub const PREFIX: &'static str = "content-block-";

    pub fn from_sequence(sequence: u32) -> Self {
        Self(sequence)
    }

    /// 1-based creation order
    pub fn sequence(self) -> u32 {
        self.0
    }

    /// Parse the `content-block-<n>` form.
    pub fn parse(s: &str) -> Option<Self> {
        s.strip_prefix(Self::PREFIX)?.parse().ok().map(Self)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl Serialize for BlockId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One titled, collapsible section of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentBlock {
    pub id: BlockId,
    /// Tier of the introducing heading, 0 for the shallowest
    pub level: u8,
    pub title: String,
    /// Serialized markup between this heading and the next one
    pub content: String,
    pub children: Vec<ContentBlock>,
}

impl ContentBlock {
    /// Depth-first, pre-order walk over this block and its descendants.
    pub fn walk(&self) -> impl Iterator<Item = &ContentBlock> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let block = stack.pop()?;
            stack.extend(block.children.iter().rev());
            Some(block)
        })
    }
}

/// All blocks of a tree in document order.
pub fn flatten(blocks: &[ContentBlock]) -> Vec<&ContentBlock> {
    blocks.iter().flat_map(ContentBlock::walk).collect()
}

/// The four heading tags that delimit sections.
///
/// Defaults to `h2`..=`h5`: articles carry a single `h1` page title and are
/// sectioned by the four levels beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeadingTiers {
    first: u8,
}

impl HeadingTiers {
    pub const COUNT: u8 = 4;

    /// Tiers starting at `h<first>`. `first` must be 1, 2 or 3 so that all
    /// four tiers are real heading tags.
    pub fn starting_at(first: u8) -> Option<Self> {
        (1..=3).contains(&first).then_some(Self { first })
    }

    pub fn first_rank(self) -> u8 {
        self.first
    }

    /// Tier of a lowercased tag name, or `None` if it is not a section heading.
    pub fn tier_of(self, tag: &str) -> Option<u8> {
        let rank = crate::markup::elements::heading_rank(tag)?;
        (self.first..self.first + Self::COUNT)
            .contains(&rank)
            .then(|| rank - self.first)
    }

    pub fn tags(self) -> impl Iterator<Item = String> {
        (self.first..self.first + Self::COUNT).map(|rank| format!("h{rank}"))
    }
}

impl Default for HeadingTiers {
    fn default() -> Self {
        Self { first: 2 }
    }
}

/// Splits article markup into [`ContentBlock`] trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Sectionizer {
    tiers: HeadingTiers,
}

impl Sectionizer {
    pub fn new(tiers: HeadingTiers) -> Self {
        Self { tiers }
    }

    pub fn tiers(&self) -> HeadingTiers {
        self.tiers
    }

    pub fn sectionize(
        &self,
        document: impl Into<DocumentSource>,
        fallback_title: &str,
    ) -> Vec<ContentBlock> {
        let markup = document.into().into_markup();
        let fragment = Fragment::parse(&markup);

        let mut pieces = Vec::new();
        if !self.collect_pieces(fragment.nodes(), &mut pieces) {
            log::debug!("no section headings found, using synthetic block {fallback_title:?}");
            let mut builder = SectionBuilder::new();
            builder.push_detached(fallback_title.to_string(), markup.clone());
            return builder.finish();
        }

        let mut builder = SectionBuilder::new();
        let mut open: Option<(u8, String)> = None;
        let mut chunks: Vec<Range<usize>> = Vec::new();
        let mut headings = 0;

        for piece in pieces {
            match piece {
                Piece::Chunk(span) => chunks.push(span),
                Piece::Heading(node, tier) => {
                    flush(&mut builder, open.take(), &markup, &chunks, fallback_title);
                    chunks.clear();
                    open = Some((tier, heading_title(&fragment, node)));
                    headings += 1;
                }
            }
        }
        flush(&mut builder, open, &markup, &chunks, fallback_title);

        let blocks = builder.finish();
        log::trace!("sectionized {headings} headings into {} root blocks", blocks.len());
        blocks
    }

    /// Flatten `nodes` into section headings and the content between them.
    ///
    /// Descends only into elements that contain a section heading somewhere
    /// below; everything else becomes a single chunk. Returns whether any
    /// section heading was found.
    fn collect_pieces<'n>(&self, nodes: &'n [MarkupNode], out: &mut Vec<Piece<'n>>) -> bool {
        let mut found = false;
        for node in nodes {
            if let Some(tier) = node.tag().and_then(|tag| self.tiers.tier_of(tag)) {
                out.push(Piece::Heading(node, tier));
                found = true;
                continue;
            }
            match node.element() {
                Some(element) => {
                    let mark = out.len();
                    if self.collect_pieces(&element.children, out) {
                        found = true;
                    } else {
                        out.truncate(mark);
                        out.push(Piece::Chunk(node.span.clone()));
                    }
                }
                None => out.push(Piece::Chunk(node.span.clone())),
            }
        }
        found
    }
}

enum Piece<'n> {
    Heading(&'n MarkupNode, u8),
    /// Byte range of markup that holds no section heading
    Chunk(Range<usize>),
}

/// Emit the block for the heading that was open, or the lead block when no
/// heading has been seen yet.
fn flush(
    builder: &mut SectionBuilder,
    open: Option<(u8, String)>,
    markup: &str,
    chunks: &[Range<usize>],
    fallback_title: &str,
) {
    let content = join_chunks(markup, chunks);
    match open {
        Some((tier, title)) => {
            builder.push(tier, title, content);
        }
        None if !content.is_empty() => {
            builder.push_detached(fallback_title.to_string(), content);
        }
        None => {}
    }
}

/// Concatenate chunk slices, separating chunks that were not adjacent in the
/// source (they sat on either side of a dropped wrapper tag) by a newline.
fn join_chunks(markup: &str, chunks: &[Range<usize>]) -> String {
    let mut out = String::new();
    let mut last_end = None;
    for chunk in chunks {
        if last_end.is_some_and(|end| end != chunk.start) {
            out.push('\n');
        }
        out.push_str(&markup[chunk.clone()]);
        last_end = Some(chunk.end);
    }
    out.trim().to_string()
}

/// Entity-decoded text of a heading with its ends trimmed.
fn heading_title(fragment: &Fragment<'_>, heading: &MarkupNode) -> String {
    fragment.text_content(heading).trim().to_string()
}

/// Sectionize with the default `h2`..=`h5` tiers.
pub fn sectionize(document: impl Into<DocumentSource>, fallback_title: &str) -> Vec<ContentBlock> {
    Sectionizer::default().sectionize(document, fallback_title)
}
