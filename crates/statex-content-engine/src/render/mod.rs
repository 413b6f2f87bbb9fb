//! # Rendering contract
//!
//! What every front end needs to present an outline the same way:
//!
//! - a header control per block that toggles on click and on Enter/Space,
//!   exposes its expanded state and carries an "Expand X"/"Collapse X" label;
//! - a content region whose visibility depends only on the collapsed set;
//! - nested blocks indented by level, beneath their parent's content region.
//!
//! A collapsed block hides its descendants without touching their own
//! collapsed state, so re-expanding restores them exactly as they were.

pub mod html;
pub mod outline;

use crate::collapse::CollapsedSet;
use crate::sections::{BlockId, ContentBlock};

pub use html::render_html;
pub use outline::outline;

/// Horizontal indentation per block level, in CSS pixels.
pub const INDENT_PER_LEVEL_PX: u32 = 16;

/// Accessible state of one block's header control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderControl {
    pub expanded: bool,
    pub label: String,
    /// Id of the content region the control shows and hides
    pub controls: String,
}

impl HeaderControl {
    pub fn for_block(block: &ContentBlock, collapsed: &CollapsedSet) -> Self {
        let is_collapsed = collapsed.is_collapsed(block.id);
        Self {
            expanded: !is_collapsed,
            label: toggle_label(&block.title, is_collapsed),
            controls: region_id(block.id),
        }
    }
}

/// "Expand <title>" when collapsed, "Collapse <title>" otherwise.
pub fn toggle_label(title: &str, is_collapsed: bool) -> String {
    let verb = if is_collapsed { "Expand" } else { "Collapse" };
    format!("{verb} {title}")
}

/// Whether a key (by its DOM `KeyboardEvent.key` name) activates a header.
pub fn is_toggle_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

pub fn region_id(id: BlockId) -> String {
    format!("{id}-content")
}

pub fn indent_px(level: u8) -> u32 {
    u32::from(level) * INDENT_PER_LEVEL_PX
}

/// A block that is currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleBlock<'a> {
    pub block: &'a ContentBlock,
    /// Nesting depth in the tree (roots are 0)
    pub depth: usize,
    pub collapsed: bool,
}

/// Depth-first list of blocks whose ancestors are all expanded.
pub fn flatten_visible<'a>(
    blocks: &'a [ContentBlock],
    collapsed: &CollapsedSet,
) -> Vec<VisibleBlock<'a>> {
    let mut out = Vec::new();
    let mut stack: Vec<(&ContentBlock, usize)> = blocks.iter().rev().map(|b| (b, 0)).collect();

    while let Some((block, depth)) = stack.pop() {
        let is_collapsed = collapsed.is_collapsed(block.id);
        out.push(VisibleBlock {
            block,
            depth,
            collapsed: is_collapsed,
        });
        if !is_collapsed {
            stack.extend(block.children.iter().rev().map(|c| (c, depth + 1)));
        }
    }

    out
}
