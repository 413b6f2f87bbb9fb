use std::collections::BTreeSet;

use crate::sections::{BlockId, ContentBlock};

/// The set of block ids currently collapsed.
///
/// Owned by whatever hosts the outline (a UI signal, a TUI app struct).
/// There is no notion of a valid id: toggling an id that no block carries
/// simply records it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapsedSet {
    ids: BTreeSet<BlockId>,
}

impl CollapsedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting state for freshly sectionized blocks.
    ///
    /// With `initially_collapsed` every root block starts collapsed; nested
    /// blocks always start expanded.
    pub fn initial(blocks: &[ContentBlock], initially_collapsed: bool) -> Self {
        if !initially_collapsed {
            return Self::new();
        }
        Self {
            ids: blocks.iter().map(|b| b.id).collect(),
        }
    }

    /// Flip membership of `id`, returning whether it is now collapsed.
    pub fn toggle(&mut self, id: BlockId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Value-returning form of [`toggle`](Self::toggle).
    pub fn toggled(mut self, id: BlockId) -> Self {
        self.toggle(id);
        self
    }

    pub fn collapse(&mut self, id: BlockId) {
        self.ids.insert(id);
    }

    pub fn expand(&mut self, id: BlockId) {
        self.ids.remove(&id);
    }

    pub fn is_collapsed(&self, id: BlockId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<BlockId> for CollapsedSet {
    fn from_iter<I: IntoIterator<Item = BlockId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
