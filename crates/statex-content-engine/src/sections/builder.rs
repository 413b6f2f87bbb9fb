use super::{BlockId, ContentBlock};

#[derive(Debug)]
struct ArenaBlock {
    id: BlockId,
    level: u8,
    title: String,
    content: String,
    children: Vec<usize>,
}

/// Assembles blocks into a tree as headings arrive in document order.
///
/// Blocks live in an arena; `open` holds the indices of the blocks on the
/// current rightmost path, with strictly increasing levels. A new block pops
/// every open block at its level or deeper and becomes a child of whatever
/// remains on top, or a root when nothing does.
#[derive(Debug, Default)]
pub(crate) struct SectionBuilder {
    arena: Vec<ArenaBlock>,
    roots: Vec<usize>,
    open: Vec<usize>,
}

impl SectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a heading block and return its id.
    pub fn push(&mut self, level: u8, title: String, content: String) -> BlockId {
        while self
            .open
            .last()
            .is_some_and(|&top| self.arena[top].level >= level)
        {
            self.open.pop();
        }

        let index = self.arena.len();
        match self.open.last() {
            Some(&parent) => self.arena[parent].children.push(index),
            None => {
                if level > 0 {
                    log::debug!("heading {title:?} at level {level} has no parent, attaching at root");
                }
                self.roots.push(index);
            }
        }

        let id = self.alloc(level, title, content);
        self.open.push(index);
        id
    }

    /// Add a root block that never becomes a parent.
    pub fn push_detached(&mut self, title: String, content: String) -> BlockId {
        self.roots.push(self.arena.len());
        self.alloc(0, title, content)
    }

    fn alloc(&mut self, level: u8, title: String, content: String) -> BlockId {
        let id = BlockId::from_sequence(self.arena.len() as u32 + 1);
        self.arena.push(ArenaBlock {
            id,
            level,
            title,
            content,
            children: vec![],
        });
        id
    }

    pub fn finish(self) -> Vec<ContentBlock> {
        // Children always come after their parent in the arena, so building
        // back to front has every child ready before its parent needs it.
        let mut built: Vec<Option<ContentBlock>> = Vec::with_capacity(self.arena.len());
        built.resize_with(self.arena.len(), || None);

        for (index, block) in self.arena.into_iter().enumerate().rev() {
            let children = block
                .children
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            built[index] = Some(ContentBlock {
                id: block.id,
                level: block.level,
                title: block.title,
                content: block.content,
                children,
            });
        }

        self.roots
            .iter()
            .filter_map(|&root| built[root].take())
            .collect()
    }
}
