use super::flatten_visible;
use crate::collapse::CollapsedSet;
use crate::sections::ContentBlock;

/// Plain-text outline, one visible block per line.
///
/// `-` marks an expanded block and `+` a collapsed one; each nesting step
/// indents by two spaces. Blocks under a collapsed ancestor are omitted.
pub fn outline(blocks: &[ContentBlock], collapsed: &CollapsedSet) -> String {
    flatten_visible(blocks, collapsed)
        .iter()
        .map(|v| {
            let marker = if v.collapsed { '+' } else { '-' };
            format!("{}{marker} {}", "  ".repeat(v.depth), v.block.title)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
