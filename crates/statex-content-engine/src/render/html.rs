use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{HeaderControl, indent_px};
use crate::collapse::CollapsedSet;
use crate::sections::ContentBlock;

/// Render an outline to static HTML.
///
/// Used where no client runtime drives the outline (server-side rendering,
/// previews). Block content is emitted verbatim; titles and labels are escaped.
/// Collapsed regions carry the `hidden` attribute.
pub fn render_html(blocks: &[ContentBlock], collapsed: &CollapsedSet) -> String {
    let mut out = String::from("<div class=\"collapsible-content\">\n");
    for block in blocks {
        render_block(&mut out, block, collapsed);
    }
    out.push_str("</div>\n");
    out
}

fn render_block(out: &mut String, block: &ContentBlock, collapsed: &CollapsedSet) {
    let control = HeaderControl::for_block(block, collapsed);
    let indent = indent_px(block.level);

    out.push_str(&format!(
        "<section class=\"content-block level-{}\">\n",
        block.level
    ));
    out.push_str(&format!(
        "<div id=\"{}\" class=\"content-block-header\" role=\"button\" tabindex=\"0\" \
         aria-expanded=\"{}\" aria-controls=\"{}\" aria-label=\"{}\" \
         style=\"padding-left: {indent}px\">{}</div>\n",
        block.id,
        control.expanded,
        control.controls,
        encode_double_quoted_attribute(&control.label),
        encode_text(&block.title),
    ));

    let hidden = if control.expanded { "" } else { " hidden" };
    out.push_str(&format!(
        "<div id=\"{}\" class=\"content-block-body\"{hidden}>\n",
        control.controls
    ));
    if !block.content.is_empty() {
        out.push_str(&format!(
            "<div class=\"content-block-content\" style=\"padding-left: {indent}px\">{}</div>\n",
            block.content
        ));
    }
    for child in &block.children {
        render_block(out, child, collapsed);
    }
    out.push_str("</div>\n</section>\n");
}
