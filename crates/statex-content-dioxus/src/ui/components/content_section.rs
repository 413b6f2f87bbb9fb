use dioxus::events::KeyboardEvent;
use dioxus::prelude::*;
use statex_content_engine::CollapsedSet;
use statex_content_engine::ContentBlock;
use statex_content_engine::render::{HeaderControl, indent_px, is_toggle_key};

/// One block: its header control, and while expanded its content and children.
///
/// Collapsing a block unmounts its children but leaves their entries in the
/// collapsed set alone, so they come back in the state they were left in.
#[component]
pub fn ContentSection(block: ContentBlock, collapsed: Signal<CollapsedSet>) -> Element {
    let mut collapsed = collapsed;
    let control = HeaderControl::for_block(&block, &collapsed.read());
    let indent = indent_px(block.level);
    let id = block.id;

    rsx! {
        section {
            class: "content-block level-{block.level}",
            div {
                id: "{block.id}",
                class: "content-block-header",
                role: "button",
                tabindex: "0",
                "aria-expanded": "{control.expanded}",
                "aria-controls": "{control.controls}",
                "aria-label": "{control.label}",
                style: "padding-left: {indent}px;",
                onclick: move |_| {
                    let now_collapsed = collapsed.write().toggle(id);
                    log::debug!("{id} collapsed: {now_collapsed}");
                },
                onkeydown: move |evt: KeyboardEvent| {
                    if is_toggle_key(&evt.key().to_string()) {
                        // Space would otherwise scroll the page
                        evt.prevent_default();
                        collapsed.write().toggle(id);
                    }
                },
                span {
                    class: "content-block-toggle",
                    if control.expanded { "▾ " } else { "▸ " }
                }
                span {
                    class: "content-block-title",
                    "{block.title}"
                }
            }
            if control.expanded {
                div {
                    id: "{control.controls}",
                    class: "content-block-body",
                    if !block.content.is_empty() {
                        div {
                            class: "content-block-content",
                            style: "padding-left: {indent}px;",
                            dangerous_inner_html: "{block.content}",
                        }
                    }
                    for child in block.children.iter() {
                        ContentSection {
                            key: "{child.id}",
                            block: child.clone(),
                            collapsed,
                        }
                    }
                }
            }
        }
    }
}
