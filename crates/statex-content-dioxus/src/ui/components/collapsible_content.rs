use dioxus::prelude::*;
use statex_content_engine::{CollapsedSet, ContentBlock, Sectionizer};
use std::hash::{DefaultHasher, Hash, Hasher};

use super::ContentSection;

/// Article markup shown as an outline of collapsible sections.
///
/// Any change to the props rebuilds the block tree and remounts the outline,
/// so the collapsed set starts over from `initially_collapsed`. Block ids do
/// not survive a rebuild, so state from the old tree would point at the wrong
/// blocks.
#[component]
pub fn CollapsibleContent(
    html: String,
    fallback_title: String,
    #[props(default)] initially_collapsed: bool,
    #[props(default)] sectionizer: Sectionizer,
) -> Element {
    let generation = {
        let mut hasher = DefaultHasher::new();
        (&html, &fallback_title, initially_collapsed, sectionizer).hash(&mut hasher);
        hasher.finish()
    };
    let blocks = sectionizer.sectionize(html, &fallback_title);

    rsx! {
        SectionOutline {
            key: "{generation:x}",
            blocks,
            initially_collapsed,
        }
    }
}

#[component]
fn SectionOutline(blocks: Vec<ContentBlock>, initially_collapsed: bool) -> Element {
    let collapsed = use_signal(|| CollapsedSet::initial(&blocks, initially_collapsed));

    rsx! {
        div {
            class: "collapsible-content",
            for block in blocks.iter() {
                ContentSection {
                    key: "{block.id}",
                    block: block.clone(),
                    collapsed,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::{ScopeId, VirtualDom};
    use dioxus_ssr::render;
    use statex_content_engine::HeadingTiers;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn render_content(html: &str, initially_collapsed: bool, sectionizer: Sectionizer) -> String {
        let mut dom = VirtualDom::new_with_props(
            CollapsibleContent,
            CollapsibleContentProps {
                html: html.to_string(),
                fallback_title: "Article".to_string(),
                initially_collapsed,
                sectionizer,
            },
        );
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_expanded_outline_renders_headers_content_and_children() {
        let html = render_content(
            "<h2>A</h2><p>x</p><h3>B</h3><p>y</p>",
            false,
            Sectionizer::default(),
        );

        assert!(html.contains(r#"aria-expanded="true""#));
        assert!(html.contains(r#"aria-label="Collapse A""#));
        assert!(html.contains(r#"aria-controls="content-block-1-content""#));
        assert!(html.contains(r#"id="content-block-2""#));
        assert!(html.contains("<p>x</p>"));
        assert!(html.contains("<p>y</p>"));
        assert!(html.contains("padding-left: 16px;"));
        assert!(!html.contains(r#"aria-expanded="false""#));
    }

    #[test]
    fn test_initially_collapsed_hides_root_regions() {
        let html = render_content(
            "<h2>A</h2><p>x</p><h3>B</h3><p>y</p>",
            true,
            Sectionizer::default(),
        );

        assert!(html.contains(r#"aria-expanded="false""#));
        assert!(html.contains(r#"aria-label="Expand A""#));
        assert!(!html.contains("content-block-1-content\" class"));
        assert!(!html.contains("<p>x</p>"));
        // B is still expanded, it is just not on screen
        assert!(!html.contains("content-block-2"));
    }

    #[test]
    fn test_markup_without_headings_uses_fallback_title() {
        let html = render_content("<p>no headings</p>", false, Sectionizer::default());

        assert!(html.contains("Article"));
        assert!(html.contains(r#"aria-label="Collapse Article""#));
        assert!(html.contains("<p>no headings</p>"));
    }

    #[test]
    fn test_custom_tiers_change_section_boundaries() {
        let tiers = HeadingTiers::starting_at(1).unwrap();
        let html = render_content("<h1>Top</h1><p>x</p>", false, Sectionizer::new(tiers));

        assert!(html.contains(r#"aria-label="Collapse Top""#));
        assert!(!html.contains("Collapse Article"));
    }

    #[derive(Clone)]
    struct Inputs {
        html: String,
        initially_collapsed: bool,
    }

    /// Re-reads its inputs on every render so a test can swap them.
    #[component]
    fn Harness() -> Element {
        let inputs = use_context::<Rc<RefCell<Inputs>>>();
        let Inputs {
            html,
            initially_collapsed,
        } = inputs.borrow().clone();
        rsx! {
            CollapsibleContent {
                html,
                fallback_title: "Article".to_string(),
                initially_collapsed,
            }
        }
    }

    fn harness(html: &str, initially_collapsed: bool) -> (VirtualDom, Rc<RefCell<Inputs>>) {
        let inputs = Rc::new(RefCell::new(Inputs {
            html: html.to_string(),
            initially_collapsed,
        }));
        let mut dom = VirtualDom::new(Harness).with_root_context(inputs.clone());
        dom.rebuild_in_place();
        (dom, inputs)
    }

    fn rerender(dom: &mut VirtualDom) -> String {
        dom.mark_dirty(ScopeId::APP);
        dom.render_immediate_to_vec();
        render(dom)
    }

    #[test]
    fn test_changing_html_resets_collapsed_state() {
        // Blocks 1 and 3 are roots here and start collapsed
        let (mut dom, inputs) = harness("<h2>A</h2><p>a</p><h3>A1</h3><h2>C</h2><p>c</p>", true);
        let before = render(&dom);
        assert_eq!(before.matches(r#"aria-expanded="false""#).count(), 2);
        assert!(before.contains(r#"aria-label="Expand C""#));

        // Block 2 becomes a root; a stale set would leave it expanded
        inputs.borrow_mut().html = "<h2>X</h2><p>x</p><h2>Y</h2><p>y</p><h2>Z</h2><p>z</p>".to_string();
        let after = rerender(&mut dom);

        assert_eq!(after.matches(r#"aria-expanded="false""#).count(), 3);
        assert!(after.contains(r#"aria-label="Expand Y""#));
        assert!(!after.contains(r#"aria-expanded="true""#));
        assert!(!after.contains("<p>y</p>"));
    }

    #[test]
    fn test_changing_initially_collapsed_applies_to_same_html() {
        let (mut dom, inputs) = harness("<h2>A</h2><p>x</p><h2>B</h2><p>y</p>", false);
        assert!(render(&dom).contains("<p>x</p>"));

        inputs.borrow_mut().initially_collapsed = true;
        let collapsed = rerender(&mut dom);
        assert_eq!(collapsed.matches(r#"aria-expanded="false""#).count(), 2);
        assert!(!collapsed.contains("<p>x</p>"));

        inputs.borrow_mut().initially_collapsed = false;
        let expanded = rerender(&mut dom);
        assert!(expanded.contains("<p>x</p>"));
        assert!(expanded.contains("<p>y</p>"));
    }

    #[test]
    fn test_rerender_with_same_inputs_keeps_outline() {
        let (mut dom, _inputs) = harness("<h2>A</h2><p>x</p>", true);
        let before = render(&dom);
        assert_eq!(rerender(&mut dom), before);
    }
}
