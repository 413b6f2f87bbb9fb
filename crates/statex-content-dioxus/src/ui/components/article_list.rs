use dioxus::events::{Key, KeyboardEvent};
use dioxus::prelude::*;
use statex_content_engine::ArticleFile;

#[component]
pub fn ArticleList(
    articles: Vec<ArticleFile>,
    selected: Option<ArticleFile>,
    on_select: EventHandler<ArticleFile>,
) -> Element {
    let selected_index = selected
        .as_ref()
        .and_then(|s| articles.iter().position(|a| a.relative_path() == s.relative_path()));

    let handle_keydown = {
        let articles = articles.clone();
        move |evt: KeyboardEvent| {
            let next = match evt.key() {
                Key::ArrowDown => selected_index.map_or(0, |i| i + 1),
                Key::ArrowUp => selected_index.map_or(0, |i| i.saturating_sub(1)),
                _ => return,
            };
            // Prevent scrolling
            evt.prevent_default();
            if let Some(article) = articles.get(next) {
                on_select.call(article.clone());
            }
        }
    };

    rsx! {
        div {
            class: "article-list",
            tabindex: "0",
            onkeydown: handle_keydown,
            if articles.is_empty() {
                p { class: "article-list-empty", "No articles found" }
            }
            for (index, article) in articles.iter().enumerate() {
                div {
                    key: "{article.relative_path()}",
                    class: if Some(index) == selected_index { "article-item selected" } else { "article-item" },
                    title: "{article.relative_path()}",
                    onclick: {
                        let article = article.clone();
                        move |_| on_select.call(article.clone())
                    },
                    "{article.display_name()}"
                }
            }
        }
    }
}
