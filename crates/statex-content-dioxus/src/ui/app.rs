use dioxus::prelude::*;
use statex_content_config::Config;
use statex_content_engine::{ArticleFile, io};

use super::components::{ArticleList, CollapsibleContent, ErrorScreen};

const CONTENT_CSS: &str = include_str!("../../assets/content.css");

/// What the main panel shows for the selected article
#[derive(Debug, Clone, PartialEq)]
enum LoadedArticle {
    Markup {
        file: ArticleFile,
        markup: String,
    },
    Failed {
        file: ArticleFile,
        error: String,
    },
}

fn load_article(config: &Config, file: ArticleFile) -> LoadedArticle {
    match io::read_article(&file, &config.articles_path) {
        Ok(source) => LoadedArticle::Markup {
            file,
            markup: source.into_markup(),
        },
        Err(e) => {
            log::error!("Error reading article {:?}: {e}", file.relative_path());
            LoadedArticle::Failed {
                file,
                error: e.to_string(),
            }
        }
    }
}

#[component]
pub fn App(config: Config) -> Element {
    let articles = use_signal({
        let config = config.clone();
        move || match io::scan_article_files(&config.articles_path) {
            Ok(files) => Ok(files),
            Err(e) => {
                log::error!("Error scanning articles: {e}");
                Err(e.to_string())
            }
        }
    });
    let mut loaded = use_signal(|| None::<LoadedArticle>);

    let on_select = {
        let config = config.clone();
        move |file: ArticleFile| {
            log::info!("Opening article {}", file.relative_path());
            loaded.set(Some(load_article(&config, file)));
        }
    };

    let selected = loaded.read().as_ref().map(|article| match article {
        LoadedArticle::Markup { file, .. } | LoadedArticle::Failed { file, .. } => file.clone(),
    });

    rsx! {
        style { {CONTENT_CSS} }
        div {
            class: "app-container",
            div {
                class: "sidebar",
                h2 { "Articles" }
                match &*articles.read() {
                    Ok(files) => rsx! {
                        ArticleList {
                            articles: files.clone(),
                            selected,
                            on_select,
                        }
                    },
                    Err(error) => rsx! {
                        p { class: "article-list-error", "{error}" }
                    },
                }
            }
            div {
                class: "main-content",
                match loaded.read().clone() {
                    Some(LoadedArticle::Markup { file, markup }) => rsx! {
                        h1 { "{file.display_name()}" }
                        CollapsibleContent {
                            key: "{file.relative_path()}",
                            html: markup,
                            fallback_title: config.fallback_title_for(file.display_name()).to_string(),
                            initially_collapsed: config.initially_collapsed,
                            sectionizer: config.sectionizer(),
                        }
                    },
                    Some(LoadedArticle::Failed { file, error }) => rsx! {
                        ErrorScreen {
                            title: "Could not open article",
                            message: "{file.relative_path()}",
                            details: Some(error),
                        }
                    },
                    None => rsx! {
                        div { class: "no-file", "Select an article to view its outline" }
                    },
                }
            }
        }
    }
}
