use dioxus::prelude::*;

/// Error shown in place of an article that could not be loaded
#[component]
pub fn ErrorScreen(title: String, message: String, details: Option<String>) -> Element {
    rsx! {
        div {
            class: "error-screen",
            role: "alert",
            h1 { "{title}" }
            p { "{message}" }
            if let Some(ref detail_text) = details {
                pre {
                    class: "error-details",
                    "{detail_text}"
                }
            }
        }
    }
}
