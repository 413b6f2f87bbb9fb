use serde_json::Value;

/// Where article markup comes from.
///
/// The CMS hands articles over either as a markup string or as a JSON
/// container. Containers are searched for `html`, then `content.html`; anything
/// else is parsed as its JSON text so that some string is always produced.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    Markup(String),
    Structured(Value),
}

impl DocumentSource {
    /// Extract the markup string to sectionize. Never fails.
    pub fn into_markup(self) -> String {
        match self {
            DocumentSource::Markup(markup) => markup,
            DocumentSource::Structured(value) => markup_from_value(value),
        }
    }
}

fn markup_from_value(value: Value) -> String {
    if let Value::String(markup) = value {
        return markup;
    }
    if let Some(html) = value.get("html").and_then(Value::as_str) {
        return html.to_string();
    }
    if let Some(html) = value.pointer("/content/html").and_then(Value::as_str) {
        return html.to_string();
    }
    log::debug!("document container has no html field, using its JSON text");
    value.to_string()
}

impl From<String> for DocumentSource {
    fn from(markup: String) -> Self {
        DocumentSource::Markup(markup)
    }
}

impl From<&str> for DocumentSource {
    fn from(markup: &str) -> Self {
        DocumentSource::Markup(markup.to_string())
    }
}

impl From<&String> for DocumentSource {
    fn from(markup: &String) -> Self {
        DocumentSource::Markup(markup.clone())
    }
}

impl From<Value> for DocumentSource {
    fn from(value: Value) -> Self {
        DocumentSource::Structured(value)
    }
}
