use relative_path::{RelativePath, RelativePathBuf};

/// File extensions recognised as articles.
pub const ARTICLE_EXTENSIONS: &[&str] = &["html", "htm", "json"];

/// How an article file is stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleFormat {
    /// Raw markup (`.html`, `.htm`)
    Markup,
    /// CMS export wrapping the markup (`.json`)
    Json,
}

/// An article file with a path relative to the articles directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleFile {
    relative_path: RelativePathBuf,
    display_name: String,
    format: ArticleFormat,
}

impl ArticleFile {
    /// Create from a relative path, or `None` if the extension is not an article one.
    pub fn new(relative_path: RelativePathBuf) -> Option<Self> {
        let format = match relative_path.extension()?.to_ascii_lowercase().as_str() {
            "html" | "htm" => ArticleFormat::Markup,
            "json" => ArticleFormat::Json,
            _ => return None,
        };
        let display_name = relative_path.file_stem().unwrap_or("Untitled").to_string();
        Some(Self {
            relative_path,
            display_name,
            format,
        })
    }

    pub fn from_relative_str(path: &str) -> Option<Self> {
        Self::new(RelativePathBuf::from(path))
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// File name without extension, used as the fallback article title
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn format(&self) -> ArticleFormat {
        self.format
    }
}
