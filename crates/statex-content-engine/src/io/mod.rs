use crate::models::{ArticleFile, ArticleFormat};
use crate::source::DocumentSource;
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid articles directory: {0}")]
    InvalidArticlesDir(String),
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read a file below the articles root and return its text
pub fn read_file(relative_path: &RelativePath, articles_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(articles_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Load an article as a [`DocumentSource`] ready for sectionizing.
///
/// JSON exports are parsed so the sectionizer can look in them for markup;
/// invalid JSON is an error rather than being sectionized as text.
pub fn read_article(file: &ArticleFile, articles_root: &Path) -> Result<DocumentSource, IoError> {
    let content = read_file(file.relative_path(), articles_root)?;
    match file.format() {
        ArticleFormat::Markup => Ok(DocumentSource::Markup(content)),
        ArticleFormat::Json => serde_json::from_str(&content)
            .map(DocumentSource::Structured)
            .map_err(|source| IoError::Json {
                path: file.relative_path().to_path(articles_root),
                source,
            }),
    }
}

/// Scan for article files in the articles directory, sorted by path
pub fn scan_article_files(articles_root: &Path) -> Result<Vec<ArticleFile>, IoError> {
    if !articles_root.exists() {
        return Err(IoError::InvalidArticlesDir(
            "articles directory not found".to_string(),
        ));
    }

    let mut paths = Vec::new();
    scan_directory_recursive(articles_root, &mut paths)?;
    paths.sort();

    let files = paths
        .iter()
        .filter_map(|path| path.strip_prefix(articles_root).ok())
        .filter_map(|relative| RelativePathBuf::from_path(relative).ok())
        .filter_map(ArticleFile::new)
        .collect();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_articles_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidArticlesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
