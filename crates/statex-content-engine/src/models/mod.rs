pub mod article_file;

pub use article_file::{ARTICLE_EXTENSIONS, ArticleFile, ArticleFormat};
