pub mod article_list;
pub mod collapsible_content;
pub mod content_section;
pub mod error_screen;

pub use article_list::ArticleList;
pub use collapsible_content::CollapsibleContent;
pub use content_section::ContentSection;
pub use error_screen::ErrorScreen;
