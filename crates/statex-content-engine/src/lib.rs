//! Sectioning engine for Statex articles: parses article markup into an
//! outline of collapsible blocks and tracks which of them are collapsed.
//!
//! ```
//! use statex_content_engine::{CollapsedSet, sectionize};
//!
//! let blocks = sectionize("<h2>A</h2><p>x</p><h3>B</h3><p>y</p>", "Article");
//! assert_eq!(blocks[0].title, "A");
//! assert_eq!(blocks[0].children[0].content, "<p>y</p>");
//!
//! let mut collapsed = CollapsedSet::initial(&blocks, false);
//! collapsed.toggle(blocks[0].id);
//! assert!(collapsed.is_collapsed(blocks[0].id));
//! ```

pub mod collapse;
pub mod io;
pub mod markup;
pub mod models;
pub mod render;
pub mod sections;
pub mod source;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use collapse::CollapsedSet;
pub use models::{ArticleFile, ArticleFormat};
pub use sections::{BlockId, ContentBlock, HeadingTiers, Sectionizer, flatten, sectionize};
pub use source::DocumentSource;
