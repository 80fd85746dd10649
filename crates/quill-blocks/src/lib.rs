//! CMS page layouts rendered to HTML.
//!
//! Pages and posts from the CMS carry a hero and a list of layout blocks
//! (hero, content, media, call to action, archive). This crate models that
//! JSON, renders each block to a section of Tailwind-styled HTML with
//! embedded Lexical rich text, and resolves the links and post listings the
//! blocks point at.
//!
//! # Example
//!
//! ```
//! use quill_blocks::{LayoutRenderer, Page};
//!
//! let page: Page = serde_json::from_str(r#"{
//!     "title": "About",
//!     "hero": {"type": "minimal", "richText": {"root": {"children": [
//!         {"type": "heading", "tag": "h1", "children": [{"type": "text", "text": "About us"}]}
//!     ]}}},
//!     "layout": []
//! }"#).unwrap();
//!
//! let html = LayoutRenderer::new().render_page(&page);
//! assert!(html.as_str().contains("<h1>About us</h1>"));
//! ```

mod blocks;
mod de;
mod icons;
mod layout;
mod link;
mod model;
mod post;
mod source;

pub use blocks::{BlockView, RenderContext};
pub use layout::{LayoutOptions, LayoutRenderer};
pub use link::{LinkConfig, resolve_link_url};
pub use model::{
    Appearance, ArchiveBlock, Category, CategoryRef, Column, ColumnSize, ContentBlock, CtaBlock,
    HeroBlock, HeroType, LayoutBlock, LinkField, LinkItem, LinkType, Media, MediaBlock,
    MediaPosition, MediaSize, MediaSizes, Page, PopulateBy, Post, Reference, ReferenceValue,
    ReferencedDoc, Seo, User,
};
pub use post::{author_initials, format_date, post_excerpt};
pub use source::{
    ArchivePosts, PostPage, PostQuery, PostSource, SourceError, StaticPostSource, build_url,
};
