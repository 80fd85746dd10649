//! Lexical rich-text renderer.
//!
//! This crate turns the JSON documents produced by the CMS rich-text editor
//! into sanitized HTML fragments and plain-text excerpts.
//!
//! # Architecture
//!
//! - [`Document`] / [`Node`]: a closed sum type over the node kinds the
//!   editor emits. Construction from JSON is tolerant: malformed input
//!   becomes an empty document and unknown node kinds become
//!   [`Node::Unknown`] instead of failing the whole document.
//! - [`render`] / [`render_node`]: HTML rendering. All interpolated text and
//!   attribute values are escaped, and the top-level [`render`] returns the
//!   result as [`SafeHtml`].
//! - [`render_as_plain_text`] / [`get_excerpt`]: formatting-free traversal
//!   for previews and meta descriptions.
//!
//! # Example
//!
//! ```
//! use quill_lexical::{Document, render, get_excerpt};
//!
//! let doc = Document::from_json(
//!     r#"{"root":{"type":"root","children":[
//!         {"type":"paragraph","children":[{"type":"text","text":"Hello","format":1}]}
//!     ]}}"#,
//! )?;
//!
//! assert_eq!(render(&doc).as_str(), "<p><strong>Hello</strong></p>");
//! assert_eq!(get_excerpt(&doc, 25), "Hello");
//! # Ok::<(), quill_lexical::DocumentError>(())
//! ```

mod escape;
mod format;
mod html;
mod node;
mod plain_text;
mod renderer;

pub use escape::escape_html;
pub use format::{Alignment, ElementFormat, TextFormat};
pub use html::SafeHtml;
pub use node::{
    Document, DocumentError, ElementNode, HeadingNode, HeadingTag, LinkNode, ListItemNode,
    ListNode, ListType, Node, RootNode, TextNode,
};
pub use plain_text::{
    CARD_EXCERPT_WORDS, DEFAULT_EXCERPT_WORDS, SEARCH_EXCERPT_WORDS, excerpt_from_text,
    get_excerpt, render_as_plain_text, truncate,
};
pub use renderer::{LexicalRenderer, render, render_node, render_text_node, render_value};
