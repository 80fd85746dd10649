//! Per-block HTML views.
//!
//! Each layout block type renders to one `<section>`. Views append to a
//! shared buffer; every CMS string they interpolate is escaped, and rich-text
//! fields are embedded through the Lexical renderer.

mod archive;
mod content;
mod cta;
mod hero;
mod media;

use std::fmt::Write;

use quill_lexical::{Document, render};

use crate::layout::LayoutOptions;
use crate::source::PostSource;

/// Shared state for rendering one layout.
pub struct RenderContext<'a> {
    pub options: &'a LayoutOptions,
    /// Runs archive queries. Without one, query archives show their empty
    /// state.
    pub source: Option<&'a dyn PostSource>,
}

/// A block that renders itself as a page section.
pub trait BlockView {
    /// Append this block's markup to `out`.
    fn render_into(&self, ctx: &RenderContext<'_>, out: &mut String);
}

/// Write `<div class="...">` holding the rendered document.
fn write_rich_text(out: &mut String, class: &str, document: &Document) {
    write!(out, r#"<div class="{class}">{}</div>"#, render(document)).unwrap();
}

/// Write `<div class="...">`, or a bare `<div>` when there is no class.
fn open_div(out: &mut String, class: &str) {
    if class.is_empty() {
        out.push_str("<div>");
    } else {
        write!(out, r#"<div class="{class}">"#).unwrap();
    }
}
