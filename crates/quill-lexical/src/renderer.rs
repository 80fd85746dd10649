//! HTML rendering of Lexical documents.
//!
//! Rendering never fails. Unknown node kinds are logged and skipped, and a
//! document without a root renders to empty markup.

use std::fmt::Write;

use serde_json::Value;

use crate::escape::escape_html;
use crate::format::TextFormat;
use crate::html::SafeHtml;
use crate::node::{Document, ElementNode, HeadingNode, LinkNode, ListNode, ListType, Node, TextNode};
use crate::plain_text::{get_excerpt, render_as_plain_text};

/// Render a document to sanitized HTML.
///
/// Top-level nodes are rendered in order and concatenated.
#[must_use]
pub fn render(document: &Document) -> SafeHtml {
    if document.is_empty() {
        return SafeHtml::empty();
    }
    let mut out = String::with_capacity(1024);
    write_children(document.children(), &mut out);
    SafeHtml::from_escaped(out)
}

/// Render raw JSON that may or may not be a document.
#[must_use]
pub fn render_value(value: &Value) -> SafeHtml {
    render(&Document::from_value(value))
}

/// Render a single node to an HTML fragment.
///
/// The result is not wrapped as [`SafeHtml`]; only [`render`] does that.
#[must_use]
pub fn render_node(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Render a text leaf with its formatting and inline style.
///
/// Text is escaped, then wrapped as strong, em, s, u, code, sub, sup in that
/// order (each wrap encloses the previous result), then wrapped in a styled
/// `<span>` when the node carries inline CSS.
#[must_use]
pub fn render_text_node(node: &TextNode) -> String {
    let mut text = escape_html(&node.text);

    for (flag, tag) in TextFormat::WRAP_ORDER {
        if node.format.contains(flag) {
            text = format!("<{tag}>{text}</{tag}>");
        }
    }

    if let Some(style) = &node.style {
        text = format!(r#"<span style="{}">{text}</span>"#, escape_html(style));
    }

    text
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Root(root) => write_children(&root.children, out),
        Node::Paragraph(el) => write_paragraph(el, out),
        Node::Heading(heading) => write_heading(heading, out),
        Node::List(list) => write_list(list, out),
        Node::ListItem(item) => {
            out.push_str("<li>");
            write_children(&item.element.children, out);
            out.push_str("</li>");
        }
        Node::Quote(el) => {
            write!(out, "<blockquote{}>", class_attr(el)).unwrap();
            write_children(&el.children, out);
            out.push_str("</blockquote>");
        }
        Node::Code(el) => {
            let mut raw = String::new();
            for child in &el.children {
                collect_raw_text(child, &mut raw);
            }
            write!(out, "<pre><code>{}</code></pre>", escape_html(&raw)).unwrap();
        }
        Node::Link(link) => write_link(link, out),
        Node::Text(text) => out.push_str(&render_text_node(text)),
        Node::LineBreak => out.push_str("<br>"),
        Node::Tab => out.push('\t'),
        Node::Unknown { kind, .. } => {
            tracing::warn!(node_type = %kind, "Unknown Lexical node type");
        }
    }
}

fn write_children(children: &[Node], out: &mut String) {
    for child in children {
        write_node(child, out);
    }
}

fn render_children(children: &[Node]) -> String {
    let mut out = String::new();
    write_children(children, &mut out);
    out
}

/// ` class="…"` for an aligned element, empty otherwise.
fn class_attr(el: &ElementNode) -> String {
    el.alignment_class()
        .map(|class| format!(r#" class="{class}""#))
        .unwrap_or_default()
}

fn write_paragraph(el: &ElementNode, out: &mut String) {
    let content = render_children(&el.children);
    // Empty paragraphs keep authored blank lines visible.
    if content.trim().is_empty() {
        out.push_str("<p><br></p>");
        return;
    }
    write!(out, "<p{}>{content}</p>", class_attr(el)).unwrap();
}

fn write_heading(heading: &HeadingNode, out: &mut String) {
    let tag = heading.tag.as_str();
    write!(out, "<{tag}{}>", class_attr(&heading.element)).unwrap();
    write_children(&heading.element.children, out);
    write!(out, "</{tag}>").unwrap();
}

fn write_list(list: &ListNode, out: &mut String) {
    let tag = if list.list_type == ListType::Number {
        "ol"
    } else {
        "ul"
    };
    out.push('<');
    out.push_str(tag);
    if list.list_type == ListType::Check {
        out.push_str(r#" class="checklist""#);
    }
    if list.list_type == ListType::Number
        && let Some(start) = list.start.filter(|&n| n != 0)
    {
        write!(out, r#" start="{start}""#).unwrap();
    }
    out.push('>');
    write_children(&list.element.children, out);
    write!(out, "</{tag}>").unwrap();
}

fn write_link(link: &LinkNode, out: &mut String) {
    let href = link.url.as_deref().unwrap_or("#");
    write!(out, r#"<a href="{}""#, escape_html(href)).unwrap();
    if let Some(rel) = &link.rel {
        write!(out, r#" rel="{}""#, escape_html(rel)).unwrap();
    }
    if let Some(target) = &link.target {
        write!(out, r#" target="{}""#, escape_html(target)).unwrap();
    }
    out.push('>');
    write_children(&link.element.children, out);
    out.push_str("</a>");
}

/// Unformatted text of a code block subtree.
fn collect_raw_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&text.text),
        Node::LineBreak => out.push('\n'),
        Node::Tab => out.push('\t'),
        other => {
            for child in other.children() {
                collect_raw_text(child, out);
            }
        }
    }
}

/// Stateless rendering facade.
///
/// Holds no state between calls; construct one wherever a renderer value is
/// more convenient than the free functions.
#[derive(Clone, Copy, Debug, Default)]
pub struct LexicalRenderer;

impl LexicalRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// See [`render`].
    #[must_use]
    pub fn render(&self, document: &Document) -> SafeHtml {
        render(document)
    }

    /// See [`render_value`].
    #[must_use]
    pub fn render_value(&self, value: &Value) -> SafeHtml {
        render_value(value)
    }

    /// See [`render_node`].
    #[must_use]
    pub fn render_node(&self, node: &Node) -> String {
        render_node(node)
    }

    /// See [`render_as_plain_text`].
    #[must_use]
    pub fn render_as_plain_text(&self, document: &Document) -> String {
        render_as_plain_text(document)
    }

    /// See [`get_excerpt`].
    #[must_use]
    pub fn get_excerpt(&self, document: &Document, word_limit: usize) -> String {
        get_excerpt(document, word_limit)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn node(value: serde_json::Value) -> Node {
        Node::from_value(&value).unwrap()
    }

    fn text(s: &str) -> serde_json::Value {
        json!({"type": "text", "text": s})
    }

    #[test]
    fn test_paragraph() {
        let html = render_node(&node(json!({"type": "paragraph", "children": [text("Hi")]})));
        assert_eq!(html, "<p>Hi</p>");
    }

    #[test]
    fn test_paragraph_with_alignment() {
        let html = render_node(&node(json!({
            "type": "paragraph",
            "format": "justify",
            "children": [text("Hi")]
        })));
        assert_eq!(html, r#"<p class="text-justify">Hi</p>"#);
    }

    #[test]
    fn test_paragraph_numeric_alignment() {
        let html = render_node(&node(json!({
            "type": "paragraph",
            "format": 2,
            "children": [text("Hi")]
        })));
        assert_eq!(html, r#"<p class="text-right">Hi</p>"#);
    }

    #[test]
    fn test_empty_paragraph() {
        let html = render_node(&node(json!({"type": "paragraph", "format": "center", "children": []})));
        assert_eq!(html, "<p><br></p>");
    }

    #[test]
    fn test_whitespace_paragraph() {
        let html = render_node(&node(json!({"type": "paragraph", "children": [text("  ")]})));
        assert_eq!(html, "<p><br></p>");
    }

    #[test]
    fn test_heading_default_tag() {
        let html = render_node(&node(json!({"type": "heading", "children": [text("T")]})));
        assert_eq!(html, "<h1>T</h1>");
    }

    #[test]
    fn test_bullet_list() {
        let html = render_node(&node(json!({
            "type": "list",
            "listType": "bullet",
            "children": [
                {"type": "listitem", "children": [text("a")]},
                {"type": "listitem", "children": [text("b")]}
            ]
        })));
        assert_eq!(html, "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn test_check_list() {
        let html = render_node(&node(json!({
            "type": "list",
            "listType": "check",
            "start": 4,
            "children": [{"type": "listitem", "checked": true, "children": [text("done")]}]
        })));
        assert_eq!(html, r#"<ul class="checklist"><li>done</li></ul>"#);
    }

    #[test]
    fn test_numbered_list_without_start() {
        let html = render_node(&node(json!({"type": "list", "listType": "number", "children": []})));
        assert_eq!(html, "<ol></ol>");
    }

    #[test]
    fn test_numbered_list_start_zero_is_omitted() {
        let html = render_node(&node(json!({
            "type": "list",
            "listType": "number",
            "start": 0,
            "children": []
        })));
        assert_eq!(html, "<ol></ol>");
    }

    #[test]
    fn test_quote() {
        let html = render_node(&node(json!({
            "type": "quote",
            "format": "center",
            "children": [text("wise")]
        })));
        assert_eq!(html, r#"<blockquote class="text-center">wise</blockquote>"#);
    }

    #[test]
    fn test_code_block_is_textual() {
        let html = render_node(&node(json!({
            "type": "code",
            "children": [
                {"type": "code-highlight", "text": "if a < b {"},
                {"type": "linebreak"},
                {"type": "tab"},
                {"type": "text", "text": "go()", "format": 1},
                {"type": "linebreak"},
                {"type": "code-highlight", "text": "}"}
            ]
        })));
        assert_eq!(html, "<pre><code>if a &lt; b {\n\tgo()\n}</code></pre>");
    }

    #[test]
    fn test_link_with_rel_and_target() {
        let html = render_node(&node(json!({
            "type": "link",
            "url": "https://example.com/?a=1&b=2",
            "rel": "noopener",
            "target": "_blank",
            "children": [text("site")]
        })));
        assert_eq!(
            html,
            r#"<a href="https://example.com/?a=1&amp;b=2" rel="noopener" target="_blank">site</a>"#
        );
    }

    #[test]
    fn test_link_without_url() {
        let html = render_node(&node(json!({"type": "link", "children": [text("x")]})));
        assert_eq!(html, r##"<a href="#">x</a>"##);
    }

    #[test]
    fn test_link_attribute_escaping() {
        let html = render_node(&node(json!({
            "type": "link",
            "url": "/x",
            "target": "\" onclick=\"evil()",
            "children": []
        })));
        assert_eq!(
            html,
            r#"<a href="/x" target="&quot; onclick=&quot;evil()"></a>"#
        );
    }

    #[test]
    fn test_text_plain_is_escaped() {
        let html = render_node(&node(text("<b>raw</b> & more")));
        assert_eq!(html, "&lt;b&gt;raw&lt;/b&gt; &amp; more");
    }

    #[test]
    fn test_text_all_formats_nest_in_fixed_order() {
        let html = render_text_node(&TextNode {
            text: "x".to_owned(),
            format: TextFormat::all(),
            ..TextNode::default()
        });
        assert_eq!(
            html,
            "<sup><sub><code><u><s><em><strong>x</strong></em></s></u></code></sub></sup>"
        );
    }

    #[test]
    fn test_text_code_format_escapes_once() {
        let html = render_text_node(&TextNode {
            text: "a<b".to_owned(),
            format: TextFormat::CODE,
            ..TextNode::default()
        });
        assert_eq!(html, "<code>a&lt;b</code>");
    }

    #[test]
    fn test_text_underline_strikethrough() {
        let html = render_text_node(&TextNode {
            text: "u".to_owned(),
            format: TextFormat::STRIKETHROUGH | TextFormat::UNDERLINE,
            ..TextNode::default()
        });
        assert_eq!(html, "<u><s>u</s></u>");
    }

    #[test]
    fn test_text_style_outermost() {
        let html = render_text_node(&TextNode {
            text: "hot".to_owned(),
            format: TextFormat::BOLD,
            style: Some(r#"color: red; font-family: "x""#.to_owned()),
            ..TextNode::default()
        });
        assert_eq!(
            html,
            r#"<span style="color: red; font-family: &quot;x&quot;"><strong>hot</strong></span>"#
        );
    }

    #[test]
    fn test_text_empty() {
        assert_eq!(render_text_node(&TextNode::default()), "");
    }

    #[test]
    fn test_linebreak_and_tab() {
        let html = render_node(&node(json!({
            "type": "paragraph",
            "children": [text("a"), {"type": "linebreak"}, {"type": "tab"}, text("b")]
        })));
        assert_eq!(html, "<p>a<br>\tb</p>");
    }

    #[test]
    fn test_unknown_node_renders_nothing() {
        let html = render_node(&node(json!({
            "type": "upload",
            "children": [text("hidden")]
        })));
        assert_eq!(html, "");
    }

    #[test]
    fn test_unknown_node_logs_warning() {
        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        let html = tracing::subscriber::with_default(subscriber, || {
            render_node(&node(json!({"type": "upload", "children": []})))
        });
        assert_eq!(html, "");

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Unknown Lexical node type"));
        assert!(logs.contains("node_type=upload"));
    }

    #[test]
    fn test_nested_root_renders_children() {
        let html = render_node(&node(json!({"type": "root", "children": [text("in")]})));
        assert_eq!(html, "in");
    }

    #[test]
    fn test_render_value_without_root() {
        assert!(render_value(&json!(null)).is_empty());
        assert!(render_value(&json!("text")).is_empty());
    }

    #[test]
    fn test_facade_matches_free_functions() {
        let doc = Document::from_value(&json!({
            "root": {"type": "root", "children": [{"type": "paragraph", "children": [text("one two")]}]}
        }));
        let renderer = LexicalRenderer::new();
        assert_eq!(renderer.render(&doc), render(&doc));
        assert_eq!(renderer.render_as_plain_text(&doc), "one two");
        assert_eq!(renderer.get_excerpt(&doc, 1), "one...");
    }
}
