//! Lexical document model.
//!
//! Documents arrive as JSON that is not schema-validated upstream, so every
//! constructor here is tolerant: missing or mistyped fields fall back to
//! defaults, and node kinds the renderer does not know are kept as
//! [`Node::Unknown`] rather than rejected.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::format::{ElementFormat, TextFormat};

/// Error returned when document text is not valid JSON.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The input could not be parsed as JSON.
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A rich-text document.
///
/// A document without a root renders to nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// Top of the node tree, if the input had one.
    pub root: Option<RootNode>,
}

impl Document {
    /// Build a document from parsed JSON.
    ///
    /// Never fails: non-object input or a missing/non-object `root` yields
    /// an empty document.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let root = value
            .as_object()
            .and_then(|obj| obj.get("root"))
            .and_then(Value::as_object)
            .map(RootNode::from_object);
        Self { root }
    }

    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] only when the text is not valid JSON.
    /// Valid JSON of any other shape produces an empty document.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    /// Top-level nodes, or an empty slice when there is no root.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match &self.root {
            Some(root) => &root.children,
            None => &[],
        }
    }

    /// Whether the document has no top-level nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// The root node of a document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RootNode {
    pub children: Vec<Node>,
    pub direction: Option<String>,
    pub format: Option<ElementFormat>,
    pub indent: u32,
    pub version: u32,
}

impl RootNode {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            children: children_of(obj),
            direction: string_field(obj, "direction"),
            format: ElementFormat::from_value(obj.get("format")),
            indent: u32_field(obj, "indent").unwrap_or(0),
            version: u32_field(obj, "version").unwrap_or(0),
        }
    }
}

/// One node of the document tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// A nested root; renders as its children.
    Root(RootNode),
    Paragraph(ElementNode),
    Heading(HeadingNode),
    List(ListNode),
    ListItem(ListItemNode),
    Quote(ElementNode),
    Code(ElementNode),
    /// `link` and `autolink` nodes.
    Link(LinkNode),
    /// `text` and `code-highlight` leaves.
    Text(TextNode),
    LineBreak,
    Tab,
    /// A node kind the renderer does not handle. Children are kept so that
    /// plain-text extraction can still reach nested text.
    Unknown { kind: String, children: Vec<Node> },
}

impl Node {
    /// Build a node from parsed JSON. Returns `None` for non-object values.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let kind = obj.get("type").and_then(Value::as_str).unwrap_or_default();

        let node = match kind {
            "root" => Self::Root(RootNode::from_object(obj)),
            "paragraph" => Self::Paragraph(ElementNode::from_object(obj)),
            "heading" => Self::Heading(HeadingNode::from_object(obj)),
            "list" => Self::List(ListNode::from_object(obj)),
            "listitem" => Self::ListItem(ListItemNode::from_object(obj)),
            "quote" => Self::Quote(ElementNode::from_object(obj)),
            "code" => Self::Code(ElementNode::from_object(obj)),
            "link" | "autolink" => Self::Link(LinkNode::from_object(obj)),
            "text" | "code-highlight" => Self::Text(TextNode::from_object(obj)),
            "linebreak" => Self::LineBreak,
            "tab" => Self::Tab,
            other => Self::Unknown {
                kind: other.to_owned(),
                children: children_of(obj),
            },
        };
        Some(node)
    }

    /// The discriminant as it appears in the JSON `type` field.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Root(_) => "root",
            Self::Paragraph(_) => "paragraph",
            Self::Heading(_) => "heading",
            Self::List(_) => "list",
            Self::ListItem(_) => "listitem",
            Self::Quote(_) => "quote",
            Self::Code(_) => "code",
            Self::Link(_) => "link",
            Self::Text(_) => "text",
            Self::LineBreak => "linebreak",
            Self::Tab => "tab",
            Self::Unknown { kind, .. } => kind.as_str(),
        }
    }

    /// Child nodes in document order; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Root(root) => &root.children,
            Self::Paragraph(el) | Self::Quote(el) | Self::Code(el) => &el.children,
            Self::Heading(heading) => &heading.element.children,
            Self::List(list) => &list.element.children,
            Self::ListItem(item) => &item.element.children,
            Self::Link(link) => &link.element.children,
            Self::Unknown { children, .. } => children,
            Self::Text(_) | Self::LineBreak | Self::Tab => &[],
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).ok_or_else(|| serde::de::Error::custom("expected a node object"))
    }
}

/// Attributes shared by all block and inline container nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementNode {
    pub children: Vec<Node>,
    pub format: Option<ElementFormat>,
    pub indent: u32,
    pub direction: Option<String>,
}

impl ElementNode {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            children: children_of(obj),
            format: ElementFormat::from_value(obj.get("format")),
            indent: u32_field(obj, "indent").unwrap_or(0),
            direction: string_field(obj, "direction"),
        }
    }

    /// Alignment class for this element, if its format encodes one.
    #[must_use]
    pub fn alignment_class(&self) -> Option<&'static str> {
        self.format
            .as_ref()
            .and_then(ElementFormat::alignment)
            .map(|alignment| alignment.class_name())
    }
}

/// Heading level tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeadingTag {
    #[default]
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingTag {
    /// Parse `h1`..`h6`; anything else is `None`.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            "h4" => Some(Self::H4),
            "h5" => Some(Self::H5),
            "h6" => Some(Self::H6),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeadingNode {
    pub element: ElementNode,
    /// Missing or invalid tags fall back to `h1`.
    pub tag: HeadingTag,
}

impl HeadingNode {
    fn from_object(obj: &Map<String, Value>) -> Self {
        let tag = obj
            .get("tag")
            .and_then(Value::as_str)
            .and_then(HeadingTag::parse)
            .unwrap_or_default();
        Self {
            element: ElementNode::from_object(obj),
            tag,
        }
    }
}

/// Kind of list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListType {
    #[default]
    Bullet,
    Number,
    Check,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListNode {
    pub element: ElementNode,
    pub list_type: ListType,
    /// First item number; only meaningful for numbered lists.
    pub start: Option<u32>,
}

impl ListNode {
    fn from_object(obj: &Map<String, Value>) -> Self {
        let list_type = match obj.get("listType").and_then(Value::as_str) {
            Some("number") => ListType::Number,
            Some("check") => ListType::Check,
            _ => ListType::Bullet,
        };
        Self {
            element: ElementNode::from_object(obj),
            list_type,
            start: u32_field(obj, "start"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListItemNode {
    pub element: ElementNode,
    pub value: Option<u32>,
    /// Checkbox state for items of check lists.
    pub checked: Option<bool>,
}

impl ListItemNode {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            element: ElementNode::from_object(obj),
            value: u32_field(obj, "value"),
            checked: obj.get("checked").and_then(Value::as_bool),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinkNode {
    pub element: ElementNode,
    pub url: Option<String>,
    pub rel: Option<String>,
    pub target: Option<String>,
}

impl LinkNode {
    /// Reads `url`/`rel`/`target` from the node, falling back to the
    /// `fields` object used by the CMS link feature (`fields.url`,
    /// `fields.newTab`).
    fn from_object(obj: &Map<String, Value>) -> Self {
        let fields = obj.get("fields").and_then(Value::as_object);
        let new_tab = fields
            .and_then(|f| f.get("newTab"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let url = string_field(obj, "url").or_else(|| fields.and_then(|f| string_field(f, "url")));
        let mut rel = string_field(obj, "rel");
        let mut target = string_field(obj, "target");
        if new_tab {
            target.get_or_insert_with(|| "_blank".to_owned());
            rel.get_or_insert_with(|| "noopener noreferrer".to_owned());
        }

        Self {
            element: ElementNode::from_object(obj),
            url,
            rel,
            target,
        }
    }
}

/// A run of text with uniform formatting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextNode {
    pub text: String,
    pub format: TextFormat,
    /// Raw inline CSS.
    pub style: Option<String>,
    pub mode: Option<String>,
    pub detail: u32,
}

impl TextNode {
    /// Plain text node without formatting.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            text: obj
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
            format: TextFormat::from_value(obj.get("format")),
            style: string_field(obj, "style"),
            mode: string_field(obj, "mode"),
            detail: u32_field(obj, "detail").unwrap_or(0),
        }
    }
}

fn children_of(obj: &Map<String, Value>) -> Vec<Node> {
    let Some(children) = obj.get("children").and_then(Value::as_array) else {
        return Vec::new();
    };
    children
        .iter()
        .filter_map(|child| {
            let node = Node::from_value(child);
            if node.is_none() {
                tracing::debug!(value = %child, "Skipping non-object child node");
            }
            node
        })
        .collect()
}

/// Non-empty string field.
fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn u32_field(obj: &Map<String, Value>, key: &str) -> Option<u32> {
    obj.get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::format::{Alignment, TextFormat};

    #[test]
    fn test_document_without_root() {
        assert!(Document::from_value(&json!(null)).root.is_none());
        assert!(Document::from_value(&json!({})).root.is_none());
        assert!(Document::from_value(&json!({"root": "nope"})).root.is_none());
        assert!(Document::from_value(&json!([1, 2, 3])).root.is_none());
    }

    #[test]
    fn test_document_from_json_invalid_syntax() {
        let result = Document::from_json("{not json");
        assert!(matches!(result, Err(DocumentError::Json(_))));
    }

    #[test]
    fn test_document_from_json_non_document_is_empty() {
        let doc = Document::from_json("42").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_root_fields() {
        let doc = Document::from_value(&json!({
            "root": {
                "type": "root",
                "children": [],
                "direction": "ltr",
                "format": "",
                "indent": 0,
                "version": 1
            }
        }));
        let root = doc.root.unwrap();
        assert_eq!(root.direction.as_deref(), Some("ltr"));
        assert_eq!(root.format, Some(ElementFormat::Other(String::new())));
        assert_eq!(root.version, 1);
    }

    #[test]
    fn test_children_non_array_is_empty() {
        let node = Node::from_value(&json!({"type": "paragraph", "children": "oops"})).unwrap();
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_non_object_children_are_dropped() {
        let node = Node::from_value(&json!({
            "type": "paragraph",
            "children": [1, {"type": "text", "text": "kept"}, null]
        }))
        .unwrap();
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].kind(), "text");
    }

    #[test]
    fn test_unknown_node_keeps_kind_and_children() {
        let node = Node::from_value(&json!({
            "type": "upload",
            "children": [{"type": "text", "text": "inner"}]
        }))
        .unwrap();
        assert_eq!(node.kind(), "upload");
        assert_eq!(node.children().len(), 1);
    }

    #[test]
    fn test_missing_type_is_unknown() {
        let node = Node::from_value(&json!({"text": "orphan"})).unwrap();
        assert!(matches!(node, Node::Unknown { ref kind, .. } if kind.is_empty()));
    }

    #[test]
    fn test_heading_tag_fallback() {
        let node = Node::from_value(&json!({"type": "heading", "children": []})).unwrap();
        let Node::Heading(heading) = node else {
            panic!("expected heading");
        };
        assert_eq!(heading.tag, HeadingTag::H1);

        let node = Node::from_value(&json!({"type": "heading", "tag": "h9"})).unwrap();
        let Node::Heading(heading) = node else {
            panic!("expected heading");
        };
        assert_eq!(heading.tag, HeadingTag::H1);
    }

    #[test]
    fn test_heading_alignment_class() {
        let node = Node::from_value(&json!({
            "type": "heading",
            "tag": "h3",
            "format": "right",
            "children": []
        }))
        .unwrap();
        let Node::Heading(heading) = node else {
            panic!("expected heading");
        };
        assert_eq!(heading.tag, HeadingTag::H3);
        assert_eq!(
            heading.element.format,
            Some(ElementFormat::Keyword(Alignment::Right))
        );
        assert_eq!(heading.element.alignment_class(), Some("text-right"));
    }

    #[test]
    fn test_list_fields() {
        let node = Node::from_value(&json!({
            "type": "list",
            "listType": "number",
            "start": 3,
            "children": [{"type": "listitem", "value": 3, "children": []}]
        }))
        .unwrap();
        let Node::List(list) = node else {
            panic!("expected list");
        };
        assert_eq!(list.list_type, ListType::Number);
        assert_eq!(list.start, Some(3));
        let Node::ListItem(item) = &list.element.children[0] else {
            panic!("expected list item");
        };
        assert_eq!(item.value, Some(3));
    }

    #[test]
    fn test_list_type_defaults_to_bullet() {
        let node = Node::from_value(&json!({"type": "list", "listType": "weird"})).unwrap();
        let Node::List(list) = node else {
            panic!("expected list");
        };
        assert_eq!(list.list_type, ListType::Bullet);
        assert_eq!(list.start, None);
    }

    #[test]
    fn test_link_top_level_fields() {
        let node = Node::from_value(&json!({
            "type": "link",
            "url": "https://example.com",
            "rel": "nofollow",
            "children": []
        }))
        .unwrap();
        let Node::Link(link) = node else {
            panic!("expected link");
        };
        assert_eq!(link.url.as_deref(), Some("https://example.com"));
        assert_eq!(link.rel.as_deref(), Some("nofollow"));
        assert_eq!(link.target, None);
    }

    #[test]
    fn test_link_fields_object() {
        let node = Node::from_value(&json!({
            "type": "link",
            "fields": {"url": "/about", "newTab": true, "linkType": "custom"},
            "children": []
        }))
        .unwrap();
        let Node::Link(link) = node else {
            panic!("expected link");
        };
        assert_eq!(link.url.as_deref(), Some("/about"));
        assert_eq!(link.target.as_deref(), Some("_blank"));
        assert_eq!(link.rel.as_deref(), Some("noopener noreferrer"));
    }

    #[test]
    fn test_autolink_is_link() {
        let node = Node::from_value(&json!({"type": "autolink", "url": "https://a.b"})).unwrap();
        assert_eq!(node.kind(), "link");
    }

    #[test]
    fn test_text_fields() {
        let node = Node::from_value(&json!({
            "type": "text",
            "text": "Hi",
            "format": 3,
            "style": "color: red",
            "mode": "normal",
            "detail": 0
        }))
        .unwrap();
        let Node::Text(text) = node else {
            panic!("expected text");
        };
        assert_eq!(text.text, "Hi");
        assert_eq!(text.format, TextFormat::BOLD | TextFormat::ITALIC);
        assert_eq!(text.style.as_deref(), Some("color: red"));
        assert_eq!(text.mode.as_deref(), Some("normal"));
    }

    #[test]
    fn test_text_empty_style_is_none() {
        let node = Node::from_value(&json!({"type": "text", "text": "x", "style": ""})).unwrap();
        let Node::Text(text) = node else {
            panic!("expected text");
        };
        assert_eq!(text.style, None);
    }

    #[test]
    fn test_deserialize_document() {
        let doc: Document = serde_json::from_str(
            r#"{"root":{"type":"root","children":[{"type":"paragraph","children":[]}]}}"#,
        )
        .unwrap();
        assert_eq!(doc.children().len(), 1);
    }

    #[test]
    fn test_deserialize_node_rejects_non_object() {
        let result: Result<Node, _> = serde_json::from_str("\"text\"");
        assert!(result.is_err());
    }
}
