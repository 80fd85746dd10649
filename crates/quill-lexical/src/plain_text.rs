//! Plain-text extraction, excerpts and truncation.
//!
//! Used for card previews, search-result summaries and meta descriptions,
//! never for display markup.

use crate::node::{Document, Node};

/// Word budget for post card excerpts.
pub const CARD_EXCERPT_WORDS: usize = 25;

/// Word budget for search-result descriptions.
pub const SEARCH_EXCERPT_WORDS: usize = 30;

/// Word budget when the caller has no context-specific limit.
pub const DEFAULT_EXCERPT_WORDS: usize = 50;

/// Extract the text of a document, ignoring all formatting.
///
/// Text leaves contribute their text; container nodes join their children's
/// text with a single space. Returns `""` for documents without a root.
///
/// ```
/// use quill_lexical::{Document, render_as_plain_text};
///
/// let doc = Document::from_json(r#"{"root":{"children":[
///     {"type":"paragraph","children":[{"type":"text","text":"Hello"}]},
///     {"type":"paragraph","children":[{"type":"text","text":"World"}]}
/// ]}}"#).unwrap();
/// assert_eq!(render_as_plain_text(&doc), "Hello World");
/// ```
#[must_use]
pub fn render_as_plain_text(document: &Document) -> String {
    match &document.root {
        Some(root) => join_text(&root.children),
        None => String::new(),
    }
}

fn extract_text(node: &Node) -> String {
    match node {
        Node::Text(text) => text.text.clone(),
        other => join_text(other.children()),
    }
}

fn join_text(children: &[Node]) -> String {
    children
        .iter()
        .map(extract_text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First `word_limit` words of a document's plain text.
///
/// When the text has more words than the limit, the first `word_limit`
/// words are joined by single spaces and `...` is appended. Otherwise the
/// plain text is returned unchanged.
#[must_use]
pub fn get_excerpt(document: &Document, word_limit: usize) -> String {
    excerpt_from_text(&render_as_plain_text(document), word_limit)
}

/// Word-bounded excerpt of already extracted text. See [`get_excerpt`].
#[must_use]
pub fn excerpt_from_text(text: &str, word_limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= word_limit {
        return text.to_owned();
    }
    let mut excerpt = words[..word_limit].join(" ");
    excerpt.push_str("...");
    excerpt
}

/// Shorten `value` to at most `limit` characters plus `ellipsis`.
///
/// Values of `limit` characters or fewer are returned unchanged. With
/// `complete_words`, the cut-off word is dropped entirely so the result ends
/// on a word boundary.
///
/// ```
/// use quill_lexical::truncate;
///
/// assert_eq!(truncate("The quick brown fox", 12, true, "..."), "The quick...");
/// assert_eq!(truncate("The quick brown fox", 12, false, "..."), "The quick br...");
/// ```
#[must_use]
pub fn truncate(value: &str, limit: usize, complete_words: bool, ellipsis: &str) -> String {
    let Some((cut, _)) = value.char_indices().nth(limit) else {
        return value.to_owned();
    };
    let head = &value[..cut];

    if complete_words {
        let mut words: Vec<&str> = head.split(' ').collect();
        words.pop();
        format!("{}{ellipsis}", words.join(" "))
    } else {
        format!("{head}{ellipsis}")
    }
}
