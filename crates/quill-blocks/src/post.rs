//! Post card helpers: excerpts, author initials and dates.

use chrono::{DateTime, NaiveDate};
use quill_lexical::get_excerpt;

use crate::model::{LayoutBlock, Post, User};

/// Summary text for a post card.
///
/// Uses the SEO description when set, otherwise an excerpt of the first
/// rich text found in the post hero, then in the layout (content block
/// columns or hero blocks). Returns `""` when the post has no text at all.
pub fn post_excerpt(post: &Post, word_limit: usize) -> String {
    if let Some(description) = post
        .meta
        .as_ref()
        .and_then(|meta| meta.description.as_deref())
        .filter(|description| !description.is_empty())
    {
        return description.to_owned();
    }

    if let Some(rich_text) = post.hero.as_ref().and_then(|hero| hero.rich_text.as_ref()) {
        return get_excerpt(rich_text, word_limit);
    }

    for block in &post.layout {
        let rich_text = match block {
            LayoutBlock::Content(content) => content
                .columns
                .iter()
                .flatten()
                .find_map(|column| column.rich_text.as_ref()),
            LayoutBlock::Hero(hero) => hero.rich_text.as_ref(),
            _ => None,
        };
        if let Some(rich_text) = rich_text {
            return get_excerpt(rich_text, word_limit);
        }
    }

    String::new()
}

/// Up to two uppercase initials for an author avatar.
///
/// ```
/// use quill_blocks::{User, author_initials};
///
/// let user = User { name: Some("ada lovelace byron".to_owned()), ..User::default() };
/// assert_eq!(author_initials(&user), "AL");
/// ```
pub fn author_initials(user: &User) -> String {
    if let Some(name) = user.name.as_deref().filter(|name| !name.is_empty()) {
        let initials: String = name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect();
        return initials.to_uppercase().chars().take(2).collect();
    }

    user.email
        .as_deref()
        .and_then(|email| email.chars().next())
        .map_or_else(|| "A".to_owned(), |first| first.to_uppercase().collect())
}

/// Format a CMS timestamp as e.g. `Jan 5, 2024`.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates. Anything else is
/// returned unchanged.
pub fn format_date(value: &str) -> String {
    const FORMAT: &str = "%b %-d, %Y";

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return timestamp.format(FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.format(FORMAT).to_string();
    }
    tracing::debug!(value, "Unparsable post date");
    value.to_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn post(value: serde_json::Value) -> Post {
        serde_json::from_value(value).unwrap()
    }

    fn rich(text: &str) -> serde_json::Value {
        json!({"root": {"children": [{"type": "paragraph", "children": [{"type": "text", "text": text}]}]}})
    }

    fn user(name: Option<&str>, email: Option<&str>) -> User {
        User {
            name: name.map(str::to_owned),
            email: email.map(str::to_owned),
            ..User::default()
        }
    }

    #[test]
    fn test_excerpt_prefers_meta_description() {
        let p = post(json!({
            "meta": {"description": "From SEO"},
            "hero": {"richText": rich("From hero")}
        }));
        assert_eq!(post_excerpt(&p, 25), "From SEO");
    }

    #[test]
    fn test_excerpt_from_hero() {
        let p = post(json!({"meta": {"description": ""}, "hero": {"richText": rich("one two three")}}));
        assert_eq!(post_excerpt(&p, 2), "one two...");
    }

    #[test]
    fn test_excerpt_from_layout() {
        let p = post(json!({"layout": [
            {"blockType": "mediaBlock"},
            {"blockType": "content", "columns": [{"size": "half"}, {"richText": rich("column text")}]},
            {"blockType": "hero", "richText": rich("later hero")}
        ]}));
        assert_eq!(post_excerpt(&p, 25), "column text");

        let p = post(json!({"layout": [{"blockType": "hero", "richText": rich("block hero")}]}));
        assert_eq!(post_excerpt(&p, 25), "block hero");
    }

    #[test]
    fn test_excerpt_without_text() {
        assert_eq!(post_excerpt(&post(json!({"title": "Only a title"})), 25), "");
    }

    #[test]
    fn test_author_initials() {
        assert_eq!(author_initials(&user(Some("Grace Hopper"), None)), "GH");
        assert_eq!(author_initials(&user(Some("cher"), Some("c@x.io"))), "C");
        assert_eq!(author_initials(&user(None, Some("editor@x.io"))), "E");
        assert_eq!(author_initials(&user(Some(""), None)), "A");
        assert_eq!(author_initials(&user(None, None)), "A");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-05T10:30:00.000Z"), "Jan 5, 2024");
        assert_eq!(format_date("2023-12-25"), "Dec 25, 2023");
        assert_eq!(format_date("soon"), "soon");
    }
}
