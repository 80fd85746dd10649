//! Link resolution and anchor markup for block links.

use std::fmt::Write;

use quill_lexical::escape_html;

use crate::icons::{self, Icon};
use crate::model::{LinkField, LinkType};

/// URL prefixes used to resolve reference links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkConfig {
    /// Prefix for documents in the `posts` collection.
    pub posts_prefix: String,
    /// Prefix for documents in any other collection.
    pub pages_prefix: String,
    /// URL for links that cannot be resolved.
    pub fallback: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            posts_prefix: "/blog".to_owned(),
            pages_prefix: String::new(),
            fallback: "#".to_owned(),
        }
    }
}

/// Resolve the `href` of a CMS link field.
///
/// Custom links use their URL. Reference links need a populated document
/// with a slug and resolve under the posts or pages prefix depending on the
/// referenced collection. Everything else resolves to the fallback.
///
/// ```
/// use quill_blocks::{LinkConfig, LinkField, LinkType, resolve_link_url};
///
/// let link = LinkField {
///     link_type: Some(LinkType::Custom),
///     url: Some("https://example.com".to_owned()),
///     ..LinkField::default()
/// };
/// assert_eq!(resolve_link_url(&link, &LinkConfig::default()), "https://example.com");
/// ```
pub fn resolve_link_url(link: &LinkField, config: &LinkConfig) -> String {
    match link.link_type {
        Some(LinkType::Custom) => link
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(&config.fallback)
            .to_owned(),
        Some(LinkType::Reference) => link
            .reference
            .as_ref()
            .and_then(|reference| {
                let slug = reference.value.as_ref()?.slug()?;
                let prefix = if reference.relation_to == "posts" {
                    &config.posts_prefix
                } else {
                    &config.pages_prefix
                };
                Some(format!("{prefix}/{slug}"))
            })
            .unwrap_or_else(|| config.fallback.clone()),
        None => config.fallback.clone(),
    }
}

/// How a block draws its link buttons.
pub(crate) struct LinkStyle<'a> {
    pub class: &'a str,
    pub icon_class: &'a str,
    /// Show a chevron on same-tab links. New-tab links always get the
    /// external-link icon.
    pub chevron: bool,
}

/// Write an `<a>` button for `link`.
pub(crate) fn write_link(out: &mut String, link: &LinkField, config: &LinkConfig, style: &LinkStyle) {
    let href = escape_html(&resolve_link_url(link, config));
    let class = escape_html(style.class);
    if link.new_tab {
        write!(
            out,
            r#"<a href="{href}" target="_blank" rel="noopener noreferrer" class="{class}">"#
        )
        .unwrap();
    } else {
        write!(out, r#"<a href="{href}" target="_self" class="{class}">"#).unwrap();
    }
    out.push_str(&escape_html(&link.label));

    let icon = if link.new_tab {
        Some(Icon::External)
    } else if style.chevron {
        Some(Icon::ChevronRight)
    } else {
        None
    };
    if let Some(icon) = icon {
        icons::write_icon(out, icon, style.icon_class);
    }
    out.push_str("</a>");
}
