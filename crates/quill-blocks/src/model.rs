//! CMS payload model.
//!
//! Mirrors the JSON returned by the CMS REST API for pages and posts. Field
//! names follow the API's camelCase; relations may arrive as ids or as
//! populated documents depending on request depth.

use quill_lexical::Document;
use serde::Deserialize;

use crate::de;

/// An uploaded image or video.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Media {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub alt: Option<String>,
    pub url: Option<String>,
    pub filename: Option<String>,
    pub mime_type: Option<String>,
    pub filesize: Option<u64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Focal point as a fraction of the width.
    pub focal_x: Option<f64>,
    /// Focal point as a fraction of the height.
    pub focal_y: Option<f64>,
    #[serde(deserialize_with = "de::lenient")]
    pub sizes: Option<MediaSizes>,
}

/// Resized variants generated by the CMS.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaSizes {
    #[serde(deserialize_with = "de::lenient")]
    pub thumbnail: Option<MediaSize>,
    #[serde(deserialize_with = "de::lenient")]
    pub card: Option<MediaSize>,
    #[serde(deserialize_with = "de::lenient")]
    pub feature: Option<MediaSize>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaSize {
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Media {
    /// Whether the upload is a video.
    pub fn is_video(&self) -> bool {
        self.mime_type
            .as_deref()
            .is_some_and(|mime| mime.starts_with("video/"))
    }

    /// Original upload URL, or `""`.
    pub fn original_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }

    /// URL for large renditions: the `feature` size when generated.
    pub fn feature_url(&self) -> &str {
        self.size_url(|sizes| sizes.feature.as_ref())
            .unwrap_or_else(|| self.original_url())
    }

    /// URL for card thumbnails: the `card` size when generated.
    pub fn card_url(&self) -> &str {
        self.size_url(|sizes| sizes.card.as_ref())
            .unwrap_or_else(|| self.original_url())
    }

    /// Still frame for videos, taken from the `card` size.
    pub fn poster_url(&self) -> Option<&str> {
        self.size_url(|sizes| sizes.card.as_ref())
    }

    /// Alt text, or `fallback` when none was entered.
    pub fn alt_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.alt
            .as_deref()
            .filter(|alt| !alt.is_empty())
            .unwrap_or(fallback)
    }

    /// CSS `object-position` value centering the focal point.
    ///
    /// ```
    /// use quill_blocks::Media;
    ///
    /// let media = Media { focal_x: Some(0.5), focal_y: Some(0.25), ..Media::default() };
    /// assert_eq!(media.object_position(), "50% 25%");
    /// assert_eq!(Media::default().object_position(), "center center");
    /// ```
    pub fn object_position(&self) -> String {
        match (self.focal_x, self.focal_y) {
            (Some(x), Some(y)) => format!("{}% {}%", x * 100.0, y * 100.0),
            _ => "center center".to_owned(),
        }
    }

    fn size_url(&self, pick: impl Fn(&MediaSizes) -> Option<&MediaSize>) -> Option<&str> {
        self.sizes
            .as_ref()
            .and_then(pick)
            .and_then(|size| size.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Category {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<String>,
}

/// A category relation: a populated document or a bare id.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Doc(Category),
    Id(#[serde(deserialize_with = "de::id")] String),
}

impl CategoryRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Doc(category) => &category.id,
            Self::Id(id) => id,
        }
    }

    /// Display title, known only for populated categories.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Doc(category) => category.title.as_deref(),
            Self::Id(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// SEO metadata attached to pages and posts.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Seo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    #[serde(deserialize_with = "de::lenient")]
    pub image: Option<Media>,
    #[serde(deserialize_with = "de::or_default")]
    pub no_index: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Points at a page or post by relation.
    Reference,
    /// Free-form URL.
    Custom,
}

/// Button style for block links.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Primary,
    Secondary,
    Outline,
}

/// The target of a reference link.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Reference {
    /// Collection slug, e.g. `posts` or `pages`.
    pub relation_to: String,
    #[serde(deserialize_with = "de::lenient")]
    pub value: Option<ReferenceValue>,
}

/// A referenced document, populated or not.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReferenceValue {
    Doc(ReferencedDoc),
    Id(#[serde(deserialize_with = "de::id")] String),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReferencedDoc {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub slug: Option<String>,
    pub title: Option<String>,
}

impl ReferenceValue {
    /// Slug of a populated document, when it has a non-empty one.
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Doc(doc) => doc.slug.as_deref().filter(|slug| !slug.is_empty()),
            Self::Id(_) => None,
        }
    }
}

/// A link field as edited in the CMS.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkField {
    #[serde(rename = "type", deserialize_with = "de::lenient")]
    pub link_type: Option<LinkType>,
    #[serde(deserialize_with = "de::lenient")]
    pub reference: Option<Reference>,
    pub url: Option<String>,
    #[serde(deserialize_with = "de::or_default")]
    pub label: String,
    /// Unknown appearances fall back to primary.
    #[serde(deserialize_with = "de::or_default")]
    pub appearance: Appearance,
    #[serde(deserialize_with = "de::or_default")]
    pub new_tab: bool,
}

/// One entry of a block's link list.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinkItem {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub link: LinkField,
}

/// Hero variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroType {
    #[default]
    #[serde(rename = "default")]
    Standard,
    Minimal,
    Fullscreen,
}

/// Hero: rich text over an optional background image with action links.
///
/// Used both as a layout block and as the top-level hero of pages and posts.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroBlock {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "de::or_default")]
    pub hero_type: HeroType,
    pub rich_text: Option<Document>,
    #[serde(deserialize_with = "de::lenient")]
    pub media: Option<Media>,
    #[serde(deserialize_with = "de::items")]
    pub links: Vec<LinkItem>,
}

/// Column width inside a content block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnSize {
    OneThird,
    Half,
    TwoThirds,
    #[default]
    Full,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Column {
    #[serde(deserialize_with = "de::or_default")]
    pub size: ColumnSize,
    pub rich_text: Option<Document>,
    #[serde(deserialize_with = "de::or_default")]
    pub enable_link: bool,
    #[serde(deserialize_with = "de::lenient")]
    pub link: Option<LinkField>,
}

/// Content: rich-text columns on a responsive grid.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContentBlock {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    /// `None` when the block has no column list at all.
    #[serde(deserialize_with = "de::optional_items")]
    pub columns: Option<Vec<Column>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaPosition {
    #[default]
    #[serde(rename = "default")]
    Standard,
    Fullscreen,
}

/// Media: a single image or video with an optional caption.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaBlock {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(deserialize_with = "de::or_default")]
    pub position: MediaPosition,
    #[serde(deserialize_with = "de::lenient")]
    pub media: Option<Media>,
    pub caption: Option<Document>,
}

/// Call to action: rich text and buttons on a gradient banner.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaBlock {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub rich_text: Option<Document>,
    #[serde(deserialize_with = "de::items")]
    pub links: Vec<LinkItem>,
}

/// How an archive block picks its posts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopulateBy {
    #[default]
    Collection,
    Selection,
}

/// Archive: a grid of post cards.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArchiveBlock {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub relation_to: Option<String>,
    #[serde(deserialize_with = "de::or_default")]
    pub populate_by: PopulateBy,
    #[serde(deserialize_with = "de::lenient")]
    pub limit: Option<u32>,
    #[serde(deserialize_with = "de::items")]
    pub categories: Vec<CategoryRef>,
    #[serde(deserialize_with = "de::optional_items")]
    pub selected_docs: Option<Vec<Post>>,
    #[serde(deserialize_with = "de::optional_items")]
    pub populated_docs: Option<Vec<Post>>,
    #[serde(deserialize_with = "de::lenient")]
    pub populated_docs_total: Option<u64>,
}

/// A layout block, discriminated by `blockType`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "blockType", rename_all = "camelCase")]
pub enum LayoutBlock {
    Hero(HeroBlock),
    Content(ContentBlock),
    MediaBlock(MediaBlock),
    Cta(CtaBlock),
    Archive(ArchiveBlock),
    /// Any block type this crate does not render.
    #[serde(other)]
    Unknown,
}

impl LayoutBlock {
    /// The `blockType` discriminator, `None` for unknown blocks.
    pub fn block_type(&self) -> Option<&'static str> {
        match self {
            Self::Hero(_) => Some("hero"),
            Self::Content(_) => Some("content"),
            Self::MediaBlock(_) => Some("mediaBlock"),
            Self::Cta(_) => Some("cta"),
            Self::Archive(_) => Some("archive"),
            Self::Unknown => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Page {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(deserialize_with = "de::or_default")]
    pub title: String,
    pub slug: Option<String>,
    #[serde(deserialize_with = "de::lenient")]
    pub hero: Option<HeroBlock>,
    #[serde(deserialize_with = "de::items")]
    pub layout: Vec<LayoutBlock>,
    #[serde(deserialize_with = "de::lenient")]
    pub meta: Option<Seo>,
    pub published_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Post {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(deserialize_with = "de::or_default")]
    pub title: String,
    pub slug: Option<String>,
    #[serde(deserialize_with = "de::lenient")]
    pub hero: Option<HeroBlock>,
    #[serde(deserialize_with = "de::items")]
    pub layout: Vec<LayoutBlock>,
    #[serde(deserialize_with = "de::lenient")]
    pub meta: Option<Seo>,
    pub published_at: Option<String>,
    #[serde(deserialize_with = "de::items")]
    pub categories: Vec<CategoryRef>,
    #[serde(deserialize_with = "de::items")]
    pub populated_authors: Vec<User>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_seo_fields() {
        let seo: Seo = serde_json::from_value(json!({
            "title": "Launch",
            "description": "Release notes",
            "keywords": "release, notes",
            "image": 7,
            "noIndex": true
        }))
        .unwrap();
        assert_eq!(seo.keywords.as_deref(), Some("release, notes"));
        assert!(seo.no_index);
        assert!(seo.image.is_none());

        let seo: Seo = serde_json::from_value(json!({"noIndex": null})).unwrap();
        assert!(!seo.no_index);
        assert!(seo.keywords.is_none());
    }

    #[test]
    fn test_block_discriminator() {
        let blocks: Vec<LayoutBlock> = serde_json::from_value(json!([
            {"blockType": "hero", "type": "minimal"},
            {"blockType": "mediaBlock", "position": "fullscreen"},
            {"blockType": "formBlock", "form": 1}
        ]))
        .unwrap();

        assert!(matches!(&blocks[0], LayoutBlock::Hero(h) if h.hero_type == HeroType::Minimal));
        assert!(
            matches!(&blocks[1], LayoutBlock::MediaBlock(m) if m.position == MediaPosition::Fullscreen)
        );
        assert_eq!(blocks[2], LayoutBlock::Unknown);
        assert_eq!(blocks[2].block_type(), None);
        assert_eq!(blocks[1].block_type(), Some("mediaBlock"));
    }

    #[test]
    fn test_unknown_select_values_fall_back() {
        let hero: HeroBlock = serde_json::from_value(json!({
            "type": "lowImpact",
            "links": [{"link": {"type": "custom", "url": "/a", "appearance": "default", "newTab": null}}]
        }))
        .unwrap();
        assert_eq!(hero.hero_type, HeroType::Standard);
        assert_eq!(hero.links[0].link.appearance, Appearance::Primary);
        assert!(!hero.links[0].link.new_tab);
    }

    #[test]
    fn test_relations_as_ids_or_documents() {
        let post: Post = serde_json::from_value(json!({
            "id": 7,
            "title": "T",
            "categories": [3, {"id": "c1", "title": "News"}],
            "hero": {"media": "media-id-only"}
        }))
        .unwrap();
        assert_eq!(post.id, "7");
        assert_eq!(post.categories[0].id(), "3");
        assert_eq!(post.categories[0].title(), None);
        assert_eq!(post.categories[1].title(), Some("News"));
        assert_eq!(post.hero.unwrap().media, None);
    }

    #[test]
    fn test_reference_slug() {
        let link: LinkField = serde_json::from_value(json!({
            "type": "reference",
            "reference": {"relationTo": "posts", "value": {"id": 1, "slug": "hello"}}
        }))
        .unwrap();
        let reference = link.reference.unwrap();
        assert_eq!(reference.relation_to, "posts");
        assert_eq!(reference.value.unwrap().slug(), Some("hello"));

        let unpopulated = ReferenceValue::Id("abc".to_owned());
        assert_eq!(unpopulated.slug(), None);
    }

    #[test]
    fn test_media_urls() {
        let media: Media = serde_json::from_value(json!({
            "url": "/media/a.jpg",
            "mimeType": "image/jpeg",
            "sizes": {"card": {"url": "/media/a-card.jpg"}, "feature": {"url": null}}
        }))
        .unwrap();
        assert!(!media.is_video());
        assert_eq!(media.card_url(), "/media/a-card.jpg");
        assert_eq!(media.feature_url(), "/media/a.jpg");
        assert_eq!(media.poster_url(), Some("/media/a-card.jpg"));
        assert_eq!(media.alt_or("Media"), "Media");
    }

    #[test]
    fn test_rich_text_is_a_document() {
        let cta: CtaBlock = serde_json::from_value(json!({
            "richText": {"root": {"children": [{"type": "paragraph", "children": []}]}}
        }))
        .unwrap();
        assert_eq!(cta.rich_text.unwrap().children().len(), 1);
    }
}
