//! Layout rendering: dispatches each block to its view.

use quill_lexical::{CARD_EXCERPT_WORDS, SafeHtml};

use crate::blocks::{BlockView, RenderContext};
use crate::link::LinkConfig;
use crate::model::{HeroBlock, LayoutBlock, Page, Post};
use crate::source::PostSource;

/// Rendering settings shared by all blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutOptions {
    pub links: LinkConfig,
    /// Word budget for post card excerpts.
    pub card_excerpt_words: usize,
    /// Archive page size when the block sets none.
    pub archive_limit: u32,
    /// Sort expression for archive queries.
    pub archive_sort: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            links: LinkConfig::default(),
            card_excerpt_words: CARD_EXCERPT_WORDS,
            archive_limit: 6,
            archive_sort: "-publishedAt".to_owned(),
        }
    }
}

/// Renders page layouts to HTML.
///
/// Blocks render in order, each to exactly one section. Blocks of unknown
/// type produce no output.
///
/// # Example
///
/// ```
/// use quill_blocks::{LayoutBlock, LayoutRenderer};
///
/// let blocks: Vec<LayoutBlock> = serde_json::from_str(r#"[
///     {"blockType": "content", "columns": [{"richText": {"root": {"children": [
///         {"type": "paragraph", "children": [{"type": "text", "text": "Hi"}]}
///     ]}}}]},
///     {"blockType": "newsletterSignup"}
/// ]"#).unwrap();
///
/// let html = LayoutRenderer::new().render(&blocks);
/// assert!(html.as_str().contains("<p>Hi</p>"));
/// ```
#[derive(Default)]
pub struct LayoutRenderer {
    options: LayoutOptions,
    source: Option<Box<dyn PostSource>>,
}

impl LayoutRenderer {
    /// Create a renderer with default options and no post source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Run archive queries through `source`.
    #[must_use]
    pub fn with_post_source<S: PostSource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Render blocks in order. An empty list renders to nothing.
    pub fn render(&self, blocks: &[LayoutBlock]) -> SafeHtml {
        let mut out = String::new();
        self.render_blocks(blocks, &mut out);
        SafeHtml::from_escaped(out)
    }

    /// Render a page: its hero, then its layout.
    pub fn render_page(&self, page: &Page) -> SafeHtml {
        self.render_with_hero(page.hero.as_ref(), &page.layout)
    }

    /// Render a post: its hero, then its layout.
    pub fn render_post(&self, post: &Post) -> SafeHtml {
        self.render_with_hero(post.hero.as_ref(), &post.layout)
    }

    fn render_with_hero(&self, hero: Option<&HeroBlock>, blocks: &[LayoutBlock]) -> SafeHtml {
        let mut out = String::new();
        if let Some(hero) = hero {
            hero.render_into(&self.context(), &mut out);
        }
        self.render_blocks(blocks, &mut out);
        SafeHtml::from_escaped(out)
    }

    fn render_blocks(&self, blocks: &[LayoutBlock], out: &mut String) {
        let ctx = self.context();
        for block in blocks {
            match block {
                LayoutBlock::Hero(hero) => hero.render_into(&ctx, out),
                LayoutBlock::Content(content) => content.render_into(&ctx, out),
                LayoutBlock::MediaBlock(media) => media.render_into(&ctx, out),
                LayoutBlock::Cta(cta) => cta.render_into(&ctx, out),
                LayoutBlock::Archive(archive) => archive.render_into(&ctx, out),
                LayoutBlock::Unknown => tracing::debug!("Skipping block of unknown type"),
            }
        }
    }

    fn context(&self) -> RenderContext<'_> {
        RenderContext {
            options: &self.options,
            source: self.source.as_deref(),
        }
    }
}
