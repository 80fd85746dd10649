use std::borrow::Cow;
use std::fmt::Write;

use quill_lexical::escape_html;

use super::{BlockView, RenderContext};
use crate::icons::{self, Icon};
use crate::layout::LayoutOptions;
use crate::model::{ArchiveBlock, Post};
use crate::post::{author_initials, format_date, post_excerpt};
use crate::source::ArchivePosts;

const EMPTY_STATE_TITLE: &str = "No posts found";
const EMPTY_STATE_TEXT: &str = "There are no published posts to display at the moment.";

impl ArchiveBlock {
    /// Posts to show and whether more exist beyond them.
    fn posts<'a>(&'a self, ctx: &RenderContext<'_>) -> (Cow<'a, [Post]>, bool) {
        let options = ctx.options;
        match ArchivePosts::resolve(self, options.archive_limit, &options.archive_sort) {
            ArchivePosts::Listed { posts, has_more } => (Cow::Borrowed(posts), has_more),
            ArchivePosts::Query(query) => {
                let Some(source) = ctx.source else {
                    tracing::debug!(block_id = %self.id, "No post source for archive query");
                    return (Cow::Borrowed(&[]), false);
                };
                match source.fetch(&query) {
                    Ok(page) => (Cow::Owned(page.docs), page.has_next_page),
                    Err(e) => {
                        tracing::warn!(block_id = %self.id, error = %e, "Failed to fetch archive posts");
                        (Cow::Borrowed(&[]), false)
                    }
                }
            }
        }
    }
}

fn post_url(post: &Post, options: &LayoutOptions) -> String {
    match post.slug.as_deref().filter(|slug| !slug.is_empty()) {
        Some(slug) => format!("{}/{slug}", options.links.posts_prefix),
        None => options.links.fallback.clone(),
    }
}

fn write_card(out: &mut String, post: &Post, options: &LayoutOptions) {
    let url = escape_html(&post_url(post, options));
    let title = escape_html(&post.title);

    out.push_str(r#"<article class="card p-0 overflow-hidden hover:shadow-lg transition-shadow duration-300 group">"#);
    if let Some(media) = post.hero.as_ref().and_then(|hero| hero.media.as_ref()) {
        write!(
            out,
            r#"<div class="aspect-w-16 aspect-h-9 overflow-hidden"><img src="{}" alt="{}" class="w-full h-48 object-cover group-hover:scale-105 transition-transform duration-300" loading="lazy"></div>"#,
            escape_html(media.card_url()),
            escape_html(media.alt_or(&post.title))
        )
        .unwrap();
    }
    out.push_str(r#"<div class="p-6">"#);

    if !post.categories.is_empty() {
        out.push_str(r#"<div class="flex flex-wrap gap-2 mb-3">"#);
        for category in post.categories.iter().take(2) {
            write!(
                out,
                r#"<span class="inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium bg-primary/10 text-primary">{}</span>"#,
                escape_html(category.title().unwrap_or_default())
            )
            .unwrap();
        }
        out.push_str("</div>");
    }

    write!(
        out,
        r#"<h3 class="text-xl font-semibold text-gray-900 dark:text-white mb-3 group-hover:text-primary transition-colors"><a href="{url}" class="block">{title}</a></h3>"#
    )
    .unwrap();

    let excerpt = post_excerpt(post, options.card_excerpt_words);
    if !excerpt.is_empty() {
        write!(
            out,
            r#"<p class="text-gray-600 dark:text-gray-400 mb-4 line-clamp-3">{}</p>"#,
            escape_html(&excerpt)
        )
        .unwrap();
    }

    out.push_str(r#"<div class="flex items-center justify-between text-sm text-gray-500 dark:text-gray-400"><div class="flex items-center space-x-4">"#);
    if let Some(author) = post.populated_authors.first() {
        write!(
            out,
            r#"<div class="flex items-center"><div class="h-6 w-6 rounded-full bg-primary flex items-center justify-center mr-2"><span class="text-white text-xs font-medium">{}</span></div><span>{}</span></div>"#,
            escape_html(&author_initials(author)),
            escape_html(author.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Author"))
        )
        .unwrap();
    }
    if let Some(published_at) = post.published_at.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(r#"<div class="flex items-center">"#);
        icons::write_icon(out, Icon::Calendar, "h-4 w-4 mr-1");
        write!(
            out,
            r#"<time datetime="{}">{}</time></div>"#,
            escape_html(published_at),
            escape_html(&format_date(published_at))
        )
        .unwrap();
    }
    out.push_str("</div>");

    write!(
        out,
        r#"<a href="{url}" class="inline-flex items-center text-primary hover:text-primary/80 transition-colors font-medium">Read more"#
    )
    .unwrap();
    icons::write_icon(out, Icon::ChevronRight, "ml-1 h-4 w-4");
    out.push_str("</a></div></div></article>");
}

fn write_empty_state(out: &mut String) {
    out.push_str(r#"<div class="text-center py-16">"#);
    icons::write_icon(out, Icon::Empty, "mx-auto h-16 w-16 text-gray-400 mb-4");
    write!(
        out,
        r#"<h3 class="text-lg font-medium text-gray-900 dark:text-white mb-2">{EMPTY_STATE_TITLE}</h3><p class="text-gray-600 dark:text-gray-400">{EMPTY_STATE_TEXT}</p></div>"#
    )
    .unwrap();
}

impl BlockView for ArchiveBlock {
    fn render_into(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let (posts, has_more) = self.posts(ctx);

        out.push_str(r#"<section class="py-16 md:py-24 bg-gray-50 dark:bg-gray-900"><div class="container-custom">"#);
        if posts.is_empty() {
            write_empty_state(out);
        } else {
            out.push_str(r#"<div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-8">"#);
            for post in posts.iter() {
                write_card(out, post, ctx.options);
            }
            out.push_str("</div>");

            if has_more {
                out.push_str(r#"<div class="mt-12 text-center"><button type="button" class="btn-primary inline-flex items-center" data-next-page="2">Load More Posts"#);
                icons::write_icon(out, Icon::ArrowDown, "ml-2 -mr-1 h-4 w-4");
                out.push_str("</button></div>");
            }
        }
        out.push_str("</div></section>");
    }
}
