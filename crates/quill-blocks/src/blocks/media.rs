use std::fmt::Write;

use quill_lexical::escape_html;

use super::{BlockView, RenderContext, write_rich_text};
use crate::model::{Media, MediaBlock, MediaPosition};

const VIDEO_FALLBACK: &str = "Your browser does not support the video tag.";

fn write_video(out: &mut String, media: &Media, class: &str, attrs: &str) {
    write!(out, r#"<video src="{}""#, escape_html(media.original_url())).unwrap();
    if let Some(poster) = media.poster_url() {
        write!(out, r#" poster="{}""#, escape_html(poster)).unwrap();
    }
    write!(out, r#" class="{class}" {attrs}>{VIDEO_FALLBACK}</video>"#).unwrap();
}

fn write_image(out: &mut String, media: &Media, class: &str) {
    write!(
        out,
        r#"<img src="{}" alt="{}" class="{class}" style="object-position: {}" loading="lazy">"#,
        escape_html(media.feature_url()),
        escape_html(media.alt_or("Media")),
        media.object_position()
    )
    .unwrap();
}

impl MediaBlock {
    fn render_fullscreen(&self, media: &Media, out: &mut String) {
        const FILL: &str = "absolute inset-0 h-full w-full object-cover";

        out.push_str(r#"<div class="relative h-screen overflow-hidden">"#);
        if media.is_video() {
            write_video(out, media, FILL, "autoplay muted loop playsinline");
        } else {
            write_image(out, media, FILL);
        }
        if let Some(caption) = &self.caption {
            out.push_str(r#"<div class="absolute bottom-0 left-0 right-0 bg-gradient-to-t from-black/80 to-transparent"><div class="container-custom py-8">"#);
            write_rich_text(
                out,
                "prose prose-lg prose-white max-w-none [&>p]:text-white/90",
                caption,
            );
            out.push_str("</div></div>");
        }
        out.push_str("</div>");
    }

    fn render_framed(&self, media: &Media, out: &mut String) {
        out.push_str(r#"<div class="container-custom py-16 md:py-24"><div class="max-w-4xl mx-auto"><figure class="group">"#);
        out.push_str(r#"<div class="relative overflow-hidden rounded-xl shadow-2xl transition-transform duration-300 group-hover:scale-[1.02]">"#);
        if media.is_video() {
            write_video(out, media, "w-full h-auto", r#"controls preload="metadata""#);
        } else {
            write_image(out, media, "w-full h-auto");
            out.push_str(r#"<div class="absolute inset-0 bg-black/0 group-hover:bg-black/10 transition-colors duration-300"></div>"#);
        }
        out.push_str("</div>");
        if let Some(caption) = &self.caption {
            out.push_str(r#"<figcaption class="mt-6">"#);
            write_rich_text(
                out,
                "prose prose-gray dark:prose-invert max-w-none text-center",
                caption,
            );
            out.push_str("</figcaption>");
        }
        out.push_str("</figure></div></div>");
    }
}

impl BlockView for MediaBlock {
    fn render_into(&self, _ctx: &RenderContext<'_>, out: &mut String) {
        let Some(media) = &self.media else {
            return;
        };

        match self.position {
            MediaPosition::Fullscreen => {
                out.push_str("<section>");
                self.render_fullscreen(media, out);
            }
            MediaPosition::Standard => {
                out.push_str(r#"<section class="bg-white dark:bg-gray-900">"#);
                self.render_framed(media, out);
            }
        }
        out.push_str("</section>");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::layout::LayoutOptions;

    fn render_media(value: serde_json::Value) -> String {
        let block: MediaBlock = serde_json::from_value(value).unwrap();
        let options = LayoutOptions::default();
        let ctx = RenderContext {
            options: &options,
            source: None,
        };
        let mut out = String::new();
        block.render_into(&ctx, &mut out);
        out
    }

    #[test]
    fn test_without_media_renders_nothing() {
        assert_eq!(render_media(json!({"position": "fullscreen"})), "");
        assert_eq!(render_media(json!({"media": 12})), "");
    }

    #[test]
    fn test_framed_image_prefers_feature_size() {
        let html = render_media(json!({"media": {
            "url": "/media/photo.jpg",
            "alt": "Harbor",
            "mimeType": "image/jpeg",
            "sizes": {"feature": {"url": "/media/photo-feature.jpg"}}
        }}));
        assert!(html.starts_with(r#"<section class="bg-white dark:bg-gray-900"><div class="container-custom py-16 md:py-24">"#));
        assert!(html.contains(
            r#"<img src="/media/photo-feature.jpg" alt="Harbor" class="w-full h-auto" style="object-position: center center" loading="lazy">"#
        ));
        assert!(!html.contains("<figcaption"));
    }

    #[test]
    fn test_fullscreen_video_with_poster() {
        let html = render_media(json!({
            "position": "fullscreen",
            "media": {"url": "/media/clip.mp4", "mimeType": "video/mp4", "sizes": {"card": {"url": "/media/clip-card.jpg"}}}
        }));
        assert!(html.starts_with(r#"<section><div class="relative h-screen overflow-hidden">"#));
        assert!(html.contains(
            r#"<video src="/media/clip.mp4" poster="/media/clip-card.jpg" class="absolute inset-0 h-full w-full object-cover" autoplay muted loop playsinline>"#
        ));
    }

    #[test]
    fn test_caption_rendered_from_rich_text() {
        let html = render_media(json!({
            "media": {"url": "/a.png"},
            "caption": {"root": {"children": [{"type": "paragraph", "children": [{"type": "text", "text": "Shot at <dawn>"}]}]}}
        }));
        assert!(html.contains(
            r#"<figcaption class="mt-6"><div class="prose prose-gray dark:prose-invert max-w-none text-center"><p>Shot at &lt;dawn&gt;</p></div></figcaption>"#
        ));
    }
}
