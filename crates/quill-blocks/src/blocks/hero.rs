use std::fmt::Write;

use quill_lexical::escape_html;

use super::{BlockView, RenderContext, write_rich_text};
use crate::icons::{self, Icon};
use crate::link::{LinkStyle, write_link};
use crate::model::{Appearance, HeroBlock, HeroType};

const WHITE_PROSE: &str = "prose-white [&>h1]:text-white [&>h2]:text-white [&>h3]:text-white [&>h4]:text-white [&>h5]:text-white [&>h6]:text-white [&>p]:text-white/90";
const LINK_BASE: &str = "inline-flex items-center px-6 py-3 text-base font-medium rounded-lg transition-all duration-200 focus:outline-none focus:ring-2 focus:ring-offset-2";

impl HeroType {
    fn section_class(self) -> &'static str {
        match self {
            Self::Fullscreen => "flex items-center min-h-screen",
            Self::Minimal => "flex items-center py-16 md:py-24",
            Self::Standard => "flex items-center py-20 md:py-32",
        }
    }

    fn content_class(self) -> &'static str {
        match self {
            Self::Minimal => "flex items-center justify-center text-center py-8",
            Self::Standard | Self::Fullscreen => "flex items-center min-h-[60vh]",
        }
    }

    fn text_class(self) -> &'static str {
        match self {
            Self::Minimal => "max-w-4xl text-center mx-auto",
            Self::Standard | Self::Fullscreen => "max-w-4xl",
        }
    }
}

impl HeroBlock {
    /// Whether text sits on a dark background and needs light colors.
    fn on_dark(&self) -> bool {
        self.media.is_some() || self.hero_type == HeroType::Fullscreen
    }

    fn link_class(&self, appearance: Appearance) -> String {
        let variant = match appearance {
            Appearance::Secondary => "bg-secondary text-white hover:bg-secondary/90 focus:ring-secondary",
            Appearance::Outline if self.media.is_some() => {
                "border-2 border-white text-white hover:bg-white hover:text-gray-900 focus:ring-white"
            }
            Appearance::Outline => {
                "border-2 border-gray-300 text-gray-700 hover:bg-gray-50 focus:ring-gray-500 dark:border-gray-600 dark:text-gray-300 dark:hover:bg-gray-800"
            }
            Appearance::Primary => "bg-primary text-white hover:bg-primary/90 focus:ring-primary",
        };
        format!("{LINK_BASE} {variant}")
    }
}

impl BlockView for HeroBlock {
    fn render_into(&self, ctx: &RenderContext<'_>, out: &mut String) {
        write!(
            out,
            r#"<section class="relative overflow-hidden {}">"#,
            self.hero_type.section_class()
        )
        .unwrap();

        if let Some(media) = &self.media {
            write!(
                out,
                r#"<div class="absolute inset-0 z-0"><img src="{}" alt="{}" class="h-full w-full object-cover" style="object-position: {}"><div class="absolute inset-0 bg-black/40"></div></div>"#,
                escape_html(media.original_url()),
                escape_html(media.alt_or("Hero background")),
                media.object_position()
            )
            .unwrap();
        }

        write!(
            out,
            r#"<div class="relative z-10 container-custom"><div class="{}"><div class="{}">"#,
            self.hero_type.content_class(),
            self.hero_type.text_class()
        )
        .unwrap();

        if let Some(rich_text) = &self.rich_text {
            let prose = if self.on_dark() {
                WHITE_PROSE
            } else {
                "prose-gray dark:prose-invert"
            };
            write_rich_text(out, &format!("prose prose-lg max-w-none {prose}"), rich_text);
        }

        if !self.links.is_empty() {
            out.push_str(r#"<div class="flex flex-wrap gap-4 mt-8">"#);
            for item in &self.links {
                let class = self.link_class(item.link.appearance);
                let style = LinkStyle {
                    class: &class,
                    icon_class: "ml-2 -mr-1 h-4 w-4",
                    chevron: false,
                };
                write_link(out, &item.link, &ctx.options.links, &style);
            }
            out.push_str("</div>");
        }
        out.push_str("</div></div></div>");

        if self.hero_type == HeroType::Fullscreen {
            out.push_str(r#"<div class="absolute bottom-8 left-1/2 transform -translate-x-1/2 z-10"><div class="animate-bounce">"#);
            icons::write_icon(out, Icon::ArrowDown, "h-6 w-6 text-white/80");
            out.push_str("</div></div>");
        }
        out.push_str("</section>");
    }
}
