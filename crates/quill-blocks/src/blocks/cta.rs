use super::{BlockView, RenderContext, write_rich_text};
use crate::link::{LinkStyle, write_link};
use crate::model::{Appearance, CtaBlock};

const OPEN: &str = concat!(
    r#"<section class="py-16 md:py-24 bg-gradient-to-br from-primary to-secondary relative overflow-hidden">"#,
    r#"<div class="absolute inset-0 opacity-10"><svg class="absolute inset-0 h-full w-full" xmlns="http://www.w3.org/2000/svg">"#,
    r#"<defs><pattern id="cta-pattern" x="0" y="0" width="40" height="40" patternUnits="userSpaceOnUse"><circle cx="20" cy="20" r="2" fill="currentColor"/></pattern></defs>"#,
    r#"<rect width="100%" height="100%" fill="url(#cta-pattern)"/></svg></div>"#,
    r#"<div class="container-custom relative z-10"><div class="max-w-4xl mx-auto text-center">"#,
);

const DECORATIONS: &str = concat!(
    r#"<div class="absolute top-0 left-0 w-64 h-64 bg-white/5 rounded-full -translate-x-32 -translate-y-32"></div>"#,
    r#"<div class="absolute bottom-0 right-0 w-96 h-96 bg-white/5 rounded-full translate-x-48 translate-y-48"></div>"#,
    r#"<div class="absolute top-1/4 left-1/4 w-3 h-3 bg-white/20 rounded-full animate-pulse"></div>"#,
    r#"<div class="absolute top-1/3 right-1/3 w-2 h-2 bg-white/30 rounded-full animate-pulse" style="animation-delay: 0.5s;"></div>"#,
    r#"<div class="absolute bottom-1/4 left-1/3 w-4 h-4 bg-white/15 rounded-full animate-pulse" style="animation-delay: 1s;"></div>"#,
);

const PROSE: &str = "prose prose-lg prose-white max-w-none [&>h1]:text-white [&>h2]:text-white [&>h3]:text-white [&>h4]:text-white [&>h5]:text-white [&>h6]:text-white [&>p]:text-white/90 [&>p]:text-xl";

const LINK_BASE: &str = "inline-flex items-center px-8 py-4 text-lg font-semibold rounded-lg transition-all duration-200 focus:outline-none focus:ring-2 focus:ring-offset-2 transform hover:scale-105 shadow-lg hover:shadow-xl";

fn link_class(appearance: Appearance) -> String {
    let variant = match appearance {
        Appearance::Secondary => {
            "bg-secondary text-white hover:bg-secondary/90 focus:ring-secondary shadow-secondary/25"
        }
        Appearance::Outline => {
            "border-2 border-white text-white hover:bg-white hover:text-primary focus:ring-white bg-white/10 backdrop-blur-sm"
        }
        Appearance::Primary => "bg-white text-primary hover:bg-gray-50 focus:ring-white shadow-white/25",
    };
    format!("{LINK_BASE} {variant}")
}

impl BlockView for CtaBlock {
    fn render_into(&self, ctx: &RenderContext<'_>, out: &mut String) {
        out.push_str(OPEN);
        if let Some(rich_text) = &self.rich_text {
            write_rich_text(out, PROSE, rich_text);
        }
        if !self.links.is_empty() {
            out.push_str(r#"<div class="flex flex-col sm:flex-row gap-4 justify-center mt-10">"#);
            for item in &self.links {
                let class = link_class(item.link.appearance);
                let style = LinkStyle {
                    class: &class,
                    icon_class: "ml-2 -mr-1 h-5 w-5",
                    chevron: true,
                };
                write_link(out, &item.link, &ctx.options.links, &style);
            }
            out.push_str("</div>");
        }
        out.push_str("</div></div>");
        out.push_str(DECORATIONS);
        out.push_str("</section>");
    }
}
