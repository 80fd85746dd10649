use std::fmt::Write;

use super::{BlockView, RenderContext, open_div, write_rich_text};
use crate::link::{LinkStyle, write_link};
use crate::model::{ColumnSize, ContentBlock};

const COLUMN_LINK: LinkStyle<'static> = LinkStyle {
    class: "inline-flex items-center px-6 py-3 text-base font-medium text-white bg-primary rounded-lg hover:bg-primary/90 transition-colors focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-primary",
    icon_class: "ml-2 -mr-1 h-4 w-4",
    chevron: true,
};

fn grid_class(columns: usize) -> &'static str {
    match columns {
        1 => "max-w-4xl mx-auto",
        2 => "grid grid-cols-1 lg:grid-cols-2 gap-12 lg:gap-16",
        3 => "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-8 lg:gap-12",
        _ => "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6 lg:gap-8",
    }
}

impl ColumnSize {
    /// Grid span; a lone column takes the whole container.
    fn span_class(self, columns: usize) -> &'static str {
        if columns <= 1 {
            return "";
        }
        match self {
            Self::OneThird => "lg:col-span-1",
            Self::Half | Self::TwoThirds => "lg:col-span-2",
            Self::Full => "lg:col-span-full",
        }
    }
}

impl BlockView for ContentBlock {
    fn render_into(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let Some(columns) = &self.columns else {
            return;
        };

        write!(
            out,
            r#"<section class="py-16 md:py-24"><div class="container-custom"><div class="{}">"#,
            grid_class(columns.len())
        )
        .unwrap();

        for column in columns {
            open_div(out, column.size.span_class(columns.len()));
            if let Some(rich_text) = &column.rich_text {
                write_rich_text(
                    out,
                    "prose prose-lg prose-gray dark:prose-invert max-w-none",
                    rich_text,
                );
            }
            if column.enable_link
                && let Some(link) = &column.link
            {
                out.push_str(r#"<div class="mt-8">"#);
                write_link(out, link, &ctx.options.links, &COLUMN_LINK);
                out.push_str("</div>");
            }
            out.push_str("</div>");
        }

        out.push_str("</div></div></section>");
    }
}
