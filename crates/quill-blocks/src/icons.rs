//! Inline SVG icons shared by block views.

use std::fmt::Write;

pub(crate) const EXTERNAL_PATH: &str = "M10 6H6a2 2 0 00-2 2v10a2 2 0 002 2h10a2 2 0 002-2v-4M14 4h6m0 0v6m0-6L10 14";
const CHEVRON_RIGHT_PATH: &str = "M9 5l7 7-7 7";
const ARROW_DOWN_PATH: &str = "M19 14l-7 7m0 0l-7-7m7 7V3";
const CALENDAR_PATH: &str = "M8 7V3m8 4V3m-9 8h10M5 21h14a2 2 0 002-2V7a2 2 0 00-2-2H5a2 2 0 00-2 2v12a2 2 0 002 2z";
const EMPTY_PATH: &str = "M9 12h6m-6-4h6m2 5.291A7.962 7.962 0 0112 15c-2.34 0-4.291-1.007-5.691-2.618m15.691 2.618A7.962 7.962 0 0012 15c2.34 0 4.291-1.007 5.691-2.618M6.5 9a.5.5 0 11-1 0 .5.5 0 011 0zm3 0a.5.5 0 11-1 0 .5.5 0 011 0zm3 0a.5.5 0 11-1 0 .5.5 0 011 0zm3 0a.5.5 0 11-1 0 .5.5 0 011 0z";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Icon {
    External,
    ChevronRight,
    ArrowDown,
    Calendar,
    Empty,
}

impl Icon {
    fn path(self) -> &'static str {
        match self {
            Self::External => EXTERNAL_PATH,
            Self::ChevronRight => CHEVRON_RIGHT_PATH,
            Self::ArrowDown => ARROW_DOWN_PATH,
            Self::Calendar => CALENDAR_PATH,
            Self::Empty => EMPTY_PATH,
        }
    }
}

/// Write a stroked 24x24 icon. `class` must already be safe for an attribute.
pub(crate) fn write_icon(out: &mut String, icon: Icon, class: &str) {
    write!(
        out,
        r#"<svg class="{class}" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="{}"/></svg>"#,
        icon.path()
    )
    .unwrap();
}
