//! Formatting attributes: text format flags and block alignment.

use bitflags::bitflags;
use serde_json::Value;

bitflags! {
    /// Inline formatting flags of a text node.
    ///
    /// Flags are independent and composable. Bits outside the known set are
    /// retained when parsing but have no effect on rendering.
    ///
    /// # Example
    ///
    /// ```
    /// use quill_lexical::TextFormat;
    ///
    /// let format = TextFormat::from_bits_retain(3);
    /// assert_eq!(format, TextFormat::BOLD | TextFormat::ITALIC);
    /// ```
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TextFormat: u32 {
        const BOLD = 1;
        const ITALIC = 1 << 1;
        const STRIKETHROUGH = 1 << 2;
        const UNDERLINE = 1 << 3;
        const CODE = 1 << 4;
        const SUBSCRIPT = 1 << 5;
        const SUPERSCRIPT = 1 << 6;
    }
}

impl TextFormat {
    /// Wrapping order used by the renderer. Each applied tag encloses the
    /// result of the previous ones, so later entries end up outermost.
    pub const WRAP_ORDER: [(Self, &'static str); 7] = [
        (Self::BOLD, "strong"),
        (Self::ITALIC, "em"),
        (Self::STRIKETHROUGH, "s"),
        (Self::UNDERLINE, "u"),
        (Self::CODE, "code"),
        (Self::SUBSCRIPT, "sub"),
        (Self::SUPERSCRIPT, "sup"),
    ];

    /// Read a format value from JSON. Anything but a non-negative integer is
    /// treated as "no formatting".
    pub(crate) fn from_value(value: Option<&Value>) -> Self {
        value
            .and_then(Value::as_u64)
            .and_then(|bits| u32::try_from(bits).ok())
            .map(Self::from_bits_retain)
            .unwrap_or_default()
    }
}

/// Horizontal alignment of a block element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Parse an alignment keyword (`left`, `center`, `right`, `justify`).
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            "justify" => Some(Self::Justify),
            _ => None,
        }
    }

    /// CSS utility class emitted for this alignment.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Left => "text-left",
            Self::Center => "text-center",
            Self::Right => "text-right",
            Self::Justify => "text-justify",
        }
    }
}

/// The `format` attribute of an element node.
///
/// The editor emits either an alignment keyword or a numeric bitmask
/// depending on the node kind, so both encodings are kept as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementFormat {
    /// A recognized alignment keyword.
    Keyword(Alignment),
    /// A numeric bitmask: `1` center, `2` right, `4` justify.
    Bits(u32),
    /// A string that is not a known keyword (including `""`).
    Other(String),
}

impl ElementFormat {
    pub(crate) fn from_value(value: Option<&Value>) -> Option<Self> {
        match value? {
            Value::String(s) => Some(
                Alignment::from_keyword(s).map_or_else(|| Self::Other(s.clone()), Self::Keyword),
            ),
            Value::Number(n) => n
                .as_u64()
                .and_then(|bits| u32::try_from(bits).ok())
                .map(Self::Bits),
            _ => None,
        }
    }

    /// Resolve the alignment this format encodes, if any.
    ///
    /// For bitmasks the first matching bit wins, checked in the order
    /// center, right, justify.
    #[must_use]
    pub fn alignment(&self) -> Option<Alignment> {
        match self {
            Self::Keyword(alignment) => Some(*alignment),
            Self::Bits(bits) => {
                if bits & 1 != 0 {
                    Some(Alignment::Center)
                } else if bits & 2 != 0 {
                    Some(Alignment::Right)
                } else if bits & 4 != 0 {
                    Some(Alignment::Justify)
                } else {
                    None
                }
            }
            Self::Other(_) => None,
        }
    }
}
