//! Trusted HTML output.

use std::fmt;

use serde::{Serialize, Serializer};

/// HTML markup produced by the renderer.
///
/// Every interpolated value in a `SafeHtml` has been escaped by this crate,
/// so it can be injected into a DOM subtree as-is. Other crates receive values
/// from [`render`](crate::render) or assemble them with
/// [`SafeHtml::from_escaped`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SafeHtml(String);

impl SafeHtml {
    /// Wrap markup whose every interpolated value was passed through
    /// [`escape_html`](crate::escape_html) or came from another `SafeHtml`.
    #[must_use]
    pub fn from_escaped(html: String) -> Self {
        Self(html)
    }

    /// Empty markup.
    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for SafeHtml {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
