//! Validated sidebar items.

use serde::Serialize;

/// A sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavItem {
    /// Link to a document.
    Doc {
        id: String,
        /// Label override. Falls back to the document's sidebar label or title.
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Group of nested items.
    Category {
        label: String,
        items: Vec<NavItem>,
        collapsed: bool,
        /// Document opened by the category header.
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    /// External link.
    Link { label: String, href: String },
}

impl NavItem {
    /// Shorthand for a document entry without a label override.
    pub fn doc(id: impl Into<String>) -> Self {
        Self::Doc {
            id: id.into(),
            label: None,
        }
    }

    /// Explicit label, if the item carries one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Doc { label, .. } => label.as_deref(),
            Self::Category { label, .. } | Self::Link { label, .. } => Some(label),
        }
    }

    /// Nested items; empty for anything but categories.
    pub fn children(&self) -> &[NavItem] {
        match self {
            Self::Category { items, .. } => items,
            Self::Doc { .. } | Self::Link { .. } => &[],
        }
    }

    pub fn is_category(&self) -> bool {
        matches!(self, Self::Category { .. })
    }

    /// Visit this item and its descendants in pre-order with their depth.
    pub(crate) fn walk<'a>(&'a self, depth: usize, f: &mut impl FnMut(&'a NavItem, usize)) {
        f(self, depth);
        for child in self.children() {
            child.walk(depth + 1, f);
        }
    }
}
