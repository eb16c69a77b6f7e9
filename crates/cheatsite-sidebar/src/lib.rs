//! Sidebar trees for cheatsite.
//!
//! A sidebar file declares one or more named sidebars. Each entry is a bare
//! document id, or a table tagged with `type`:
//!
//! ```toml
//! [[docs]]
//! type = "doc"
//! id = "index"
//!
//! [[docs]]
//! type = "category"
//! label = "Tools"
//!
//! [[docs.items]]
//! type = "category"
//! label = "Cloud"
//! items = ["tools/cloud/prowler", "tools/cloud/scout-suite"]
//! ```
//!
//! Composition rejects empty labels, empty categories, repeated document ids
//! (across every sidebar in the file) and nesting deeper than [`MAX_DEPTH`].
//! YAML and JSON files with the same shape are accepted by extension.

mod compose;
mod item;
mod raw;

use std::path::{Path, PathBuf};

use serde::Serialize;

use compose::Composer;
pub use compose::MAX_DEPTH;
pub use item::NavItem;
use raw::RawSidebars;

/// Sidebar loading or composition error.
///
/// `location` fields read like `docs > Tools > Cloud`.
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    #[error("Failed to read sidebar file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported sidebar file format: {} (expected .toml, .yaml, .yml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Sidebar parse error: {0}")]
    Parse(String),

    #[error("Sidebar file declares no sidebars")]
    NoSidebars,

    #[error("Empty label in {location}")]
    EmptyLabel { location: String },

    #[error("Category {location} has no items")]
    EmptyCategory { location: String },

    #[error("Empty document id in {location}")]
    EmptyDocId { location: String },

    #[error("Document `{id}` is referenced twice: in {first} and in {second}")]
    DuplicateDoc {
        id: String,
        first: String,
        second: String,
    },

    #[error("Category {location} is nested deeper than {max} levels")]
    TooDeep { location: String, max: usize },

    #[error("Link in {location} must use http:// or https://, got `{href}`")]
    InvalidHref { location: String, href: String },
}

/// A single named sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarTree {
    name: String,
    items: Vec<NavItem>,
}

impl SidebarTree {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root-level items in declared order.
    #[must_use]
    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// Every referenced document id in pre-order, category links included.
    #[must_use]
    pub fn doc_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.walk(|item, _| match item {
            NavItem::Doc { id, .. } => ids.push(id.as_str()),
            NavItem::Category {
                link: Some(link), ..
            } => ids.push(link.as_str()),
            NavItem::Category { .. } | NavItem::Link { .. } => {}
        });
        ids
    }

    /// Number of document leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.walk(|item, _| {
            if matches!(item, NavItem::Doc { .. }) {
                count += 1;
            }
        });
        count
    }

    /// Number of categories at any depth.
    #[must_use]
    pub fn category_count(&self) -> usize {
        let mut count = 0;
        self.walk(|item, _| {
            if item.is_category() {
                count += 1;
            }
        });
        count
    }

    /// First category with the given label, searched in pre-order.
    #[must_use]
    pub fn category(&self, label: &str) -> Option<&NavItem> {
        let mut found = None;
        self.walk(|item, _| {
            if found.is_none() && item.is_category() && item.label() == Some(label) {
                found = Some(item);
            }
        });
        found
    }

    /// Deepest level reached by any item (root items are at depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut max = 0;
        self.walk(|_, depth| max = max.max(depth));
        max
    }

    /// Visit every item in pre-order with its depth.
    pub fn walk<'a>(&'a self, mut f: impl FnMut(&'a NavItem, usize)) {
        for item in &self.items {
            item.walk(1, &mut f);
        }
    }
}

/// All sidebars declared in one file, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Sidebars {
    trees: Vec<SidebarTree>,
}

impl Sidebars {
    /// Load and compose a sidebar file, choosing the parser by extension.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, unknown extensions, parse errors, or any
    /// structural problem found during composition.
    pub fn load(path: &Path) -> Result<Self, SidebarError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, SidebarError> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("yaml" | "yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(SidebarError::UnsupportedFormat(path.to_path_buf())),
        };

        let content = std::fs::read_to_string(path).map_err(|source| SidebarError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let sidebars = parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            sidebars = sidebars.trees.len(),
            "Loaded sidebars"
        );
        Ok(sidebars)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SidebarError> {
        let raw: RawSidebars =
            toml::from_str(content).map_err(|e| SidebarError::Parse(e.to_string()))?;
        Self::compose(raw)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, SidebarError> {
        let raw: RawSidebars =
            serde_yaml::from_str(content).map_err(|e| SidebarError::Parse(e.to_string()))?;
        Self::compose(raw)
    }

    pub fn from_json_str(content: &str) -> Result<Self, SidebarError> {
        let raw: RawSidebars =
            serde_json::from_str(content).map_err(|e| SidebarError::Parse(e.to_string()))?;
        Self::compose(raw)
    }

    fn compose(raw: RawSidebars) -> Result<Self, SidebarError> {
        if raw.0.is_empty() {
            return Err(SidebarError::NoSidebars);
        }
        let mut composer = Composer::default();
        let trees = raw
            .0
            .into_iter()
            .map(|(name, items)| composer.compose(&name, items))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { trees })
    }

    /// Get a sidebar by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SidebarTree> {
        self.trees.iter().find(|t| t.name == name)
    }

    /// The first declared sidebar.
    #[must_use]
    pub fn primary(&self) -> Option<&SidebarTree> {
        self.trees.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SidebarTree> {
        self.trees.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trees.iter().map(SidebarTree::name)
    }

    /// Every referenced document id across all sidebars.
    #[must_use]
    pub fn doc_ids(&self) -> Vec<&str> {
        self.trees.iter().flat_map(SidebarTree::doc_ids).collect()
    }
}
