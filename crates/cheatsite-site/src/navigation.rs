//! Sidebar resolution against the document index.

use cheatsite_docs::DocumentIndex;
use cheatsite_sidebar::{NavItem, SidebarTree};
use serde::Serialize;

use crate::check::BrokenReference;

/// A sidebar with every document reference resolved to a route and label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Sidebar name.
    pub sidebar: String,
    pub items: Vec<ResolvedItem>,
}

/// Sidebar item ready for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResolvedItem {
    Doc {
        id: String,
        label: String,
        route: String,
    },
    Category {
        label: String,
        collapsed: bool,
        /// Route of the category's linked document.
        #[serde(skip_serializing_if = "Option::is_none")]
        route: Option<String>,
        items: Vec<ResolvedItem>,
    },
    Link {
        label: String,
        href: String,
    },
}

impl ResolvedItem {
    pub fn label(&self) -> &str {
        match self {
            Self::Doc { label, .. } | Self::Category { label, .. } | Self::Link { label, .. } => {
                label
            }
        }
    }

    /// Nested items; empty for anything but categories.
    pub fn children(&self) -> &[ResolvedItem] {
        match self {
            Self::Category { items, .. } => items,
            Self::Doc { .. } | Self::Link { .. } => &[],
        }
    }
}

/// Resolve a sidebar, collecting every reference that has no document.
///
/// Broken entries are reported, never dropped: the caller gets either the
/// complete navigation or the full list of problems.
pub(crate) fn resolve(
    tree: &SidebarTree,
    documents: &DocumentIndex,
) -> Result<Navigation, Vec<BrokenReference>> {
    let mut broken = Vec::new();
    let items = resolve_items(tree.items(), tree.name(), documents, &mut broken);
    if broken.is_empty() {
        Ok(Navigation {
            sidebar: tree.name().to_owned(),
            items,
        })
    } else {
        Err(broken)
    }
}

fn resolve_items(
    items: &[NavItem],
    location: &str,
    documents: &DocumentIndex,
    broken: &mut Vec<BrokenReference>,
) -> Vec<ResolvedItem> {
    items
        .iter()
        .filter_map(|item| resolve_item(item, location, documents, broken))
        .collect()
}

fn resolve_item(
    item: &NavItem,
    location: &str,
    documents: &DocumentIndex,
    broken: &mut Vec<BrokenReference>,
) -> Option<ResolvedItem> {
    match item {
        NavItem::Doc { id, label } => {
            let Some(doc) = documents.get(id) else {
                broken.push(BrokenReference::new(location, id));
                return None;
            };
            Some(ResolvedItem::Doc {
                id: id.clone(),
                label: label.clone().unwrap_or_else(|| doc.nav_label().to_owned()),
                route: doc.route.clone(),
            })
        }
        NavItem::Category {
            label,
            items,
            collapsed,
            link,
        } => {
            let inner = format!("{location} > {label}");
            let route = link.as_ref().and_then(|id| {
                let route = documents.get(id).map(|doc| doc.route.clone());
                if route.is_none() {
                    broken.push(BrokenReference::new(&inner, id));
                }
                route
            });
            Some(ResolvedItem::Category {
                label: label.clone(),
                collapsed: *collapsed,
                route,
                items: resolve_items(items, &inner, documents, broken),
            })
        }
        NavItem::Link { label, href } => Some(ResolvedItem::Link {
            label: label.clone(),
            href: href.clone(),
        }),
    }
}
