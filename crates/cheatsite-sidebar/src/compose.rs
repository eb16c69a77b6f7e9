//! Sidebar composition: raw declarations to validated trees.

use std::collections::HashMap;

use crate::raw::{RawCategory, RawDoc, RawItem, RawLink};
use crate::{NavItem, SidebarError, SidebarTree};

/// Deepest category nesting accepted. Root items sit at depth 1.
pub const MAX_DEPTH: usize = 8;

/// Composes sidebars while tracking document ids across all of them.
#[derive(Default)]
pub(crate) struct Composer {
    /// Document id -> location of its first reference.
    seen: HashMap<String, String>,
}

impl Composer {
    pub(crate) fn compose(
        &mut self,
        name: &str,
        raw: Vec<RawItem>,
    ) -> Result<SidebarTree, SidebarError> {
        if name.trim().is_empty() {
            return Err(SidebarError::EmptyLabel {
                location: "<sidebar name>".to_owned(),
            });
        }
        if raw.is_empty() {
            return Err(SidebarError::EmptyCategory {
                location: name.to_owned(),
            });
        }
        let items = self.compose_items(raw, name, 1)?;
        Ok(SidebarTree {
            name: name.to_owned(),
            items,
        })
    }

    fn compose_items(
        &mut self,
        raw: Vec<RawItem>,
        location: &str,
        depth: usize,
    ) -> Result<Vec<NavItem>, SidebarError> {
        raw.into_iter()
            .map(|item| self.compose_item(item, location, depth))
            .collect()
    }

    fn compose_item(
        &mut self,
        raw: RawItem,
        location: &str,
        depth: usize,
    ) -> Result<NavItem, SidebarError> {
        match raw {
            RawItem::Id(id) => {
                self.register(&id, location)?;
                Ok(NavItem::Doc { id, label: None })
            }
            RawItem::Doc(RawDoc { id, label }) => {
                if let Some(label) = &label {
                    require_label(label, location)?;
                }
                self.register(&id, location)?;
                Ok(NavItem::Doc { id, label })
            }
            RawItem::Link(RawLink { label, href }) => {
                require_label(&label, location)?;
                if !href.starts_with("http://") && !href.starts_with("https://") {
                    return Err(SidebarError::InvalidHref {
                        location: format!("{location} > {label}"),
                        href,
                    });
                }
                Ok(NavItem::Link { label, href })
            }
            RawItem::Category(RawCategory {
                label,
                items,
                collapsed,
                link,
            }) => {
                require_label(&label, location)?;
                let inner = format!("{location} > {label}");
                if depth > MAX_DEPTH {
                    return Err(SidebarError::TooDeep {
                        location: inner,
                        max: MAX_DEPTH,
                    });
                }
                if items.is_empty() {
                    return Err(SidebarError::EmptyCategory { location: inner });
                }
                if let Some(link) = &link {
                    self.register(link, &inner)?;
                }
                let items = self.compose_items(items, &inner, depth + 1)?;
                Ok(NavItem::Category {
                    label,
                    items,
                    collapsed,
                    link,
                })
            }
        }
    }

    /// Record a document reference, rejecting empty and repeated ids.
    fn register(&mut self, id: &str, location: &str) -> Result<(), SidebarError> {
        if id.trim().is_empty() {
            return Err(SidebarError::EmptyDocId {
                location: location.to_owned(),
            });
        }
        if let Some(first) = self.seen.get(id) {
            return Err(SidebarError::DuplicateDoc {
                id: id.to_owned(),
                first: first.clone(),
                second: location.to_owned(),
            });
        }
        self.seen.insert(id.to_owned(), location.to_owned());
        Ok(())
    }
}

fn require_label(label: &str, location: &str) -> Result<(), SidebarError> {
    if label.trim().is_empty() {
        return Err(SidebarError::EmptyLabel {
            location: location.to_owned(),
        });
    }
    Ok(())
}
