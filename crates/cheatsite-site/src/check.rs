//! Reference checks for navbar, footer and markdown links.

use std::fmt;

use cheatsite_config::{BrokenLinkPolicy, Config, LinkTarget, NavbarItem};
use cheatsite_docs::DocumentIndex;

use crate::SiteError;

/// Which part of the site a broken reference was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Sidebar,
    Navbar,
    Footer,
    Markdown,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sidebar => "sidebar",
            Self::Navbar => "navbar",
            Self::Footer => "footer",
            Self::Markdown => "markdown",
        })
    }
}

/// A reference that does not resolve to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenReference {
    /// Where the reference was declared (e.g. `docs > Tools > Cloud`).
    pub location: String,
    /// The unresolved document id, route or link.
    pub target: String,
}

impl BrokenReference {
    pub(crate) fn new(location: &str, target: &str) -> Self {
        Self {
            location: location.to_owned(),
            target: target.to_owned(),
        }
    }
}

impl fmt::Display for BrokenReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: `{}`", self.location, self.target)
    }
}

/// Navbar doc ids and internal links that don't resolve.
pub(crate) fn navbar_problems(config: &Config, documents: &DocumentIndex) -> Vec<BrokenReference> {
    config
        .navbar
        .items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let location = format!("navbar.items[{i}] ({})", item.label());
            match item {
                NavbarItem::Doc { doc_id, .. } => {
                    (!documents.contains(doc_id)).then(|| BrokenReference::new(&location, doc_id))
                }
                NavbarItem::Link { to: Some(to), .. } => documents
                    .get_by_route(to)
                    .is_none()
                    .then(|| BrokenReference::new(&location, to)),
                NavbarItem::Link { .. } => None,
            }
        })
        .collect()
}

/// Footer `to` paths that match no document route.
pub(crate) fn footer_problems(config: &Config, documents: &DocumentIndex) -> Vec<BrokenReference> {
    let mut problems = Vec::new();
    for group in &config.footer.links {
        for link in &group.items {
            if let Some(LinkTarget::Internal(to)) = link.target()
                && documents.get_by_route(to).is_none()
            {
                let location = format!("footer > {} > {}", group.title, link.label);
                problems.push(BrokenReference::new(&location, to));
            }
        }
    }
    problems
}

/// Relative `.md` links inside documents that point at no document.
pub(crate) fn markdown_problems(documents: &DocumentIndex) -> Vec<BrokenReference> {
    documents
        .iter()
        .flat_map(|doc| {
            doc.links
                .iter()
                .filter(move |link| documents.resolve_link(doc, link).is_none())
                .map(move |link| BrokenReference::new(&doc.source_path, link))
        })
        .collect()
}

/// Apply a broken link policy to a batch of problems.
pub(crate) fn enforce(
    policy: BrokenLinkPolicy,
    kind: ReferenceKind,
    problems: Vec<BrokenReference>,
) -> Result<(), SiteError> {
    if problems.is_empty() {
        return Ok(());
    }
    match policy {
        BrokenLinkPolicy::Throw => Err(SiteError::BrokenReferences { kind, problems }),
        BrokenLinkPolicy::Warn => {
            for problem in &problems {
                tracing::warn!(
                    kind = %kind,
                    location = %problem.location,
                    target = %problem.target,
                    "Broken link"
                );
            }
            Ok(())
        }
        BrokenLinkPolicy::Ignore => {
            tracing::debug!(kind = %kind, count = problems.len(), "Ignoring broken links");
            Ok(())
        }
    }
}
