//! Markdown document discovery for cheatsite.
//!
//! [`DocumentIndex`] walks a docs directory and records, for each markdown
//! file, the identifier sidebars refer to, the route the page is served at,
//! its title, and the relative document links it contains.
//!
//! # Identifiers and routes
//!
//! | File                         | Id                     | Route                   |
//! |------------------------------|------------------------|-------------------------|
//! | `index.md`                   | `index`                | `/`                     |
//! | `categories/cloud.md`        | `categories/cloud`     | `/categories/cloud`     |
//! | `tools/web/zap.mdx`          | `tools/web/zap`        | `/tools/web/zap`        |
//!
//! Front matter `id` replaces the last segment of the identifier and `slug`
//! replaces the route.

mod front_matter;
mod links;
mod markdown;
mod scanner;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use front_matter::split_front_matter;
pub use links::normalize_route;
use links::{resolve_relative, route_for};
use markdown::outline;
use scanner::{DocumentRef, Scanner, strip_doc_extension};

/// A markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Identifier referenced by sidebars and navbar items.
    pub id: String,
    /// Route the page is served at, relative to the site base URL.
    pub route: String,
    /// Page title (front matter `title` > first H1 > file name).
    pub title: String,
    /// Label override for sidebar entries.
    pub sidebar_label: Option<String>,
    /// Source path relative to the docs directory, `/`-separated.
    pub source_path: String,
    /// Relative links to other documents, as written.
    pub links: Vec<String>,
}

impl Document {
    /// Label to show in a sidebar when the entry doesn't set one.
    pub fn nav_label(&self) -> &str {
        self.sidebar_label.as_deref().unwrap_or(&self.title)
    }
}

/// Document loading error.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("Docs directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front matter in {path}: {message}")]
    FrontMatter { path: String, message: String },

    #[error("Duplicate document id `{id}` from {first} and {second}")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },

    #[error("Duplicate route `{route}` from {first} and {second}")]
    DuplicateRoute {
        route: String,
        first: String,
        second: String,
    },
}

/// All documents of a site with lookups by id, route and source path.
#[derive(Debug, Default)]
pub struct DocumentIndex {
    documents: Vec<Document>,
    by_id: HashMap<String, usize>,
    by_route: HashMap<String, usize>,
    by_source: HashMap<String, usize>,
}

impl DocumentIndex {
    /// Scan `source_dir` and build the index.
    ///
    /// Files are parsed in parallel; documents keep source path order.
    ///
    /// # Errors
    ///
    /// Fails if the directory is missing or unreadable, a front matter block
    /// is malformed, or two documents share an id or route.
    pub fn load(source_dir: &Path, route_base_path: &str) -> Result<Self, DocsError> {
        if !source_dir.is_dir() {
            return Err(DocsError::SourceNotFound(source_dir.to_path_buf()));
        }

        let refs = Scanner::new(source_dir.to_path_buf())
            .scan()
            .map_err(|source| DocsError::Io {
                path: source_dir.to_path_buf(),
                source,
            })?;

        let documents = refs
            .par_iter()
            .map(|r| build_document(r, route_base_path))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            count = documents.len(),
            dir = %source_dir.display(),
            "Loaded documents"
        );

        Self::from_documents(documents)
    }

    /// Build an index from already constructed documents.
    ///
    /// # Errors
    ///
    /// Fails if two documents share an id or a route.
    pub fn from_documents(documents: Vec<Document>) -> Result<Self, DocsError> {
        let mut by_id = HashMap::with_capacity(documents.len());
        let mut by_route = HashMap::with_capacity(documents.len());
        let mut by_source = HashMap::with_capacity(documents.len());

        for (idx, doc) in documents.iter().enumerate() {
            if let Some(&first) = by_id.get(&doc.id) {
                let first: &Document = &documents[first];
                return Err(DocsError::DuplicateId {
                    id: doc.id.clone(),
                    first: first.source_path.clone(),
                    second: doc.source_path.clone(),
                });
            }
            if let Some(&first) = by_route.get(&doc.route) {
                let first: &Document = &documents[first];
                return Err(DocsError::DuplicateRoute {
                    route: doc.route.clone(),
                    first: first.source_path.clone(),
                    second: doc.source_path.clone(),
                });
            }
            by_id.insert(doc.id.clone(), idx);
            by_route.insert(doc.route.clone(), idx);
            by_source.insert(doc.source_path.clone(), idx);
        }

        Ok(Self {
            documents,
            by_id,
            by_route,
            by_source,
        })
    }

    /// Get a document by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.by_id.get(id).map(|&i| &self.documents[i])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Get a document by route. The route is normalised first.
    #[must_use]
    pub fn get_by_route(&self, route: &str) -> Option<&Document> {
        self.by_route
            .get(&normalize_route(route))
            .map(|&i| &self.documents[i])
    }

    /// Resolve a relative markdown link written in `from`.
    #[must_use]
    pub fn resolve_link(&self, from: &Document, link: &str) -> Option<&Document> {
        let target = resolve_relative(&from.source_path, link)?;
        self.by_source.get(&target).map(|&i| &self.documents[i])
    }

    /// Documents in source path order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Read one file and derive its id, route, title and links.
fn build_document(doc_ref: &DocumentRef, route_base_path: &str) -> Result<Document, DocsError> {
    let content = fs::read_to_string(&doc_ref.abs_path).map_err(|source| DocsError::Io {
        path: doc_ref.abs_path.clone(),
        source,
    })?;

    let front_matter_error = |message: String| DocsError::FrontMatter {
        path: doc_ref.rel_path.clone(),
        message,
    };

    let (front_matter, body) = split_front_matter(&content).map_err(front_matter_error)?;

    let default_id = strip_doc_extension(&doc_ref.rel_path);
    let id = match front_matter.id.as_deref() {
        Some(custom) if custom.is_empty() || custom.contains('/') => {
            return Err(front_matter_error(format!(
                "id `{custom}` must be a single non-empty path segment"
            )));
        }
        Some(custom) => match default_id.rsplit_once('/') {
            Some((dir, _)) => format!("{dir}/{custom}"),
            None => custom.to_owned(),
        },
        None => default_id.to_owned(),
    };

    let route = match front_matter.slug.as_deref() {
        Some(slug) if slug.starts_with('/') => route_for(route_base_path, slug),
        Some(slug) => match id.rsplit_once('/') {
            Some((dir, _)) => route_for(route_base_path, &format!("{dir}/{slug}")),
            None => route_for(route_base_path, slug),
        },
        None => route_for(route_base_path, &id),
    };

    let parsed = outline(body);
    let title = front_matter
        .title
        .or(parsed.title)
        .unwrap_or_else(|| title_from_id(&id));

    Ok(Document {
        id,
        route,
        title,
        sidebar_label: front_matter.sidebar_label,
        source_path: doc_ref.rel_path.clone(),
        links: parsed.links,
    })
}

/// Derive a title from the last id segment.
fn title_from_id(id: &str) -> String {
    let slug = id.rsplit_once('/').map_or(id, |(_, last)| last);
    titlecase_from_slug(slug)
}

/// Convert a slug (kebab-case or `snake_case`) to title case.
///
/// ```ignore
/// assert_eq!(titlecase_from_slug("scout-suite"), "Scout Suite");
/// ```
fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}
