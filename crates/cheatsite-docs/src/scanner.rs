//! Document discovery by filesystem walking.
//!
//! The scanner only identifies files that form documents. Reading and
//! parsing them is left to [`DocumentIndex::load`](crate::DocumentIndex::load).

use std::fs;
use std::path::{Path, PathBuf};

/// Extensions recognised as documents.
const DOC_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Reference to a document's source file. No content is read at this stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocumentRef {
    /// Path relative to the source directory, `/`-separated, with extension.
    pub rel_path: String,
    /// Absolute path to the file.
    pub abs_path: PathBuf,
}

/// Discovers document files under a source directory.
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Scan the source directory, returning refs sorted by relative path.
    ///
    /// Hidden entries (`.` prefix) and partials (`_` prefix) are skipped.
    pub fn scan(&self) -> std::io::Result<Vec<DocumentRef>> {
        let mut refs = Vec::new();
        Self::scan_directory(&self.source_dir, "", &mut refs)?;
        refs.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        Ok(refs)
    }

    fn scan_directory(dir: &Path, prefix: &str, refs: &mut Vec<DocumentRef>) -> std::io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || name.starts_with('_') {
                continue;
            }

            let rel = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };
            let path = entry.path();

            if entry.file_type()?.is_dir() {
                Self::scan_directory(&path, &rel, refs)?;
            } else if is_document(&path) {
                refs.push(DocumentRef {
                    rel_path: rel,
                    abs_path: path,
                });
            }
        }
        Ok(())
    }
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DOC_EXTENSIONS.contains(&e))
}

/// Strip the document extension from a relative path.
///
/// - `index.md` -> `index`
/// - `tools/web/zap.mdx` -> `tools/web/zap`
pub(crate) fn strip_doc_extension(rel_path: &str) -> &str {
    DOC_EXTENSIONS
        .iter()
        .find_map(|ext| {
            rel_path
                .strip_suffix(ext)
                .and_then(|s| s.strip_suffix('.'))
        })
        .unwrap_or(rel_path)
}
