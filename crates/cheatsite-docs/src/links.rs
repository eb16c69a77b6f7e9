//! Path arithmetic for document links and routes.

/// Resolve `link` relative to the directory holding `from_rel_path`.
///
/// Both are `/`-separated paths relative to the docs root. A leading `/`
/// makes the link root-relative. Returns `None` when `..` escapes the root.
pub(crate) fn resolve_relative(from_rel_path: &str, link: &str) -> Option<String> {
    let mut segments: Vec<&str> = if link.starts_with('/') {
        Vec::new()
    } else {
        let mut parts: Vec<&str> = from_rel_path.split('/').collect();
        parts.pop();
        parts
    };

    for part in link.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    Some(segments.join("/"))
}

/// Build the route of a document from its route path (id or slug).
///
/// A trailing `index` segment is dropped. Routes carry no trailing slash
/// except the root route `/`.
pub(crate) fn route_for(route_base_path: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    let path = if path == "index" {
        ""
    } else {
        path.strip_suffix("/index").unwrap_or(path)
    };
    normalize_route(&format!("{route_base_path}{path}"))
}

/// Normalise a site path for route comparison.
///
/// Drops `#fragment` and `?query`, collapses the trailing slash and
/// guarantees a leading one.
pub fn normalize_route(path: &str) -> String {
    let path = path.split(['#', '?']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_owned();
    }
    if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}
