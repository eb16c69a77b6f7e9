//! YAML front matter parsing.
//!
//! Documents may start with a `---` delimited YAML block:
//!
//! ```markdown
//! ---
//! id: prowler
//! title: Prowler
//! sidebar_label: Prowler (AWS)
//! ---
//! ```

use serde::Deserialize;

/// Front matter fields that affect navigation.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct FrontMatter {
    /// Replaces the file name part of the document id.
    pub id: Option<String>,
    pub title: Option<String>,
    pub sidebar_label: Option<String>,
    /// Route override. Absolute (`/x`) or relative to the document's directory.
    pub slug: Option<String>,
}

/// Split a document into its front matter and body.
///
/// Returns default front matter and the whole content when no block is present.
///
/// # Errors
///
/// Returns the YAML error message if the block is malformed.
pub(crate) fn split_front_matter(content: &str) -> Result<(FrontMatter, &str), String> {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return Ok((FrontMatter::default(), content));
    };

    let Some((yaml, body)) = find_closing_delimiter(rest) else {
        return Err("front matter is missing its closing `---`".to_owned());
    };

    if yaml.trim().is_empty() {
        return Ok((FrontMatter::default(), body));
    }

    let front_matter = serde_yaml::from_str(yaml).map_err(|e| format!("invalid YAML: {e}"))?;
    Ok((front_matter, body))
}

/// Find a line consisting of `---`, returning the text before and after it.
fn find_closing_delimiter(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
