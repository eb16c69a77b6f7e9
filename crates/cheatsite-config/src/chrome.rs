//! Navbar and footer configuration.
//!
//! ```toml
//! [navbar]
//! title = "OffSec Cheatsheets"
//!
//! [[navbar.items]]
//! type = "doc"
//! doc_id = "index"
//! label = "Home"
//!
//! [[footer.links]]
//! title = "Categories"
//! items = [{ label = "Cloud", to = "/categories/cloud" }]
//! ```

use serde::{Deserialize, Serialize};

use crate::{ConfigError, require_http_url, require_non_empty};

/// Top navigation bar.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavbarConfig {
    /// Brand title shown next to the logo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Ordered navbar entries.
    pub items: Vec<NavbarItem>,
}

/// Side of the navbar an item is placed on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarPosition {
    #[default]
    Left,
    Right,
}

/// A single navbar entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavbarItem {
    /// Link to a document by identifier.
    Doc {
        doc_id: String,
        label: String,
        #[serde(default)]
        position: NavbarPosition,
    },
    /// Link to a site path (`to`) or an external URL (`href`).
    Link {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        href: Option<String>,
        #[serde(default)]
        position: NavbarPosition,
    },
}

impl NavbarItem {
    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            Self::Doc { label, .. } | Self::Link { label, .. } => label,
        }
    }

    fn validate(&self, field: &str) -> Result<(), ConfigError> {
        require_non_empty(self.label(), &format!("{field}.label"))?;
        match self {
            Self::Doc { doc_id, .. } => require_non_empty(doc_id, &format!("{field}.doc_id")),
            Self::Link { to, href, .. } => {
                validate_target(to.as_deref(), href.as_deref(), field).map(|_| ())
            }
        }
    }
}

/// Footer color scheme.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    #[default]
    Light,
    Dark,
}

/// Page footer.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FooterConfig {
    pub style: FooterStyle,
    /// Columns of links.
    pub links: Vec<FooterLinkGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// A titled column of footer links.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FooterLinkGroup {
    pub title: String,
    #[serde(default)]
    pub items: Vec<FooterLink>,
}

/// A footer link pointing at a site path or an external URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FooterLink {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl FooterLink {
    /// Resolved link target. `None` only for links that failed validation.
    pub fn target(&self) -> Option<LinkTarget<'_>> {
        link_target(self.to.as_deref(), self.href.as_deref())
    }
}

/// Where a navbar or footer link points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// Path inside the site, checked against document routes.
    Internal(&'a str),
    /// External URL, never checked.
    External(&'a str),
}

fn link_target<'a>(to: Option<&'a str>, href: Option<&'a str>) -> Option<LinkTarget<'a>> {
    match (to, href) {
        (Some(to), None) => Some(LinkTarget::Internal(to)),
        (None, Some(href)) => Some(LinkTarget::External(href)),
        _ => None,
    }
}

/// Require exactly one of `to`/`href`, with `to` absolute and `href` http(s).
fn validate_target<'a>(
    to: Option<&'a str>,
    href: Option<&'a str>,
    field: &str,
) -> Result<LinkTarget<'a>, ConfigError> {
    let target = link_target(to, href).ok_or_else(|| {
        ConfigError::Validation(format!("{field} must set exactly one of `to` or `href`"))
    })?;
    match target {
        LinkTarget::Internal(path) => {
            if !path.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "{field}.to must start with /"
                )));
            }
        }
        LinkTarget::External(url) => require_http_url(url, &format!("{field}.href"))?,
    }
    Ok(target)
}

impl NavbarConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (i, item) in self.items.iter().enumerate() {
            item.validate(&format!("navbar.items[{i}]"))?;
        }
        Ok(())
    }
}

impl FooterConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (i, group) in self.links.iter().enumerate() {
            let field = format!("footer.links[{i}]");
            require_non_empty(&group.title, &format!("{field}.title"))?;
            for (j, link) in group.items.iter().enumerate() {
                let field = format!("{field}.items[{j}]");
                require_non_empty(&link.label, &format!("{field}.label"))?;
                validate_target(link.to.as_deref(), link.href.as_deref(), &field)?;
            }
        }
        Ok(())
    }
}
