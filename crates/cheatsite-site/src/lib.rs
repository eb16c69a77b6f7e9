//! Site assembly for cheatsite.
//!
//! [`Site::load`] reads the document index and sidebar file named by a
//! [`Config`], then checks every reference the configuration makes:
//!
//! - sidebar documents and category links (always fatal)
//! - navbar and footer links (`on_broken_links`)
//! - relative markdown links between documents (`on_broken_markdown_links`)
//!
//! A loaded site holds the fully resolved navigation for each sidebar.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use cheatsite_config::Config;
//! use cheatsite_site::Site;
//!
//! let config = Config::load(None, None)?;
//! let site = Site::load(&config)?;
//! for nav in site.navigation() {
//!     println!("{}: {} items", nav.sidebar, nav.items.len());
//! }
//! # Ok(())
//! # }
//! ```

mod check;
mod navigation;

use std::collections::HashSet;
use std::fmt::Write as _;

use cheatsite_config::{BrokenLinkPolicy, Config, FooterConfig, NavbarConfig};
use cheatsite_docs::{DocsError, Document, DocumentIndex};
use cheatsite_sidebar::{SidebarError, Sidebars};
use serde::Serialize;

pub use check::{BrokenReference, ReferenceKind};
pub use navigation::{Navigation, ResolvedItem};

/// Site loading error.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error(transparent)]
    Docs(#[from] DocsError),

    #[error(transparent)]
    Sidebar(#[from] SidebarError),

    #[error("{}", format_broken(.kind, .problems))]
    BrokenReferences {
        kind: ReferenceKind,
        problems: Vec<BrokenReference>,
    },
}

fn format_broken(kind: &ReferenceKind, problems: &[BrokenReference]) -> String {
    let mut msg = format!(
        "{} broken {kind} reference{}:",
        problems.len(),
        if problems.len() == 1 { "" } else { "s" }
    );
    for problem in problems {
        let _ = write!(msg, "\n  - {problem}");
    }
    msg
}

/// Site metadata and chrome, as handed to a renderer.
#[derive(Debug, Clone, Serialize)]
pub struct SiteInfo {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    pub url: String,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    pub navbar: NavbarConfig,
    pub footer: FooterConfig,
}

impl From<&Config> for SiteInfo {
    fn from(config: &Config) -> Self {
        Self {
            title: config.title.clone(),
            tagline: config.tagline.clone(),
            url: config.url.clone(),
            base_url: config.base_url.clone(),
            favicon: config.favicon.clone(),
            organization_name: config.organization_name.clone(),
            project_name: config.project_name.clone(),
            navbar: config.navbar.clone(),
            footer: config.footer.clone(),
        }
    }
}

/// Counts reported after a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SiteSummary {
    pub documents: usize,
    pub sidebars: usize,
    pub categories: usize,
    pub leaf_pages: usize,
    pub orphans: usize,
}

/// A validated site: documents, sidebars and resolved navigation.
#[derive(Debug)]
pub struct Site {
    info: SiteInfo,
    documents: DocumentIndex,
    sidebars: Sidebars,
    navigation: Vec<Navigation>,
}

impl Site {
    /// Load documents and sidebars from the paths in `config` and validate.
    ///
    /// # Errors
    ///
    /// Fails on any document or sidebar loading error, any sidebar reference
    /// to a missing document, and broken navbar/footer/markdown links when the
    /// matching policy is `throw`.
    pub fn load(config: &Config) -> Result<Self, SiteError> {
        let docs = &config.docs_resolved;
        let documents = DocumentIndex::load(&docs.source_dir, &docs.route_base_path)?;
        let sidebars = Sidebars::load(&docs.sidebar_path)?;
        Self::assemble(config, documents, sidebars)
    }

    /// Validate already loaded parts.
    ///
    /// # Errors
    ///
    /// Same reference checks as [`Site::load`].
    pub fn assemble(
        config: &Config,
        documents: DocumentIndex,
        sidebars: Sidebars,
    ) -> Result<Self, SiteError> {
        let mut navigation = Vec::new();
        let mut broken = Vec::new();
        for tree in sidebars.iter() {
            match navigation::resolve(tree, &documents) {
                Ok(nav) => navigation.push(nav),
                Err(problems) => broken.extend(problems),
            }
        }
        check::enforce(BrokenLinkPolicy::Throw, ReferenceKind::Sidebar, broken)?;

        check::enforce(
            config.on_broken_links,
            ReferenceKind::Navbar,
            check::navbar_problems(config, &documents),
        )?;
        check::enforce(
            config.on_broken_links,
            ReferenceKind::Footer,
            check::footer_problems(config, &documents),
        )?;
        check::enforce(
            config.on_broken_markdown_links,
            ReferenceKind::Markdown,
            check::markdown_problems(&documents),
        )?;

        let site = Self {
            info: SiteInfo::from(config),
            documents,
            sidebars,
            navigation,
        };
        tracing::info!(
            documents = site.documents.len(),
            sidebars = site.navigation.len(),
            "Site validated"
        );
        Ok(site)
    }

    #[must_use]
    pub fn info(&self) -> &SiteInfo {
        &self.info
    }

    #[must_use]
    pub fn documents(&self) -> &DocumentIndex {
        &self.documents
    }

    #[must_use]
    pub fn sidebars(&self) -> &Sidebars {
        &self.sidebars
    }

    /// Resolved navigation for every sidebar, in declaration order.
    #[must_use]
    pub fn navigation(&self) -> &[Navigation] {
        &self.navigation
    }

    /// Resolved navigation for one sidebar.
    #[must_use]
    pub fn navigation_for(&self, sidebar: &str) -> Option<&Navigation> {
        self.navigation.iter().find(|nav| nav.sidebar == sidebar)
    }

    /// Documents that no sidebar references.
    #[must_use]
    pub fn orphans(&self) -> Vec<&Document> {
        let referenced: HashSet<&str> = self.sidebars.doc_ids().into_iter().collect();
        self.documents
            .iter()
            .filter(|doc| !referenced.contains(doc.id.as_str()))
            .collect()
    }

    #[must_use]
    pub fn summary(&self) -> SiteSummary {
        SiteSummary {
            documents: self.documents.len(),
            sidebars: self.navigation.len(),
            categories: self.sidebars.iter().map(|t| t.category_count()).sum(),
            leaf_pages: self.sidebars.iter().map(|t| t.leaf_count()).sum(),
            orphans: self.orphans().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;
    use std::fs;
    use std::path::Path;

    use cheatsite_sidebar::NavItem;
    use pretty_assertions::assert_eq;

    use super::*;

    const TOOLS: &[(&str, [&str; 2])] = &[
        ("Active Directory", ["bloodhound", "ldapdomaindump"]),
        ("Cloud", ["prowler", "scout-suite"]),
        ("Web", ["nuclei", "zap"]),
        ("Red Team", ["caldera", "sliver"]),
        ("Wireless", ["aircrack-ng", "kismet"]),
        ("OSINT", ["maltego", "theharvester"]),
    ];

    fn slug(label: &str) -> String {
        label.to_lowercase().replace(' ', "-")
    }

    fn tool_ids() -> Vec<String> {
        TOOLS
            .iter()
            .flat_map(|(domain, tools)| {
                tools
                    .iter()
                    .map(move |tool| format!("tools/{}/{tool}", slug(domain)))
            })
            .collect()
    }

    /// Write the cheatsheet site into `root` and return its config.
    fn write_site(root: &Path) -> Config {
        let docs = root.join("docs");
        let write = |rel: &str, content: &str| {
            let path = docs.join(format!("{rel}.md"));
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        };

        write("index", "# Offensive Security Cheatsheets\n");
        for (domain, _) in TOOLS {
            write(&format!("categories/{}", slug(domain)), &format!("# {domain}\n"));
        }
        for id in tool_ids() {
            write(&id, "Usage notes.\n");
        }

        let mut sidebars = String::from(
            "[[docs]]\ntype = \"doc\"\nid = \"index\"\n\n\
             [[docs]]\ntype = \"category\"\nlabel = \"Categories\"\nitems = [",
        );
        let categories: Vec<String> = TOOLS
            .iter()
            .map(|(domain, _)| format!("\"categories/{}\"", slug(domain)))
            .collect();
        sidebars.push_str(&categories.join(", "));
        sidebars.push_str("]\n\n[[docs]]\ntype = \"category\"\nlabel = \"Tools\"\n");
        for (domain, tools) in TOOLS {
            let items: Vec<String> = tools
                .iter()
                .map(|tool| format!("\"tools/{}/{tool}\"", slug(domain)))
                .collect();
            let _ = write!(
                sidebars,
                "\n[[docs.items]]\ntype = \"category\"\nlabel = \"{domain}\"\nitems = [{}]\n",
                items.join(", ")
            );
        }
        fs::write(root.join("sidebars.toml"), sidebars).unwrap();

        let config = r#"
title = "Offensive Security Cheatsheets"
url = "https://example.com"

[[navbar.items]]
type = "doc"
doc_id = "index"
label = "Home"

[[navbar.items]]
type = "doc"
doc_id = "categories/active-directory"
label = "Categories"

[[footer.links]]
title = "Categories"
items = [
    { label = "Cloud", to = "/categories/cloud" },
    { label = "OSINT", to = "/categories/osint/" },
]
"#;
        Config::from_toml_str(config, root).unwrap()
    }

    #[test]
    fn test_load_cheatsheet_site() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_site(dir.path());

        let site = Site::load(&config).unwrap();
        assert_eq!(
            site.summary(),
            SiteSummary {
                documents: 19,
                sidebars: 1,
                categories: 8,
                leaf_pages: 19,
                orphans: 0,
            }
        );
        assert_eq!(site.info().title, "Offensive Security Cheatsheets");
    }

    #[test]
    fn test_tools_navigation_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_site(dir.path());
        let site = Site::load(&config).unwrap();

        let nav = site.navigation_for("docs").unwrap();
        let tools = nav.items.iter().find(|i| i.label() == "Tools").unwrap();
        let domains: Vec<&str> = tools.children().iter().map(ResolvedItem::label).collect();
        assert_eq!(
            domains,
            vec!["Active Directory", "Cloud", "Web", "Red Team", "Wireless", "OSINT"]
        );

        let leaves: Vec<&ResolvedItem> =
            tools.children().iter().flat_map(ResolvedItem::children).collect();
        assert_eq!(leaves.len(), 12);
        assert_eq!(
            *leaves[2],
            ResolvedItem::Doc {
                id: "tools/cloud/prowler".to_owned(),
                label: "Prowler".to_owned(),
                route: "/tools/cloud/prowler".to_owned(),
            }
        );
    }

    #[test]
    fn test_removed_document_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_site(dir.path());
        fs::remove_file(dir.path().join("docs/tools/cloud/prowler.md")).unwrap();

        let err = Site::load(&config).unwrap_err();
        let SiteError::BrokenReferences { kind, problems } = &err else {
            panic!("expected BrokenReferences, got {err:?}");
        };
        assert_eq!(*kind, ReferenceKind::Sidebar);
        assert_eq!(
            problems,
            &vec![BrokenReference::new("docs > Tools > Cloud", "tools/cloud/prowler")]
        );
        assert_eq!(
            err.to_string(),
            "1 broken sidebar reference:\n  - docs > Tools > Cloud: `tools/cloud/prowler`"
        );
    }

    #[test]
    fn test_broken_references_listed_together() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_site(dir.path());
        fs::remove_file(dir.path().join("docs/tools/web/zap.md")).unwrap();
        fs::remove_file(dir.path().join("docs/tools/osint/maltego.md")).unwrap();

        let err = Site::load(&config).unwrap_err();
        let SiteError::BrokenReferences { problems, .. } = err else {
            panic!("expected BrokenReferences, got {err:?}");
        };
        let targets: Vec<&str> = problems.iter().map(|p| p.target.as_str()).collect();
        assert_eq!(targets, vec!["tools/web/zap", "tools/osint/maltego"]);
    }

    #[test]
    fn test_orphan_documents_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_site(dir.path());
        fs::write(dir.path().join("docs/legal.md"), "# Legal\n").unwrap();

        let site = Site::load(&config).unwrap();
        let orphans: Vec<&str> = site.orphans().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(orphans, vec!["legal"]);
    }

    fn index_of(ids: &[&str]) -> DocumentIndex {
        let documents = ids
            .iter()
            .map(|id| Document {
                id: (*id).to_owned(),
                route: if *id == "index" {
                    "/".to_owned()
                } else {
                    format!("/{id}")
                },
                title: (*id).to_owned(),
                sidebar_label: None,
                source_path: format!("{id}.md"),
                links: Vec::new(),
            })
            .collect();
        DocumentIndex::from_documents(documents).unwrap()
    }

    #[test]
    fn test_navbar_unknown_doc_throws() {
        let mut config = Config::from_toml_str("", Path::new("/site")).unwrap();
        config.navbar.items.push(cheatsite_config::NavbarItem::Doc {
            doc_id: "categories/ics".to_owned(),
            label: "ICS".to_owned(),
            position: cheatsite_config::NavbarPosition::Left,
        });
        let sidebars = Sidebars::from_toml_str("docs = [\"index\"]").unwrap();

        let err = Site::assemble(&config, index_of(&["index"]), sidebars).unwrap_err();
        let SiteError::BrokenReferences { kind, problems } = err else {
            panic!("expected BrokenReferences, got {err:?}");
        };
        assert_eq!(kind, ReferenceKind::Navbar);
        assert_eq!(problems[0].target, "categories/ics");
    }

    #[test]
    fn test_footer_policy_warn_continues() {
        let toml = r#"
on_broken_links = "warn"

[[footer.links]]
title = "Categories"
items = [{ label = "ICS", to = "/categories/ics" }]
"#;
        let config = Config::from_toml_str(toml, Path::new("/site")).unwrap();
        let sidebars = Sidebars::from_toml_str("docs = [\"index\"]").unwrap();

        let site = Site::assemble(&config, index_of(&["index"]), sidebars).unwrap();
        assert_eq!(site.navigation().len(), 1);
    }

    #[test]
    fn test_footer_policy_throw() {
        let toml = r#"
[[footer.links]]
title = "Categories"
items = [
    { label = "Cloud", to = "/cloud" },
    { label = "ICS", to = "/categories/ics" },
    { label = "GitHub", href = "https://github.com/example" },
]
"#;
        let config = Config::from_toml_str(toml, Path::new("/site")).unwrap();
        let sidebars = Sidebars::from_toml_str("docs = [\"index\", \"cloud\"]").unwrap();

        let err = Site::assemble(&config, index_of(&["index", "cloud"]), sidebars).unwrap_err();
        let SiteError::BrokenReferences { kind, problems } = err else {
            panic!("expected BrokenReferences, got {err:?}");
        };
        assert_eq!(kind, ReferenceKind::Footer);
        assert_eq!(
            problems,
            vec![BrokenReference::new("footer > Categories > ICS", "/categories/ics")]
        );
    }

    #[test]
    fn test_markdown_links_follow_policy() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = write_site(dir.path());
        fs::write(
            dir.path().join("docs/tools/web/nuclei.md"),
            "# Nuclei\nSee [ZAP](zap.md) and [Burp](burp.md).\n",
        )
        .unwrap();

        // Default policy for markdown links is warn.
        assert!(Site::load(&config).is_ok());

        config.on_broken_markdown_links = BrokenLinkPolicy::Throw;
        let err = Site::load(&config).unwrap_err();
        let SiteError::BrokenReferences { kind, problems } = err else {
            panic!("expected BrokenReferences, got {err:?}");
        };
        assert_eq!(kind, ReferenceKind::Markdown);
        assert_eq!(
            problems,
            vec![BrokenReference::new("tools/web/nuclei.md", "burp.md")]
        );
    }

    #[test]
    fn test_links_in_code_blocks_are_not_checked() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = write_site(dir.path());
        config.on_broken_markdown_links = BrokenLinkPolicy::Throw;
        fs::write(
            dir.path().join("docs/tools/active-directory/bloodhound.md"),
            "```bash\n# enumerate smb shares\necho '[report](out/report.md)'\n```\n",
        )
        .unwrap();

        let site = Site::load(&config).unwrap();
        let ResolvedItem::Category { items, .. } = &site.navigation()[0].items[2] else {
            panic!("expected Tools category");
        };
        assert_eq!(items[0].children()[0].label(), "Bloodhound");
    }

    #[test]
    fn test_category_link_resolves_route() {
        let json = r#"{"docs": [{"type": "category", "label": "Web", "link": "categories/web", "items": ["tools/web/zap"]}]}"#;
        let sidebars = Sidebars::from_json_str(json).unwrap();
        let config = Config::from_toml_str("", Path::new("/site")).unwrap();

        let site = Site::assemble(
            &config,
            index_of(&["categories/web", "tools/web/zap"]),
            sidebars,
        )
        .unwrap();
        let ResolvedItem::Category { route, .. } = &site.navigation()[0].items[0] else {
            panic!("expected category");
        };
        assert_eq!(route.as_deref(), Some("/categories/web"));
    }

    #[test]
    fn test_navigation_serializes_for_renderer() {
        let sidebars = Sidebars::from_toml_str(
            "[[docs]]\ntype = \"doc\"\nid = \"index\"\nlabel = \"Home\"",
        )
        .unwrap();
        let config = Config::from_toml_str("", Path::new("/site")).unwrap();
        let site = Site::assemble(&config, index_of(&["index"]), sidebars).unwrap();

        let json = serde_json::to_value(site.navigation()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "sidebar": "docs",
                "items": [{"type": "doc", "id": "index", "label": "Home", "route": "/"}],
            }])
        );
        assert_eq!(site.sidebars().primary().unwrap().items()[0].label(), Some("Home"));
        assert!(matches!(
            site.sidebars().primary().unwrap().items()[0],
            NavItem::Doc { .. }
        ));
    }

    #[test]
    fn test_shipped_site_is_valid() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../site");
        let config = Config::load(Some(&root.join("cheatsite.toml")), None).unwrap();
        let site = Site::load(&config).unwrap();

        let docs = site.sidebars().get("docs").unwrap();
        let tools = docs.category("Tools").unwrap();
        assert_eq!(tools.children().len(), 6);
        assert_eq!(
            tools.children().iter().map(|c| c.children().len()).sum::<usize>(),
            12
        );
        assert!(site.orphans().is_empty());
    }
}
