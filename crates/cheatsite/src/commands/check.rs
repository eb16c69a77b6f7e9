//! `cheatsite check` command implementation.

use cheatsite_site::{Site, SiteSummary};
use clap::Args;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Treat documents missing from every sidebar as an error.
    #[arg(long)]
    deny_orphans: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration, sidebars or documents are invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let deny_orphans = self.deny_orphans;
        let (config, site) = self.site.load()?;

        output.highlight(&config.title);
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!(
            "Source directory: {}",
            config.docs_resolved.source_dir.display()
        ));

        report(&site, deny_orphans, &output)?;
        output.success("Configuration is valid");
        Ok(())
    }
}

/// Print the summary and orphan warnings for a loaded site.
///
/// Orphans are warnings unless `deny_orphans` is set.
fn report(site: &Site, deny_orphans: bool, output: &Output) -> Result<SiteSummary, CliError> {
    let summary = site.summary();
    output.info(&format!(
        "Documents: {}, sidebars: {}, categories: {}, sidebar pages: {}",
        summary.documents, summary.sidebars, summary.categories, summary.leaf_pages
    ));

    let orphans = site.orphans();
    if orphans.is_empty() {
        return Ok(summary);
    }
    output.warning(&format!("{} document(s) not in any sidebar:", orphans.len()));
    for doc in &orphans {
        output.warning(&format!("  - {} ({})", doc.id, doc.source_path));
    }
    if deny_orphans {
        return Err(CliError::Validation(format!(
            "{} document(s) not in any sidebar",
            orphans.len()
        )));
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use cheatsite_config::Config;
    use pretty_assertions::assert_eq;

    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// A two-page site; `extra` adds a page no sidebar mentions.
    fn load_site(root: &Path, extra: bool) -> Site {
        write(
            root,
            "cheatsite.toml",
            "title = \"Cheatsheets\"\nurl = \"https://example.com\"\n",
        );
        write(
            root,
            "sidebars.toml",
            "[[docs]]\ntype = \"doc\"\nid = \"index\"\n\n\
             [[docs]]\ntype = \"category\"\nlabel = \"Web\"\nitems = [\"tools/web/zap\"]\n",
        );
        write(root, "docs/index.md", "# Cheatsheets\n");
        write(root, "docs/tools/web/zap.md", "# ZAP\n");
        if extra {
            write(root, "docs/tools/web/burp.md", "# Burp\n");
        }
        let config = Config::load(Some(&root.join("cheatsite.toml")), None).unwrap();
        Site::load(&config).unwrap()
    }

    #[test]
    fn test_report_summary() {
        let dir = tempfile::tempdir().unwrap();
        let site = load_site(dir.path(), false);

        let summary = report(&site, true, &Output::new()).unwrap();
        assert_eq!(
            summary,
            SiteSummary {
                documents: 2,
                sidebars: 1,
                categories: 1,
                leaf_pages: 2,
                orphans: 0,
            }
        );
    }

    #[test]
    fn test_report_orphan_warns() {
        let dir = tempfile::tempdir().unwrap();
        let site = load_site(dir.path(), true);

        let summary = report(&site, false, &Output::new()).unwrap();
        assert_eq!(summary.documents, 3);
        assert_eq!(summary.orphans, 1);
    }

    #[test]
    fn test_report_deny_orphans() {
        let dir = tempfile::tempdir().unwrap();
        let site = load_site(dir.path(), true);

        let err = report(&site, true, &Output::new()).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
        assert_eq!(err.to_string(), "1 document(s) not in any sidebar");
    }
}
