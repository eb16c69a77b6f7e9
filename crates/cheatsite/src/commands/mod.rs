//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod nav;

use std::path::PathBuf;

use cheatsite_config::{BrokenLinkPolicy, CliSettings, Config};
use cheatsite_site::Site;
use clap::Args;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use nav::NavArgs;

/// Options shared by every command that loads a site.
#[derive(Args, Debug)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover cheatsite.toml).
    #[arg(short, long, env = "CHEATSITE_CONFIG")]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Sidebar file (overrides config).
    #[arg(long)]
    sidebar: Option<PathBuf>,

    /// Policy for broken navbar/footer links: throw, warn or ignore (overrides config).
    #[arg(long)]
    on_broken_links: Option<BrokenLinkPolicy>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SiteArgs {
    /// Load configuration with CLI overrides, then load and validate the site.
    pub(crate) fn load(self) -> Result<(Config, Site), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            sidebar_path: self.sidebar,
            on_broken_links: self.on_broken_links,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::info!(
            source_dir = %config.docs_resolved.source_dir.display(),
            sidebar = %config.docs_resolved.sidebar_path.display(),
            "Loading site"
        );
        let site = Site::load(&config)?;
        Ok((config, site))
    }
}
