//! `cheatsite nav` command implementation.

use std::io::Write;

use cheatsite_site::{Navigation, Site, SiteInfo};
use clap::Args;
use serde::Serialize;

use super::SiteArgs;
use crate::error::CliError;

/// Arguments for the nav command.
#[derive(Args, Debug)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Only emit this sidebar (default: all sidebars).
    #[arg(long)]
    sidebar_name: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

/// JSON document written to stdout.
#[derive(Serialize)]
struct Manifest<'a> {
    site: &'a SiteInfo,
    navigation: Vec<&'a Navigation>,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site is invalid or the requested sidebar doesn't exist.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let sidebar_name = self.sidebar_name;
        let pretty = self.pretty;
        let (_, site) = self.site.load()?;

        let manifest = build_manifest(&site, sidebar_name.as_deref())?;
        let json = if pretty {
            serde_json::to_string_pretty(&manifest)?
        } else {
            serde_json::to_string(&manifest)?
        };

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}")?;
        Ok(())
    }
}

fn build_manifest<'a>(
    site: &'a Site,
    sidebar_name: Option<&str>,
) -> Result<Manifest<'a>, CliError> {
    let navigation = match sidebar_name {
        Some(name) => {
            let nav = site.navigation_for(name).ok_or_else(|| {
                let known: Vec<&str> = site.sidebars().names().collect();
                CliError::Validation(format!(
                    "Unknown sidebar `{name}` (available: {})",
                    known.join(", ")
                ))
            })?;
            vec![nav]
        }
        None => site.navigation().iter().collect(),
    };
    Ok(Manifest {
        site: site.info(),
        navigation,
    })
}
