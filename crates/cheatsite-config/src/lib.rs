//! Site configuration for cheatsite.
//!
//! Parses `cheatsite.toml` with serde and provides auto-discovery of the
//! config file in parent directories. CLI settings can be applied during load
//! via [`CliSettings`].
//!
//! ```toml
//! title = "Offensive Security Cheatsheets"
//! url = "https://example.com"
//! base_url = "/"
//! on_broken_links = "throw"
//!
//! [docs]
//! source_dir = "docs"
//! sidebar_path = "sidebars.toml"
//! route_base_path = "/"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `url`, `base_url` and `footer.copyright` support `${VAR}` and
//! `${VAR:-default}`.

mod chrome;
mod expand;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use chrome::{
    FooterConfig, FooterLink, FooterLinkGroup, FooterStyle, LinkTarget, NavbarConfig, NavbarItem,
    NavbarPosition,
};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "cheatsite.toml";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override sidebar file.
    pub sidebar_path: Option<PathBuf>,
    /// Override the navbar/footer broken link policy.
    pub on_broken_links: Option<BrokenLinkPolicy>,
}

/// What to do when a link does not resolve to a document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinkPolicy {
    /// Fail the load.
    #[default]
    Throw,
    /// Log a warning and continue.
    Warn,
    /// Skip the check.
    Ignore,
}

impl std::str::FromStr for BrokenLinkPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "throw" => Ok(Self::Throw),
            "warn" => Ok(Self::Warn),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!(
                "unknown policy `{other}` (expected throw, warn or ignore)"
            )),
        }
    }
}

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site title.
    pub title: String,
    pub tagline: Option<String>,
    /// Canonical site URL.
    pub url: String,
    /// Path the site is served under. Starts and ends with `/`.
    pub base_url: String,
    pub favicon: Option<String>,
    pub organization_name: Option<String>,
    pub project_name: Option<String>,
    /// Policy for navbar and footer links.
    pub on_broken_links: BrokenLinkPolicy,
    /// Policy for relative links inside markdown documents.
    pub on_broken_markdown_links: BrokenLinkPolicy,
    /// Docs configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    pub navbar: NavbarConfig,
    pub footer: FooterConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    sidebar_path: Option<String>,
    route_base_path: Option<String>,
}

/// Resolved docs configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory holding markdown documents.
    pub source_dir: PathBuf,
    /// Sidebar definition file.
    pub sidebar_path: PathBuf,
    /// Route prefix for documents (e.g. `/` or `/docs/`).
    pub route_base_path: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`footer.copyright`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
pub(crate) fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require a path prefix of the form `/` or `/segment/`.
fn require_slash_wrapped(value: &str, field: &str) -> Result<(), ConfigError> {
    if !value.starts_with('/') || !value.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start and end with /"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `cheatsite.toml` in current directory and parents,
    /// falling back to defaults rooted at the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the loaded values are invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// Relative paths resolve against `base_dir`.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base_dir);
        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(sidebar_path) = &settings.sidebar_path {
            self.docs_resolved.sidebar_path.clone_from(sidebar_path);
        }
        if let Some(policy) = settings.on_broken_links {
            self.on_broken_links = policy;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            title: "Documentation".to_owned(),
            tagline: None,
            url: "http://localhost".to_owned(),
            base_url: "/".to_owned(),
            favicon: None,
            organization_name: None,
            project_name: None,
            on_broken_links: BrokenLinkPolicy::Throw,
            on_broken_markdown_links: BrokenLinkPolicy::Warn,
            docs: DocsConfigRaw::default(),
            navbar: NavbarConfig::default(),
            footer: FooterConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                sidebar_path: base.join("sidebars.toml"),
                route_base_path: "/".to_owned(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.title, "title")?;
        require_http_url(&self.url, "url")?;
        require_slash_wrapped(&self.base_url, "base_url")?;
        require_slash_wrapped(&self.docs_resolved.route_base_path, "docs.route_base_path")?;
        self.navbar.validate()?;
        self.footer.validate()?;
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.url = expand::expand_env(&self.url, "url")?;
        self.base_url = expand::expand_env(&self.base_url, "base_url")?;
        if let Some(ref copyright) = self.footer.copyright {
            self.footer.copyright = Some(expand::expand_env(copyright, "footer.copyright")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            sidebar_path: resolve(self.docs.sidebar_path.as_deref(), "sidebars.toml"),
            route_base_path: self
                .docs
                .route_base_path
                .clone()
                .unwrap_or_else(|| "/".to_owned()),
        };
    }
}
