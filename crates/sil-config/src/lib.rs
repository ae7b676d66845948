//! Configuration management for the SIL website.
//!
//! Parses `sil.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `site.base_url`
//! - `site.environment`
//! - `docs.source_dir`
//! - `docs.static_dir`
//! - `docs.projects_file`
//! - `sync.upstream_dir`

mod content;
mod expand;

pub use content::{ContentConfig, TierEntry};

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override upstream directory for `sil sync`.
    pub upstream_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sil.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Site identity and deployment environment.
    pub site: SiteConfig,
    /// Documentation paths (relative strings from TOML).
    docs: DocsConfigRaw,
    /// Content classification tables.
    pub content: ContentConfig,
    /// Sync tool paths (relative strings from TOML).
    sync: SyncConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved sync configuration (set after loading).
    #[serde(skip)]
    pub sync_resolved: SyncConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8000,
        }
    }
}

/// Site identity.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Display name used in page titles and the health check.
    pub name: String,
    /// Public base URL, used for the sitemap reference in `robots.txt`.
    pub base_url: String,
    /// Deployment environment (`production`, `staging`, ...).
    pub environment: String,
}

impl SiteConfig {
    /// Whether crawlers should be kept out.
    #[must_use]
    pub fn is_staging(&self) -> bool {
        self.environment.eq_ignore_ascii_case("staging")
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Semantic Infrastructure Lab".to_owned(),
            base_url: "https://semanticinfrastructurelab.org".to_owned(),
            environment: "production".to_owned(),
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    pages_dir: Option<String>,
    static_dir: Option<String>,
    projects_file: Option<String>,
    route_prefix: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Root of the category tree.
    pub source_dir: PathBuf,
    /// Fixed pages (home, about, contact), relative to `source_dir`.
    pub pages_dir: String,
    /// Static assets, including `llms.txt`.
    pub static_dir: PathBuf,
    /// Optional YAML project catalog.
    pub projects_file: Option<PathBuf>,
    /// URL prefix for document routes.
    pub route_prefix: String,
}

impl DocsConfig {
    /// Absolute path of the pages directory.
    #[must_use]
    pub fn pages_path(&self) -> PathBuf {
        self.source_dir.join(&self.pages_dir)
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SyncConfigRaw {
    upstream_dir: Option<String>,
    manifest: Option<String>,
}

/// Resolved sync configuration.
#[derive(Debug, Default)]
pub struct SyncConfig {
    /// Root of the upstream content repository.
    pub upstream_dir: Option<PathBuf>,
    /// Manifest filename, relative to `upstream_dir` unless absolute.
    pub manifest: String,
}

impl SyncConfig {
    /// Absolute manifest path, if an upstream directory is configured.
    #[must_use]
    pub fn manifest_path(&self) -> Option<PathBuf> {
        self.upstream_dir.as_ref().map(|dir| dir.join(&self.manifest))
    }

    /// Upstream docs directory that manifest paths are relative to.
    #[must_use]
    pub fn upstream_docs(&self) -> Option<PathBuf> {
        self.upstream_dir.as_ref().map(|dir| dir.join("docs"))
    }
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
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`SIL_DOCS_PATH`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

const DEFAULT_PAGES_DIR: &str = "pages";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_ROUTE_PREFIX: &str = "/docs";
const DEFAULT_MANIFEST: &str = "CONTENT_MANIFEST.yaml";

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sil.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(upstream_dir) = &settings.upstream_dir {
            self.sync_resolved.upstream_dir = Some(upstream_dir.clone());
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
            server: ServerConfig::default(),
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            content: ContentConfig::default(),
            sync: SyncConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                pages_dir: DEFAULT_PAGES_DIR.to_owned(),
                static_dir: base.join(DEFAULT_STATIC_DIR),
                projects_file: None,
                route_prefix: DEFAULT_ROUTE_PREFIX.to_owned(),
            },
            sync_resolved: SyncConfig {
                upstream_dir: None,
                manifest: DEFAULT_MANIFEST.to_owned(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_docs()?;
        self.validate_content()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 lets the OS pick, which is never what a config file means
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        let prefix = &self.docs_resolved.route_prefix;
        if !prefix.starts_with('/') || prefix.ends_with('/') || prefix.contains(['{', '}']) {
            return Err(ConfigError::Validation(format!(
                "docs.route_prefix must be a non-root path starting with '/' and not ending with one, got {prefix:?}"
            )));
        }
        Ok(())
    }

    fn validate_content(&self) -> Result<(), ConfigError> {
        let content = &self.content;
        if content.categories.is_empty() {
            return Err(ConfigError::Validation(
                "content.categories cannot be empty".to_owned(),
            ));
        }
        require_non_empty(&content.strip_prefix, "content.strip_prefix")?;
        require_non_empty(&content.index_name, "content.index_name")?;
        require_non_empty(&content.overview_slug, "content.overview_slug")?;

        for (slug, entry) in &content.tiers {
            if !(1..=3).contains(&entry.tier) {
                return Err(ConfigError::Validation(format!(
                    "content.tiers.{slug}: tier must be 1, 2 or 3, got {}",
                    entry.tier
                )));
            }
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.site.base_url = expand::expand_env(&self.site.base_url, "site.base_url")?;
        self.site.environment = expand::expand_env(&self.site.environment, "site.environment")?;

        expand::expand_opt(&mut self.docs.source_dir, "docs.source_dir")?;
        expand::expand_opt(&mut self.docs.static_dir, "docs.static_dir")?;
        expand::expand_opt(&mut self.docs.projects_file, "docs.projects_file")?;
        expand::expand_opt(&mut self.sync.upstream_dir, "sync.upstream_dir")?;

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            pages_dir: self
                .docs
                .pages_dir
                .clone()
                .unwrap_or_else(|| DEFAULT_PAGES_DIR.to_owned()),
            static_dir: resolve(self.docs.static_dir.as_deref(), DEFAULT_STATIC_DIR),
            projects_file: self.docs.projects_file.as_deref().map(|p| config_dir.join(p)),
            route_prefix: self
                .docs
                .route_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_ROUTE_PREFIX.to_owned()),
        };

        self.sync_resolved = SyncConfig {
            upstream_dir: self.sync.upstream_dir.as_deref().map(|p| config_dir.join(p)),
            manifest: self
                .sync
                .manifest
                .clone()
                .unwrap_or_else(|| DEFAULT_MANIFEST.to_owned()),
        };
    }
}
