//! HTTP server for the SIL website.
//!
//! Serves server-rendered HTML for the fixed pages, the document library
//! and the project catalog, plus a few plain-text and JSON endpoints:
//!
//! ```text
//! Browser ──HTTP──► axum router (sil-server)
//!                        │
//!                        ├─► Page routes ──► Site (load + render) ──► HTML layout
//!                        │
//!                        ├─► /health, /robots.txt, /llms.txt
//!                        │
//!                        └─► /static (tower-http ServeDir)
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use sil_config::Config;
//! use sil_server::{run_server, server_config_from_sil_config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load(None, None).unwrap();
//!     let server_config = server_config_from_sil_config(&config, "0.1.0".to_owned());
//!     run_server(server_config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod template;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use sil_content::{LibraryConfig, Placement, ProjectCatalog, SlugRules};
use sil_site::{Site, SiteConfig};
use state::AppState;

pub use error::ServerError;

/// Site identity shown in page titles, the health check and `robots.txt`.
#[derive(Clone, Debug)]
pub struct SiteInfo {
    /// Display name.
    pub name: String,
    /// Public base URL without trailing slash.
    pub base_url: String,
    /// Keep crawlers out.
    pub staging: bool,
}

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content library and link map settings.
    pub site: SiteConfig,
    /// Site identity.
    pub info: SiteInfo,
    /// Static assets directory, mounted at `/static`.
    pub static_dir: PathBuf,
    /// Project catalog file (`None` shows an empty catalog).
    pub projects_file: Option<PathBuf>,
    /// Application version (for ETags and the health check).
    pub version: String,
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the project catalog is invalid or the server fails
/// to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let projects = ProjectCatalog::load(config.projects_file.as_deref())?;
    let site = Site::open(config.site);

    let state = Arc::new(AppState {
        site,
        projects,
        info: config.info,
        static_dir: config.static_dir,
        version: config.version,
    });
    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from SIL config.
///
/// # Arguments
///
/// * `config` - SIL configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_sil_config(config: &sil_config::Config, version: String) -> ServerConfig {
    let docs = &config.docs_resolved;
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        site: site_config_from_sil_config(config),
        info: SiteInfo {
            name: config.site.name.clone(),
            base_url: config.site.base_url.trim_end_matches('/').to_owned(),
            staging: config.site.is_staging(),
        },
        static_dir: docs.static_dir.clone(),
        projects_file: docs.projects_file.clone(),
        version,
    }
}

/// Create the content site configuration from SIL config.
#[must_use]
pub fn site_config_from_sil_config(config: &sil_config::Config) -> SiteConfig {
    let content = &config.content;
    let docs = &config.docs_resolved;

    let library = LibraryConfig {
        docs_root: docs.source_dir.clone(),
        categories: content.categories.clone(),
        rules: SlugRules {
            strip_prefix: content.strip_prefix.clone(),
            index_name: content.index_name.clone(),
            overview_slug: content.overview_slug.clone(),
        },
        overrides: content.overrides.clone(),
        tiers: content
            .tiers
            .iter()
            .map(|(slug, entry)| (slug.clone(), Placement::new(entry.tier, entry.order)))
            .collect(),
        pages_dir: docs.pages_dir.clone(),
    };

    SiteConfig {
        library,
        route_prefix: docs.route_prefix.clone(),
        extra_links: content.extra_links.clone(),
        nav_reference_limit: content.nav_reference_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_server_config_from_defaults() {
        let config = sil_config::Config::default();

        let server = server_config_from_sil_config(&config, "1.2.3".to_owned());

        assert_eq!(server.port, 8000);
        assert_eq!(server.site.route_prefix, "/docs");
        assert_eq!(server.site.library.rules, SlugRules::default());
        assert_eq!(server.site.library.tiers.len(), config.content.tiers.len());
        assert!(!server.info.staging);
        assert!(!server.info.base_url.ends_with('/'));
        assert_eq!(server.version, "1.2.3");
    }
}
