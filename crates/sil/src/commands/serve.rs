//! `sil serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use sil_config::{CliSettings, Config};
use sil_server::{run_server, server_config_from_sil_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover sil.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    docs: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long, env = "SIL_HOST")]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "SIL_PORT")]
    port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.docs,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(path = ?config.config_path, "Configuration loaded");

        output.field("Listening", format_args!("{}:{}", config.server.host, config.server.port));
        output.field("Docs", config.docs_resolved.source_dir.display());
        output.field("Static", config.docs_resolved.static_dir.display());
        if config.site.is_staging() {
            output.warn("staging environment, crawlers are disallowed");
        }

        let server_config = server_config_from_sil_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
