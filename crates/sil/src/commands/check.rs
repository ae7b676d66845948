//! `sil check` command implementation.

use std::path::PathBuf;

use clap::Args;
use sil_config::{CliSettings, Config};
use sil_server::site_config_from_sil_config;
use sil_site::{Diagnostics, Site, check};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover sil.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation directory to check (overrides config).
    #[arg(short, long)]
    docs: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any problem is found.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.docs,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(path = ?config.config_path, "Configuration loaded");
        let site = Site::open(site_config_from_sil_config(&config));

        let diagnostics = check(&site);
        print_diagnostics(&output, &diagnostics);

        if diagnostics.is_clean() {
            output.status("Checked", "no problems found");
            Ok(())
        } else {
            Err(CliError::Validation(format!(
                "{} problem(s) found",
                problem_count(&diagnostics)
            )))
        }
    }
}

fn problem_count(diagnostics: &Diagnostics) -> usize {
    diagnostics.slug_collisions.len()
        + diagnostics.link_collisions.len()
        + diagnostics.tier_mismatches.len()
        + diagnostics.broken.len()
}

fn print_diagnostics(output: &Output, diagnostics: &Diagnostics) {
    if !diagnostics.slug_collisions.is_empty() {
        output.heading("Slug collisions");
        output.list(diagnostics.slug_collisions.iter().map(|c| {
            format!("{}/{}: {} kept, {} unreachable", c.category, c.slug, c.kept, c.dropped)
        }));
    }

    if !diagnostics.link_collisions.is_empty() {
        output.heading("Link map collisions");
        output.list(
            diagnostics
                .link_collisions
                .iter()
                .map(|c| format!("{}: {} kept, {} dropped", c.key, c.kept, c.dropped)),
        );
    }

    if !diagnostics.tier_mismatches.is_empty() {
        output.heading("Frontmatter disagrees with tier table");
        output.list(diagnostics.tier_mismatches.iter().map(|m| {
            format!(
                "{}: declared tier {}, order {}; served as tier {}, order {}",
                m.path.display(),
                describe(m.declared.0),
                describe(m.declared.1),
                m.effective.0,
                m.effective.1
            )
        }));
    }

    if !diagnostics.broken.is_empty() {
        output.heading("Broken documents");
        output.list(
            diagnostics
                .broken
                .iter()
                .map(|b| format!("{}/{}: {}", b.category, b.slug, b.reason)),
        );
    }
}

fn describe<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}
