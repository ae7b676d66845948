//! `sil sync` command implementation.

use std::path::PathBuf;

use clap::Args;
use sil_config::{CliSettings, Config};
use sil_sync::{Manifest, Mode, SyncOptions, SyncReport, Syncer};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sync command.
#[derive(Args)]
pub(crate) struct SyncArgs {
    /// Path to configuration file (default: auto-discover sil.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Upstream repository root (overrides config).
    #[arg(short, long, env = "SIL_UPSTREAM")]
    upstream: Option<PathBuf>,

    /// Website docs directory (overrides config).
    #[arg(short, long)]
    docs: Option<PathBuf>,

    /// Report what would change without touching the docs directory.
    #[arg(long)]
    dry_run: bool,

    /// Only check for internal files in the docs directory.
    #[arg(long, conflicts_with = "clean")]
    validate: bool,

    /// Delete internal files found in the docs directory.
    #[arg(long)]
    clean: bool,
}

impl SyncArgs {
    /// Execute the sync command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the manifest cannot be loaded,
    /// copying fails, or internal files remain in the docs directory.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let mode = self.mode();

        let cli_settings = CliSettings {
            source_dir: self.docs,
            upstream_dir: self.upstream,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(path = ?config.config_path, "Configuration loaded");

        let (Some(manifest_path), Some(upstream_docs)) = (
            config.sync_resolved.manifest_path(),
            config.sync_resolved.upstream_docs(),
        ) else {
            return Err(CliError::Validation(
                "No upstream repository configured (set sync.upstream_dir or pass --upstream)".to_owned(),
            ));
        };
        let manifest = Manifest::load(&manifest_path)?;
        let dest = config.docs_resolved.source_dir.clone();

        output.field("Manifest", manifest_path.display());
        output.field("Upstream", upstream_docs.display());
        output.field("Website", dest.display());
        if self.dry_run {
            output.warn("dry run, no files will be changed");
        }

        let options = SyncOptions {
            upstream_docs,
            dest: dest.clone(),
            dry_run: self.dry_run,
        };
        let report = Syncer::new(&manifest, options).run(mode)?;
        print_report(&output, &report, mode, self.dry_run);

        if report.has_violations() {
            return Err(CliError::Validation(format!(
                "{} internal file(s) present in {} (run with --clean to remove)",
                report.violations.len(),
                dest.display()
            )));
        }
        Ok(())
    }

    fn mode(&self) -> Mode {
        if self.clean {
            Mode::Clean
        } else if self.validate {
            Mode::Validate
        } else {
            Mode::Sync
        }
    }
}

fn print_report(output: &Output, report: &SyncReport, mode: Mode, dry_run: bool) {
    let (sync_verb, remove_verb) = if dry_run {
        ("Would sync", "Would remove")
    } else {
        ("Synced", "Removed")
    };

    match mode {
        Mode::Sync => {
            output.status(
                sync_verb,
                format_args!(
                    "{} file(s), {} director(ies)",
                    report.synced_files.len(),
                    report.synced_dirs
                ),
            );
            if report.skipped > 0 {
                output.status("Skipped", format_args!("{} entr(ies) flagged for removal", report.skipped));
            }
            if !report.missing.is_empty() {
                output.warn(format_args!("{} public entr(ies) missing upstream", report.missing.len()));
                output.list(report.missing.iter().map(|p| p.display()));
            }
            if let Some(stats) = &report.stats {
                let line = format!(
                    "{} markdown file(s) in website, manifest expects {} public",
                    stats.actual, stats.expected_public
                );
                if stats.exceeds_tolerance() {
                    output.warn(line);
                } else {
                    output.status("Counted", line);
                }
            }
        }
        Mode::Clean => {
            output.status(remove_verb, format_args!("{} internal entr(ies)", report.removed.len()));
            output.list(report.removed.iter().map(|p| p.display()));
        }
        Mode::Validate => {}
    }

    if report.has_violations() {
        output.fail(format_args!("{} internal entr(ies) in website", report.violations.len()));
        output.list(report.violations.iter().map(|p| p.display()));
    } else if mode != Mode::Clean {
        output.status("Verified", "no internal files in website");
    }
}
