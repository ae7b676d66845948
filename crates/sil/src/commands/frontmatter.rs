//! `sil frontmatter` command implementation.

use std::path::PathBuf;

use clap::Args;
use sil_config::{CliSettings, Config};
use sil_content::backfill::{Backfill, Mode, Report};
use sil_server::site_config_from_sil_config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the frontmatter command.
#[derive(Args)]
pub(crate) struct FrontmatterArgs {
    /// Path to configuration file (default: auto-discover sil.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation directory to process (overrides config).
    #[arg(short, long)]
    docs: Option<PathBuf>,

    /// Process a single file instead of the whole docs directory.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Write changes (default is a dry run).
    #[arg(long)]
    apply: bool,

    /// Only print the summary.
    #[arg(short, long)]
    quiet: bool,
}

impl FrontmatterArgs {
    /// Execute the frontmatter command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a file cannot be read or
    /// written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.docs,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(path = ?config.config_path, "Configuration loaded");
        let library = site_config_from_sil_config(&config).library;

        let mode = if self.apply { Mode::Apply } else { Mode::DryRun };
        let backfill = Backfill::new(&library.rules, &library.tiers, mode);
        let report = match &self.file {
            Some(file) => backfill.run_file(file)?,
            None => backfill.run_tree(&library.docs_root)?,
        };

        if !self.quiet {
            print_changes(&output, &report, mode);
        }
        print_summary(&output, &report, mode);
        Ok(())
    }
}

fn print_changes(output: &Output, report: &Report, mode: Mode) {
    let verb = match mode {
        Mode::Apply => "Added",
        Mode::DryRun => "Would add",
    };
    for change in &report.changed {
        output.status(verb, change.path.display());
        output.detail(format_args!(
            "title: {:?}, tier: {}, order: {}",
            change.title, change.placement.tier, change.placement.order
        ));
    }
}

fn print_summary(output: &Output, report: &Report, mode: Mode) {
    let changed = report.changed.len();
    match mode {
        Mode::Apply => output.status("Updated", format_args!("{changed} file(s)")),
        Mode::DryRun => output.status("Found", format_args!("{changed} file(s) without frontmatter")),
    }
    output.status(
        "Skipped",
        format_args!("{} file(s) with existing frontmatter", report.skipped.len()),
    );
    if mode == Mode::DryRun && changed > 0 {
        output.warn("dry run, pass --apply to write changes");
    }
}
