//! Frontmatter backfill for markdown files that lack a block.
//!
//! Tier and order come from the tier table, the title from the first
//! `# ` heading or the file stem.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::document::first_heading;
use crate::frontmatter::{MARKER, has_frontmatter};
use crate::slug::{SlugRules, title_case};
use crate::tiers::{Placement, TierTable};

/// Whether to write changes to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    DryRun,
    Apply,
}

/// Frontmatter generated for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub path: PathBuf,
    pub slug: String,
    pub title: String,
    pub placement: Placement,
}

/// Result of a backfill run.
#[derive(Debug, Default)]
pub struct Report {
    pub changed: Vec<Change>,
    /// Files that already had frontmatter.
    pub skipped: Vec<PathBuf>,
}

/// Backfill error.
#[derive(Debug, thiserror::Error)]
pub enum BackfillError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Adds frontmatter to markdown files.
pub struct Backfill<'a> {
    rules: &'a SlugRules,
    tiers: &'a TierTable,
    mode: Mode,
}

impl<'a> Backfill<'a> {
    pub fn new(rules: &'a SlugRules, tiers: &'a TierTable, mode: Mode) -> Self {
        Self { rules, tiers, mode }
    }

    /// Process every `.md` file below `root`, in sorted path order.
    pub fn run_tree(&self, root: &Path) -> Result<Report, BackfillError> {
        let pattern = format!("{}/**/*.md", glob::Pattern::escape(&root.to_string_lossy()));
        let mut paths: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();
        paths.sort();

        let mut report = Report::default();
        for path in paths {
            self.run_file_into(&path, &mut report)?;
        }
        Ok(report)
    }

    /// Process a single file.
    pub fn run_file(&self, path: &Path) -> Result<Report, BackfillError> {
        let mut report = Report::default();
        self.run_file_into(path, &mut report)?;
        Ok(report)
    }

    fn run_file_into(&self, path: &Path, report: &mut Report) -> Result<(), BackfillError> {
        let io_err = |source| BackfillError::Io {
            path: path.to_path_buf(),
            source,
        };
        let text = std::fs::read_to_string(path).map_err(io_err)?;

        if has_frontmatter(&text) {
            tracing::debug!(path = %path.display(), "Frontmatter present, skipping");
            report.skipped.push(path.to_path_buf());
            return Ok(());
        }

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let slug = self.rules.filename_to_slug(&filename);
        let placement = self.tiers.classify(&slug);
        let title = first_heading(&text).map_or_else(|| title_from_stem(path), str::to_owned);

        if self.mode == Mode::Apply {
            let mut updated = frontmatter_block(&title, placement);
            updated.push_str(&text);
            std::fs::write(path, updated).map_err(io_err)?;
            tracing::info!(path = %path.display(), slug = %slug, "Frontmatter added");
        }

        report.changed.push(Change {
            path: path.to_path_buf(),
            slug,
            title,
            placement,
        });
        Ok(())
    }
}

/// Rendered frontmatter block, followed by a blank line.
pub fn frontmatter_block(title: &str, placement: Placement) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{MARKER}");
    let _ = writeln!(out, "title: \"{}\"", escape_yaml(title));
    let _ = writeln!(out, "tier: {}", placement.tier);
    let _ = writeln!(out, "order: {}", placement.order);
    out.push_str("private: false\n");
    if placement.tier == 1 {
        out.push_str("description: \"TODO: Add description\"\n");
    }
    let _ = writeln!(out, "{MARKER}");
    out.push('\n');
    out
}

fn title_from_stem(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    title_case(&stem.replace(['_', '-'], " "))
}

fn escape_yaml(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
