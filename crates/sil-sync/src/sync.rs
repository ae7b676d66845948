//! Copy public upstream documents into the website docs tree.
//!
//! Only manifest entries marked public are copied. Internal entries are
//! never copied; finding one in the destination is a violation that
//! [`Mode::Clean`] removes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SyncError;
use crate::manifest::{Manifest, ManifestEntry};

/// Extra website files tolerated over the manifest's public count.
pub const STATS_TOLERANCE: usize = 5;

/// What a run does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Copy public entries, then check for internal files.
    #[default]
    Sync,
    /// Only check for internal files.
    Validate,
    /// Delete internal files found in the destination.
    Clean,
}

/// Paths and switches for a run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Upstream docs directory that manifest paths are relative to.
    pub upstream_docs: PathBuf,
    /// Website docs directory.
    pub dest: PathBuf,
    /// Report without touching the destination.
    pub dry_run: bool,
}

/// Manifest counts against what the destination holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsCheck {
    pub expected_public: usize,
    pub expected_internal: usize,
    /// Markdown files in the destination.
    pub actual: usize,
}

impl StatsCheck {
    /// Whether the destination holds noticeably more files than expected.
    pub fn exceeds_tolerance(&self) -> bool {
        self.actual > self.expected_public + STATS_TOLERANCE
    }
}

/// Outcome of a run. Paths are relative to the docs roots.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Files copied (or that would be copied on a dry run).
    pub synced_files: Vec<PathBuf>,
    /// Directory entries processed.
    pub synced_dirs: usize,
    /// Entries flagged for removal.
    pub skipped: usize,
    /// Public entries absent upstream.
    pub missing: Vec<PathBuf>,
    /// Internal entries present in the destination.
    pub violations: Vec<PathBuf>,
    /// Internal entries deleted (or that would be on a dry run).
    pub removed: Vec<PathBuf>,
    pub stats: Option<StatsCheck>,
}

impl SyncReport {
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Runs the manifest against the upstream and website trees.
pub struct Syncer<'a> {
    manifest: &'a Manifest,
    options: SyncOptions,
}

impl<'a> Syncer<'a> {
    pub fn new(manifest: &'a Manifest, options: SyncOptions) -> Self {
        Self { manifest, options }
    }

    pub fn run(&self, mode: Mode) -> Result<SyncReport, SyncError> {
        if !self.options.upstream_docs.is_dir() {
            return Err(SyncError::UpstreamNotFound(self.options.upstream_docs.clone()));
        }

        let mut report = SyncReport {
            skipped: self.manifest.files.iter().filter(|e| e.flagged_for_removal).count(),
            ..SyncReport::default()
        };

        match mode {
            Mode::Clean => self.clean(&mut report)?,
            Mode::Validate => self.find_violations(&mut report),
            Mode::Sync => {
                self.sync_public(&mut report)?;
                self.find_violations(&mut report);
                report.stats = Some(self.check_stats()?);
            }
        }

        tracing::info!(
            ?mode,
            dry_run = self.options.dry_run,
            files = report.synced_files.len(),
            dirs = report.synced_dirs,
            missing = report.missing.len(),
            violations = report.violations.len(),
            removed = report.removed.len(),
            "Sync finished"
        );
        Ok(report)
    }

    fn sync_public(&self, report: &mut SyncReport) -> Result<(), SyncError> {
        let (dirs, files): (Vec<&ManifestEntry>, Vec<&ManifestEntry>) =
            self.manifest.public().partition(|entry| entry.is_dir());

        for entry in dirs {
            self.sync_dir(entry, report)?;
        }
        for entry in files {
            self.sync_file(Path::new(entry.relative_path()), report)?;
        }
        Ok(())
    }

    fn sync_dir(&self, entry: &ManifestEntry, report: &mut SyncReport) -> Result<(), SyncError> {
        let rel = Path::new(entry.relative_path());
        let source_dir = self.options.upstream_docs.join(rel);
        if !source_dir.is_dir() {
            tracing::warn!(path = %source_dir.display(), "Source directory not found");
            report.missing.push(rel.to_path_buf());
            return Ok(());
        }

        let pattern = format!(
            "{}/**/{}",
            glob::Pattern::escape(&source_dir.to_string_lossy()),
            entry.pattern
        );
        let mut sources: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();
        sources.sort();

        for source in sources {
            let Ok(inner) = source.strip_prefix(&source_dir) else {
                continue;
            };
            let rel_file = rel.join(inner);
            if self.is_internal(&rel_file) {
                tracing::debug!(path = %rel_file.display(), "Internal file below public directory, skipping");
                continue;
            }
            self.copy(&source, &rel_file)?;
            report.synced_files.push(rel_file);
        }
        report.synced_dirs += 1;
        Ok(())
    }

    fn sync_file(&self, rel: &Path, report: &mut SyncReport) -> Result<(), SyncError> {
        if self.is_internal(rel) {
            tracing::warn!(path = %rel.display(), "Entry listed as both public and internal, skipping");
            return Ok(());
        }
        let source = self.options.upstream_docs.join(rel);
        if !source.is_file() {
            tracing::warn!(path = %rel.display(), "Missing upstream file");
            report.missing.push(rel.to_path_buf());
            return Ok(());
        }
        self.copy(&source, rel)?;
        report.synced_files.push(rel.to_path_buf());
        Ok(())
    }

    /// Whether `rel` is an internal file or lies below an internal directory.
    fn is_internal(&self, rel: &Path) -> bool {
        self.manifest
            .internal()
            .any(|entry| rel.starts_with(entry.relative_path()))
    }

    fn copy(&self, source: &Path, rel: &Path) -> Result<(), SyncError> {
        let dest = self.options.dest.join(rel);
        if self.options.dry_run {
            tracing::debug!(path = %rel.display(), "Would copy");
            return Ok(());
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
        }
        fs::copy(source, &dest).map_err(|e| io_error(&dest, e))?;
        tracing::debug!(path = %rel.display(), "Copied");
        Ok(())
    }

    fn find_violations(&self, report: &mut SyncReport) {
        for entry in self.manifest.internal() {
            let rel = Path::new(entry.relative_path());
            if self.options.dest.join(rel).exists() {
                tracing::warn!(path = %rel.display(), "Internal file present in website");
                report.violations.push(rel.to_path_buf());
            }
        }
    }

    fn clean(&self, report: &mut SyncReport) -> Result<(), SyncError> {
        for entry in self.manifest.internal() {
            let rel = Path::new(entry.relative_path());
            let target = self.options.dest.join(rel);
            if !target.exists() {
                continue;
            }
            if !self.options.dry_run {
                let removed = if target.is_dir() {
                    fs::remove_dir_all(&target)
                } else {
                    fs::remove_file(&target)
                };
                removed.map_err(|e| io_error(&target, e))?;
                tracing::info!(path = %rel.display(), "Removed internal file");
            }
            report.removed.push(rel.to_path_buf());
        }
        Ok(())
    }

    fn check_stats(&self) -> Result<StatsCheck, SyncError> {
        let check = StatsCheck {
            expected_public: self.manifest.stats.public_files,
            expected_internal: self.manifest.stats.internal_files,
            actual: count_markdown(&self.options.dest)?,
        };
        if check.exceeds_tolerance() {
            tracing::warn!(
                expected = check.expected_public,
                actual = check.actual,
                "More files in website than the manifest expects"
            );
        }
        Ok(check)
    }
}

/// Markdown files below a directory, recursively.
pub fn count_markdown(dir: &Path) -> Result<usize, SyncError> {
    if !dir.is_dir() {
        return Ok(0);
    }
    let pattern = format!("{}/**/*.md", glob::Pattern::escape(&dir.to_string_lossy()));
    Ok(glob::glob(&pattern)?.filter_map(Result::ok).filter(|p| p.is_file()).count())
}

fn io_error(path: &Path, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.to_path_buf(),
        source,
    }
}
