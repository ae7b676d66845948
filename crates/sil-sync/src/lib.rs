//! Manifest-driven document sync.
//!
//! The upstream content repository carries a `CONTENT_MANIFEST.yaml` that
//! lists which paths are public. [`Syncer`] copies exactly those into the
//! website's docs tree, reports internal files that leaked into it, and can
//! remove them.

mod error;
mod manifest;
mod sync;

pub use error::SyncError;
pub use manifest::{Manifest, ManifestEntry, ManifestStats, Visibility};
pub use sync::{Mode, STATS_TOLERANCE, StatsCheck, SyncOptions, SyncReport, Syncer, count_markdown};
