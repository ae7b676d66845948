//! Application state.

use std::path::PathBuf;

use sil_content::ProjectCatalog;
use sil_site::Site;

use crate::SiteInfo;

/// Shared application state.
pub(crate) struct AppState {
    /// Content library and renderer.
    pub site: Site,
    /// Projects shown on `/projects`.
    pub projects: ProjectCatalog,
    pub info: SiteInfo,
    /// Directory served under `/static`, also holding `llms.txt`.
    pub static_dir: PathBuf,
    /// Application version for ETag generation.
    pub version: String,
}
