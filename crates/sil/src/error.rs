//! CLI error types.

use sil_config::ConfigError;
use sil_content::backfill::BackfillError;
use sil_sync::SyncError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Sync(#[from] SyncError),

    #[error("{0}")]
    Backfill(#[from] BackfillError),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Validation(String),
}
