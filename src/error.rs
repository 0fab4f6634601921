//! Error types for the fallible edges of the crate
//!
//! The simulation step itself never fails; these cover settings/profile files
//! and shop purchases.

use std::path::PathBuf;

use crate::profile::UpgradeId;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Upgrade {0:?} is already at max level")]
    UpgradeMaxed(UpgradeId),

    #[error("Not enough coins: need {needed}, have {available}")]
    InsufficientCoins { needed: u64, available: u64 },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
