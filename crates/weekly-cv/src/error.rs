//! Typed failures that abort a run

use std::path::PathBuf;
use thiserror::Error;

/// The reference directory cannot be used at all. Problems with individual
/// files inside it are logged and skipped instead.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reference directory does not exist: {0:?}")]
    MissingDirectory(PathBuf),

    #[error("reference path is not a directory: {0:?}")]
    NotADirectory(PathBuf),

    #[error("failed to read reference directory {path:?}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
