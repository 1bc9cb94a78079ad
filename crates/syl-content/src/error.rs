//! Loader error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a course load.
///
/// Only the top-level manifest can fail a load; deeper missing or unreadable
/// files degrade to empty content.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The course manifest does not exist.
    #[error("Course manifest not found: {}", path.display())]
    ManifestMissing { path: PathBuf },

    /// The course manifest is not valid JSON.
    #[error("Course manifest {} is not valid JSON: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The course manifest parsed, but is not a JSON object.
    #[error("Course manifest {} must be a JSON object", path.display())]
    ManifestShape { path: PathBuf },

    /// No override, manifest id, or directory name to use as the course id.
    #[error("Cannot derive a course id for {}", path.display())]
    NoCourseId { path: PathBuf },

    /// The course manifest exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
