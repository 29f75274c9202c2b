use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::browser::RenderError;

/// Run-level error type.
/// Every variant is fatal: `main` logs it and exits with status 1.
/// Browser launch failures are not represented here; they degrade to a skipped run.
#[derive(Debug, Error)]
pub enum JobError {
    #[error(
        "Rendered output directory not found: {}. Ensure the site build completed successfully.",
        .0.display()
    )]
    MissingRenderedOutput(PathBuf),

    #[error("Filesystem error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Static server error: {0}")]
    Server(String),

    #[error("Failed to export '{variant}': {source}")]
    Export {
        variant: String,
        #[source]
        source: RenderError,
    },
}

impl JobError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        JobError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
