// ABOUTME: Error types for the slideshot application
// ABOUTME: Provides structured error handling for each stage of a conversion job

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlideError {
    #[error("LibreOffice not found: {0}")]
    EngineNotFound(String),

    #[error("Input file not found: {0:?}")]
    InputNotFound(PathBuf),

    #[error("{message}: {source}")]
    FileHandling {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("LibreOffice conversion failed ({status}): {output}")]
    ConversionFailed { status: String, output: String },

    #[error("LibreOffice conversion timed out after {timeout:?}")]
    ConversionTimeout { timeout: Duration },

    #[error("Failed to launch LibreOffice at {path:?}: {source}")]
    EngineLaunch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The job failed and removing its temporary directory failed as well.
    #[error("{primary} (cleanup also failed: {cleanup})")]
    CleanupAfterFailure {
        #[source]
        primary: Box<SlideError>,
        cleanup: Box<SlideError>,
    },
}

impl SlideError {
    /// Build a `FileHandling` error from an I/O error and a short description.
    pub fn file_handling(message: impl Into<String>, source: std::io::Error) -> Self {
        SlideError::FileHandling {
            message: message.into(),
            source,
        }
    }

    /// The first failure that happened during the job.
    pub fn primary(&self) -> &SlideError {
        match self {
            SlideError::CleanupAfterFailure { primary, .. } => primary,
            other => other,
        }
    }

    /// The cleanup failure that followed the primary one, if any.
    pub fn cleanup_error(&self) -> Option<&SlideError> {
        match self {
            SlideError::CleanupAfterFailure { cleanup, .. } => Some(cleanup),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SlideError>;
