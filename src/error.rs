//! Error types for the photo mode engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or driving a capture session
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The render callback failed while populating a panel
    #[error("Capture of panel {index} failed: {source}")]
    CaptureFailed {
        index: u32,
        #[source]
        source: anyhow::Error,
    },

    /// The live sketch failed to draw a frame
    #[error("Sketch draw failed: {0}")]
    DrawFailed(#[source] anyhow::Error),

    /// An offscreen surface could not be allocated
    #[error("Surface allocation failed: {0}")]
    SurfaceError(String),
}

impl Error {
    /// Index of the panel whose capture failed, if this is a capture error.
    pub fn failed_panel(&self) -> Option<u32> {
        match self {
            Error::CaptureFailed { index, .. } => Some(*index),
            _ => None,
        }
    }
}
