//! Error types for playback coordination

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Audio resource could not be opened
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// Audio output rejected a command
    #[error("Audio output error: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
