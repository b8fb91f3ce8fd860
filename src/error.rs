//! Error types for the collaborators behind the player.
//!
//! The player itself never surfaces these: extraction failures become
//! import-progress entries or a missing cover, and sink failures leave the
//! transport stopped.

use thiserror::Error;

/// Metadata extraction errors
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Reading the underlying bytes failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The tag reader rejected the file
    #[error(transparent)]
    Tag(#[from] lofty::error::LoftyError),

    /// The file was readable but its contents made no sense
    #[error("malformed file: {0}")]
    Malformed(String),
}

/// Audio sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    /// The output device could not be opened
    #[error("audio output unavailable: {0}")]
    Output(String),

    /// The source could not be decoded
    #[error("failed to decode {name}: {reason}")]
    Decode { name: String, reason: String },

    /// `play` was requested with nothing loaded
    #[error("no source loaded")]
    NoSource,
}
