//! Error types for scribble-core

use thiserror::Error;

/// Result type alias using scribble-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in scribble-core operations
///
/// Editing operations never produce these: positions are clamped instead.
/// Only document I/O, audio decoding and script parsing are fallible.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// WAV decoding error
    #[error("Audio error: {0}")]
    Audio(#[from] hound::Error),

    /// Malformed edit script line
    #[error("Script error on line {line}: {message}")]
    Script { line: usize, message: String },
}
