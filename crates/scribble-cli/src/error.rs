use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] scribble_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Note not found: {0} (pass --create to start a new note)")]
    NoteNotFound(String),
    #[error("Edit script contains no commands: {0}")]
    EmptyScript(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
