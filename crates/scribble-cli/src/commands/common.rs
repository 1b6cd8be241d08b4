use std::path::Path;

use scribble_core::RichNote;

use crate::error::CliError;

pub fn load_note(path: &Path) -> Result<RichNote, CliError> {
    if !path.exists() {
        return Err(CliError::NoteNotFound(path.display().to_string()));
    }
    Ok(RichNote::load_from_path(path)?)
}

/// Load `path`, or start a fresh note titled `title` when it does not exist yet.
pub fn load_or_create_note(path: &Path, title: Option<&str>) -> Result<RichNote, CliError> {
    if path.exists() {
        return Ok(RichNote::load_from_path(path)?);
    }
    tracing::debug!(path = %path.display(), "Starting new note");
    Ok(RichNote::new(title.unwrap_or_default()))
}

pub fn load_notes(paths: &[impl AsRef<Path>]) -> Result<Vec<RichNote>, CliError> {
    paths.iter().map(|path| load_note(path.as_ref())).collect()
}
