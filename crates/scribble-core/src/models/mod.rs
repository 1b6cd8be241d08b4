//! Data models for Scribble

mod note;
mod settings;

pub use note::{extract_tags, NoteId, RichNote};
pub use settings::EditorSettings;
