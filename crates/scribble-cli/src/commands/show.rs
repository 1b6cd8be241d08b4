use std::path::Path;

use scribble_core::export::styled_text_to_markdown;
use scribble_core::RichNote;

use crate::commands::common::load_note;
use crate::error::CliError;

pub fn run_show(note_path: &Path, markdown: bool) -> Result<(), CliError> {
    let note = load_note(note_path)?;
    println!("{}", render_note(&note, markdown));
    Ok(())
}

pub fn render_note(note: &RichNote, markdown: bool) -> String {
    let (title, content) = if markdown {
        (
            styled_text_to_markdown(&note.title),
            styled_text_to_markdown(&note.content),
        )
    } else {
        (
            note.title.text().to_string(),
            note.content.text().to_string(),
        )
    };

    if title.trim().is_empty() {
        content
    } else if markdown {
        format!("# {title}\n\n{content}")
    } else {
        format!("{title}\n\n{content}")
    }
}
