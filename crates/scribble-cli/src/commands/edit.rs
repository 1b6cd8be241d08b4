use std::path::Path;

use chrono::Utc;
use scribble_core::script::{parse_script, ScriptLine, ScriptRunner};
use scribble_core::{EditorSettings, ManualClock, RichNote, TitleState, TitleValue};
use serde::Serialize;

use crate::cli::NoteField;
use crate::commands::common::{load_note, load_or_create_note};
use crate::error::CliError;

pub struct EditOptions {
    pub field: NoteField,
    pub create: bool,
    pub title: Option<String>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct EditReport {
    pub note_id: String,
    pub field: &'static str,
    pub value: TitleValue,
    pub undo_steps: usize,
    pub redo_steps: usize,
    pub changed: bool,
}

pub fn run_edit(
    note_path: &Path,
    script_path: &Path,
    options: &EditOptions,
    settings: &EditorSettings,
) -> Result<(), CliError> {
    let mut note = if options.create {
        load_or_create_note(note_path, options.title.as_deref())?
    } else {
        load_note(note_path)?
    };

    let raw_script = std::fs::read_to_string(script_path)?;
    let lines = parse_script(&raw_script)?;
    if lines.is_empty() {
        return Err(CliError::EmptyScript(script_path.display().to_string()));
    }

    let report = apply_script(
        &mut note,
        options.field,
        &lines,
        settings,
        Utc::now().timestamp_millis(),
    );
    if report.changed || (!note_path.exists() && !note.is_empty()) {
        note.save_to_path(note_path)?;
    }
    tracing::info!(
        note = %report.note_id,
        field = report.field,
        undo_steps = report.undo_steps,
        changed = report.changed,
        "Applied edit script"
    );

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.value.text.text());
    }

    Ok(())
}

/// Replay `lines` against one field of `note`, starting the clock at `now_ms`.
pub fn apply_script(
    note: &mut RichNote,
    field: NoteField,
    lines: &[ScriptLine],
    settings: &EditorSettings,
    now_ms: i64,
) -> EditReport {
    let clock = ManualClock::new(now_ms);
    let original = field_text(note, field).clone();
    let mut state = TitleState::from_settings(original.clone(), settings, clock.clone());

    ScriptRunner::new(clock)
        .with_default_bullet(settings.default_bullet)
        .run(&mut state, lines);

    let changed = *state.text() != original;
    if changed {
        match field {
            NoteField::Title => note.title = state.text().clone(),
            NoteField::Content => note.content = state.text().clone(),
        }
        note.touch();
    }

    EditReport {
        note_id: note.id.to_string(),
        field: field_name(field),
        value: state.value().clone(),
        undo_steps: state.history().undo_len(),
        redo_steps: state.history().redo_len(),
        changed,
    }
}

const fn field_text(note: &RichNote, field: NoteField) -> &scribble_core::StyledText {
    match field {
        NoteField::Title => &note.title,
        NoteField::Content => &note.content,
    }
}

const fn field_name(field: NoteField) -> &'static str {
    match field {
        NoteField::Title => "title",
        NoteField::Content => "content",
    }
}
