use pretty_assertions::assert_eq;
use scribble_core::script::parse_script;
use scribble_core::{BulletListType, EditorSettings, RichNote, SpanKind, SpanType};

use crate::cli::{BulletStyle, CompletionShell, ConfigCommands, ExportFormat, NoteField};
use crate::commands::completions::{render_completions, run_completions};
use crate::commands::config::run_config;
use crate::commands::edit::{apply_script, run_edit, EditOptions};
use crate::commands::export::{resolve_export_path, run_export};
use crate::commands::show::render_note;
use crate::commands::waveform::render_bars;
use crate::config_store::load_settings;
use crate::error::CliError;

fn options(create: bool) -> EditOptions {
    EditOptions {
        field: NoteField::Content,
        create,
        title: Some("Groceries".to_string()),
        json: false,
    }
}

#[test]
fn apply_script_updates_selected_field() {
    let mut note = RichNote::new("Title");
    let lines = parse_script(concat!(
        "{\"op\":\"type\",\"text\":\"Hello world\"}\n",
        "{\"op\":\"select\",\"start\":0,\"end\":5}\n",
        "{\"op\":\"add_span\",\"style\":{\"type\":\"bold\"}}\n",
    ))
    .unwrap();

    let report = apply_script(
        &mut note,
        NoteField::Content,
        &lines,
        &EditorSettings::default(),
        1_000,
    );

    assert!(report.changed);
    assert_eq!(report.field, "content");
    assert_eq!(note.title.text(), "Title");
    assert_eq!(note.content.text(), "Hello world");
    assert!(note.content.has_span(0, 5, SpanKind::Bold));
    assert_eq!(
        note.content.spans()[0].font_family.as_deref(),
        Some("system-ui")
    );
}

#[test]
fn apply_script_without_net_change_leaves_note_untouched() {
    let mut note = RichNote::new("Title");
    let updated_at = note.updated_at;
    let lines = parse_script(concat!(
        "{\"op\":\"type\",\"text\":\"x\"}\n",
        "{\"op\":\"undo\"}\n",
    ))
    .unwrap();

    let report = apply_script(
        &mut note,
        NoteField::Title,
        &lines,
        &EditorSettings::default(),
        0,
    );

    assert!(!report.changed);
    assert_eq!(report.redo_steps, 1);
    assert_eq!(note.title.text(), "Title");
    assert_eq!(note.updated_at, updated_at);
}

#[test]
fn run_edit_creates_missing_note() {
    let dir = tempfile::tempdir().unwrap();
    let note_path = dir.path().join("groceries.json");
    let script_path = dir.path().join("edit.jsonl");
    std::fs::write(
        &script_path,
        "# list\n{\"op\":\"add_bullet\"}\n{\"op\":\"type\",\"text\":\"milk\"}\n",
    )
    .unwrap();

    run_edit(
        &note_path,
        &script_path,
        &options(true),
        &EditorSettings::default(),
    )
    .unwrap();

    let note = RichNote::load_from_path(&note_path).unwrap();
    assert_eq!(note.title.text(), "Groceries");
    assert_eq!(
        note.content.text(),
        format!("{}milk", BulletListType::Dots.glyph())
    );
}

#[test]
fn run_edit_requires_existing_note_without_create() {
    let dir = tempfile::tempdir().unwrap();
    let script_path = dir.path().join("edit.jsonl");
    std::fs::write(&script_path, "{\"op\":\"undo\"}\n").unwrap();

    let result = run_edit(
        &dir.path().join("missing.json"),
        &script_path,
        &options(false),
        &EditorSettings::default(),
    );
    assert!(matches!(result, Err(CliError::NoteNotFound(_))));
}

#[test]
fn run_edit_rejects_empty_script() {
    let dir = tempfile::tempdir().unwrap();
    let script_path = dir.path().join("edit.jsonl");
    std::fs::write(&script_path, "# nothing here\n\n").unwrap();

    let result = run_edit(
        &dir.path().join("note.json"),
        &script_path,
        &options(true),
        &EditorSettings::default(),
    );
    assert!(matches!(result, Err(CliError::EmptyScript(_))));
}

#[test]
fn run_export_writes_markdown_file() {
    let dir = tempfile::tempdir().unwrap();
    let note_path = dir.path().join("note.json");
    let output_path = dir.path().join("export.md");

    let mut note = RichNote::new("Weekend");
    note.content = scribble_core::StyledText::new("Hike #outdoors");
    note.save_to_path(&note_path).unwrap();

    run_export(&[note_path], ExportFormat::Markdown, Some(&output_path)).unwrap();

    let rendered = std::fs::read_to_string(output_path).unwrap();
    assert!(rendered.contains("tags:\n  - outdoors"));
    assert!(rendered.contains("# Weekend\n\nHike #outdoors"));
}

#[test]
fn run_export_into_directory_uses_suggested_name() {
    let dir = tempfile::tempdir().unwrap();
    let note_path = dir.path().join("note.json");
    RichNote::new("Inbox").save_to_path(&note_path).unwrap();

    let export_dir = dir.path().join("exports");
    std::fs::create_dir(&export_dir).unwrap();
    assert_eq!(
        resolve_export_path(&export_dir, ExportFormat::Json, 42),
        export_dir.join("scribble-export-42.json")
    );
    assert_eq!(
        resolve_export_path(&note_path, ExportFormat::Json, 42),
        note_path
    );

    run_export(&[note_path], ExportFormat::Json, Some(&export_dir)).unwrap();
    let written: Vec<_> = std::fs::read_dir(&export_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(written.len(), 1);
    assert!(written[0].starts_with("scribble-export-"));
    assert!(written[0].ends_with(".json"));
}

#[test]
fn run_edit_skips_saving_new_note_without_content() {
    let dir = tempfile::tempdir().unwrap();
    let note_path = dir.path().join("blank.json");
    let script_path = dir.path().join("edit.jsonl");
    std::fs::write(
        &script_path,
        "{\"op\":\"type\",\"text\":\"x\"}\n{\"op\":\"undo\"}\n",
    )
    .unwrap();

    let options = EditOptions {
        field: NoteField::Content,
        create: true,
        title: None,
        json: false,
    };
    run_edit(&note_path, &script_path, &options, &EditorSettings::default()).unwrap();
    assert!(!note_path.exists());
}

#[test]
fn render_note_plain_and_markdown() {
    let mut note = RichNote::new("");
    note.content = scribble_core::StyledText::with_spans(
        "bold",
        vec![scribble_core::Span::new(0, 4, SpanType::Bold)],
    );
    assert_eq!(render_note(&note, false), "bold");
    assert_eq!(render_note(&note, true), "**bold**");

    note.title = "Day one".into();
    assert_eq!(render_note(&note, true), "# Day one\n\n**bold**");
}

#[test]
fn config_init_updates_only_given_values() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("settings.json");

    run_config(
        ConfigCommands::Init {
            font_family: Some("serif".to_string()),
            history_limit: None,
            coalesce_window_ms: Some(500),
            default_bullet: Some(BulletStyle::Check),
        },
        &config_path,
    )
    .unwrap();

    let settings = load_settings(&config_path).unwrap();
    assert_eq!(settings.font_family, "serif");
    assert_eq!(settings.history_limit, 20);
    assert_eq!(settings.coalesce_window_ms, 500);
    assert_eq!(settings.default_bullet, BulletListType::Check);
}

#[test]
fn render_bars_maps_peaks_to_levels() {
    assert_eq!(render_bars(&[0.0, 0.5, 1.0, 2.0, -1.0]), "▁▅██▁");
    assert_eq!(render_bars(&[]), "");
}

#[test]
fn completions_use_binary_name() {
    let script = String::from_utf8(render_completions(CompletionShell::Bash)).unwrap();
    assert!(script.contains("scribble"));

    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("scribble.fish");
    run_completions(CompletionShell::Fish, Some(&output_path)).unwrap();
    assert!(std::fs::read_to_string(output_path)
        .unwrap()
        .contains("scribble"));
}
