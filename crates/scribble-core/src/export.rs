//! Note export helpers shared by every Scribble host.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::rich_text::{BulletListType, SpanKind, StyledText};
use crate::RichNote;

/// Export output format shared by all clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Serializable note representation used in JSON exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNote {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub tags: Vec<String>,
}

/// Convert a note into an export record with stable tag ordering.
#[must_use]
pub fn note_to_export_item(note: &RichNote) -> ExportNote {
    let mut tags = note.tags();
    tags.sort();

    ExportNote {
        id: note.id.to_string(),
        title: note.title.text().to_string(),
        content: note.content.text().to_string(),
        created_at: note.created_at,
        updated_at: note.updated_at,
        tags,
    }
}

/// Render notes as pretty-printed JSON.
pub fn render_json_export(notes: &[RichNote]) -> serde_json::Result<String> {
    let items = notes
        .iter()
        .map(note_to_export_item)
        .collect::<Vec<ExportNote>>();
    serde_json::to_string_pretty(&items)
}

/// Render notes in Markdown with frontmatter blocks.
#[must_use]
pub fn render_markdown_export(notes: &[RichNote]) -> String {
    let mut output = String::new();

    for (index, note) in notes.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let export_note = note_to_export_item(note);
        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", export_note.id);
        let _ = writeln!(output, "created_at: {}", export_note.created_at);
        let _ = writeln!(output, "updated_at: {}", export_note.updated_at);
        let _ = writeln!(output, "tags:");
        for tag in export_note.tags {
            let _ = writeln!(output, "  - {tag}");
        }
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        if !note.title.text().trim().is_empty() {
            let _ = writeln!(output, "# {}", styled_text_to_markdown(&note.title));
            let _ = writeln!(output);
        }
        output.push_str(&styled_text_to_markdown(&note.content));
        output.push('\n');
    }

    output
}

/// Render notes based on selected export format.
pub fn render_notes_export(notes: &[RichNote], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(notes),
        ExportFormat::Markdown => Ok(render_markdown_export(notes)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("scribble-export-{timestamp_ms}.{}", format.extension())
}

/// Markdown delimiters, in nesting order. Colors have no Markdown form.
const MARKERS: [(SpanKind, &str, &str); 4] = [
    (SpanKind::Bold, "**", "**"),
    (SpanKind::Italic, "_", "_"),
    (SpanKind::Strikethrough, "~~", "~~"),
    (SpanKind::Underline, "<u>", "</u>"),
];

/// Render styled text as Markdown.
///
/// Bullet glyphs become `- ` list markers. Style markers are closed at the
/// end of each paragraph and reopened on the next one.
#[must_use]
pub fn styled_text_to_markdown(text: &StyledText) -> String {
    let chars: Vec<char> = text.text().chars().collect();
    let mut output = String::with_capacity(text.text().len());
    let mut open: Vec<usize> = Vec::new();
    let mut paragraph_start = true;
    let mut position = 0;

    while position < chars.len() {
        if paragraph_start {
            paragraph_start = false;
            if let Some(bullet) = BulletListType::detect(text, position) {
                output.push_str("- ");
                position += bullet.glyph_len();
                continue;
            }
        }

        let ch = chars[position];
        if ch == '\n' {
            close_markers(&mut output, &mut open, 0);
            output.push('\n');
            paragraph_start = true;
            position += 1;
            continue;
        }

        let active: Vec<usize> = MARKERS
            .iter()
            .enumerate()
            .filter(|(_, (kind, _, _))| {
                text.spans().iter().any(|span| {
                    span.kind() == *kind && span.start <= position && position < span.end
                })
            })
            .map(|(index, _)| index)
            .collect();

        let keep = open
            .iter()
            .take_while(|index| active.contains(index))
            .count();
        close_markers(&mut output, &mut open, keep);
        for index in active {
            if !open.contains(&index) {
                output.push_str(MARKERS[index].1);
                open.push(index);
            }
        }

        output.push(ch);
        position += 1;
    }

    close_markers(&mut output, &mut open, 0);
    output
}

fn close_markers(output: &mut String, open: &mut Vec<usize>, keep: usize) {
    while open.len() > keep {
        if let Some(index) = open.pop() {
            output.push_str(MARKERS[index].2);
        }
    }
}
