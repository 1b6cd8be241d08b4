use std::path::{Path, PathBuf};

use chrono::Utc;
use scribble_core::export::{render_notes_export, suggested_export_file_name};

use crate::cli::ExportFormat;
use crate::commands::common::load_notes;
use crate::error::CliError;

pub fn run_export(
    note_paths: &[PathBuf],
    format: ExportFormat,
    output_path: Option<&Path>,
) -> Result<(), CliError> {
    let notes = load_notes(note_paths)?;
    let rendered = render_notes_export(&notes, format.into())?;
    tracing::debug!(notes = notes.len(), ?format, "Rendered export");

    if let Some(path) = output_path {
        let path = resolve_export_path(path, format, Utc::now().timestamp_millis());
        std::fs::write(&path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}

/// A directory gets a timestamped export file; anything else is used as is.
pub fn resolve_export_path(path: &Path, format: ExportFormat, timestamp_ms: i64) -> PathBuf {
    if path.is_dir() {
        path.join(suggested_export_file_name(format.into(), timestamp_ms))
    } else {
        path.to_path_buf()
    }
}
