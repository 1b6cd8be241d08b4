use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use scribble_core::BulletListType;

#[derive(Parser)]
#[command(name = "scribble")]
#[command(about = "Edit and export rich-text journal notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the editor settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay an edit script against one field of a note
    Edit {
        /// Note document (JSON)
        note: PathBuf,
        /// Edit script (one JSON command per line)
        #[arg(short, long, value_name = "PATH")]
        script: PathBuf,
        /// Field the script edits
        #[arg(long, value_enum, default_value_t = NoteField::Content)]
        field: NoteField,
        /// Create the note if it does not exist
        #[arg(long)]
        create: bool,
        /// Title for a newly created note
        #[arg(long)]
        title: Option<String>,
        /// Output the resulting field state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a note
    Show {
        /// Note document (JSON)
        note: PathBuf,
        /// Output as Markdown instead of plain text
        #[arg(long)]
        markdown: bool,
    },
    /// Export notes
    Export {
        /// Note documents to export
        #[arg(required = true)]
        notes: Vec<PathBuf>,
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Optional output file or directory (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Render a voice memo waveform
    Waveform {
        /// 16-bit PCM WAV file
        path: PathBuf,
        /// Number of bars
        #[arg(short, long, default_value = "40")]
        bars: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or update editor settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum NoteField {
    Title,
    Content,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl From<ExportFormat> for scribble_core::export::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum BulletStyle {
    Dots,
    Circle,
    Square,
    Dash,
    Arrow,
    Check,
    Star,
}

impl From<BulletStyle> for BulletListType {
    fn from(style: BulletStyle) -> Self {
        match style {
            BulletStyle::Dots => Self::Dots,
            BulletStyle::Circle => Self::Circle,
            BulletStyle::Square => Self::Square,
            BulletStyle::Dash => Self::Dash,
            BulletStyle::Arrow => Self::Arrow,
            BulletStyle::Check => Self::Check,
            BulletStyle::Star => Self::Star,
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved settings file and its values
    Show,
    /// Create or update the settings file
    Init {
        /// Font family applied to bold text
        #[arg(long, value_name = "FAMILY")]
        font_family: Option<String>,
        /// Undo steps kept per field
        #[arg(long, value_name = "N")]
        history_limit: Option<usize>,
        /// Edits closer together than this share one undo step
        #[arg(long, value_name = "MS")]
        coalesce_window_ms: Option<i64>,
        /// Bullet used when a script does not name one
        #[arg(long, value_enum)]
        default_bullet: Option<BulletStyle>,
    },
}
