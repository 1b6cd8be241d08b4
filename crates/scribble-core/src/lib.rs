//! scribble-core - Core library for Scribble
//!
//! This crate contains the rich-text model used by the note editor: styled
//! text with span annotations, bullet paragraphs, the per-field
//! [`TitleState`] and its time-coalescing undo/redo history. It also carries
//! the note document model, export helpers and the voice memo waveform
//! downsampler shared by every Scribble host.

pub mod clock;
pub mod error;
pub mod export;
pub mod history;
pub mod models;
pub mod rich_text;
pub mod script;
pub mod title_state;
pub mod util;
pub mod waveform;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use history::{HistoryConfig, HistoryState, UndoRedoManager, UndoRedoOperation};
pub use models::{EditorSettings, NoteId, RichNote};
pub use rich_text::{BulletListType, Color, Selection, Span, SpanKind, SpanType, StyledText};
pub use title_state::{FormattingState, TitleState, TitleValue};
