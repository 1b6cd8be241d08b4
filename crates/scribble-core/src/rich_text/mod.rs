//! Rich text model: styled text, selections, bullet paragraphs and diffs.

mod bullet;
mod diff;
mod selection;
mod span;
mod styled_text;

pub use bullet::{bullet_ranges, BulletListType, BULLET_PLACEHOLDER};
pub use diff::TextDiff;
pub use selection::Selection;
pub use span::{Color, Span, SpanKind, SpanType};
pub use styled_text::StyledText;
