//! Text selection ranges.

use serde::{Deserialize, Serialize};

/// A selection inside a text, in character offsets.
///
/// Always normalized so `start <= end`; a collapsed selection is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawSelection")]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

#[derive(Deserialize)]
struct RawSelection {
    start: usize,
    end: usize,
}

impl From<RawSelection> for Selection {
    fn from(raw: RawSelection) -> Self {
        Self::new(raw.start, raw.end)
    }
}

impl Selection {
    #[must_use]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[must_use]
    pub const fn collapsed(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    #[must_use]
    pub const fn is_collapsed(self) -> bool {
        self.start == self.end
    }

    /// Clamp both endpoints into `[0, text_len]`.
    #[must_use]
    pub fn clamp(self, text_len: usize) -> Self {
        Self::new(self.start.min(text_len), self.end.min(text_len))
    }

    /// Apply a position mapping to both endpoints.
    #[must_use]
    pub fn map(self, f: impl Fn(usize) -> usize) -> Self {
        Self::new(f(self.start), f(self.end))
    }
}
