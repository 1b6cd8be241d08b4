//! Style annotations attached to character ranges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// A 32-bit ARGB color, written as `#AARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Self = Self(0xFF00_0000);

    #[must_use]
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    #[must_use]
    pub const fn argb(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parses `#RRGGBB` (opaque) or `#AARRGGBB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidInput(format!("invalid color '{s}'"));
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        match hex.len() {
            6 => Ok(Self(0xFF00_0000 | value)),
            8 => Ok(Self(value)),
            _ => Err(invalid()),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Style carried by a span.
///
/// Color payloads are optional: `FontColor(None)` means "the kind of span",
/// which is how removal requests and toolbar queries address color spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "color", rename_all = "snake_case")]
pub enum SpanType {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    FontColor(Option<Color>),
    FillColor(Option<Color>),
}

impl SpanType {
    #[must_use]
    pub const fn kind(self) -> SpanKind {
        match self {
            Self::Bold => SpanKind::Bold,
            Self::Italic => SpanKind::Italic,
            Self::Underline => SpanKind::Underline,
            Self::Strikethrough => SpanKind::Strikethrough,
            Self::FontColor(_) => SpanKind::FontColor,
            Self::FillColor(_) => SpanKind::FillColor,
        }
    }

    /// Same kind of span, ignoring any color payload.
    #[must_use]
    pub fn is_same_kind(self, other: Self) -> bool {
        self.kind() == other.kind()
    }
}

/// Span discriminant without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpanKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    FontColor,
    FillColor,
}

/// A style annotation over the half-open character range `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub style: SpanType,
    /// Font family applied to bold text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl Span {
    #[must_use]
    pub fn new(start: usize, end: usize, style: SpanType) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
            style,
            font_family: None,
        }
    }

    #[must_use]
    pub fn with_font_family(mut self, family: Option<String>) -> Self {
        self.font_family = family;
        self
    }

    #[must_use]
    pub const fn kind(&self) -> SpanKind {
        self.style.kind()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether this span touches the query range.
    ///
    /// A non-empty range intersects when the two ranges overlap. A collapsed
    /// range (a caret) intersects when it sits inside or on either edge of a
    /// non-empty span.
    #[must_use]
    pub const fn intersects(&self, start: usize, end: usize) -> bool {
        if start == end {
            !self.is_empty() && self.start <= start && start <= self.end
        } else {
            self.start < end && start < self.end
        }
    }
}
