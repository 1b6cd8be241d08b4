//! Bullet list paragraphs.
//!
//! A bullet is not structural markup: it is a literal glyph prefix at the
//! start of a paragraph. Every glyph ends with [`BULLET_PLACEHOLDER`], the
//! character a backspace removes first when the caret sits right after it.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::styled_text::StyledText;

/// Trailing character of every bullet glyph (a non-breaking space).
pub const BULLET_PLACEHOLDER: char = '\u{00A0}';

/// Bullet glyph styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletListType {
    #[default]
    Dots,
    Circle,
    Square,
    Dash,
    Arrow,
    Check,
    Star,
}

impl BulletListType {
    pub const ALL: [Self; 7] = [
        Self::Dots,
        Self::Circle,
        Self::Square,
        Self::Dash,
        Self::Arrow,
        Self::Check,
        Self::Star,
    ];

    /// Prefix inserted at the start of a bulleted paragraph.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Dots => "\u{25CF}\u{00A0}\u{00A0}",
            Self::Circle => "\u{25CB}\u{00A0}\u{00A0}",
            Self::Square => "\u{25A0}\u{00A0}\u{00A0}",
            Self::Dash => "\u{2013}\u{00A0}\u{00A0}",
            Self::Arrow => "\u{27A4}\u{00A0}\u{00A0}",
            Self::Check => "\u{2713}\u{00A0}\u{00A0}",
            Self::Star => "\u{2605}\u{00A0}\u{00A0}",
        }
    }

    /// Glyph length in characters.
    #[must_use]
    pub fn glyph_len(self) -> usize {
        self.glyph().chars().count()
    }

    /// Bullet prefixing the paragraph that starts at `paragraph_start`.
    #[must_use]
    pub fn detect(text: &StyledText, paragraph_start: usize) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|bullet| text.contains_at(paragraph_start, bullet.glyph()))
    }
}

/// Character ranges occupied by bullet glyphs, in text order.
#[must_use]
pub fn bullet_ranges(text: &StyledText) -> Vec<Range<usize>> {
    text.paragraph_starts()
        .filter_map(|start| {
            BulletListType::detect(text, start).map(|bullet| start..start + bullet.glyph_len())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_end_with_placeholder() {
        for bullet in BulletListType::ALL {
            assert_eq!(bullet.glyph().chars().last(), Some(BULLET_PLACEHOLDER));
            assert_eq!(bullet.glyph_len(), 3);
        }
    }

    #[test]
    fn detect_reads_paragraph_prefix() {
        let text = StyledText::new(format!(
            "{}milk\nplain\n{}eggs",
            BulletListType::Dots.glyph(),
            BulletListType::Star.glyph()
        ));
        assert_eq!(BulletListType::detect(&text, 0), Some(BulletListType::Dots));
        assert_eq!(BulletListType::detect(&text, 8), None);
        assert_eq!(BulletListType::detect(&text, 14), Some(BulletListType::Star));
        assert_eq!(bullet_ranges(&text), vec![0..3, 14..17]);
    }

    #[test]
    fn bullet_names_serialize_in_snake_case() {
        assert_eq!(
            serde_json::to_string(&BulletListType::Check).unwrap(),
            "\"check\""
        );
    }
}
