//! Text with an interval list of style spans.

use serde::{Deserialize, Serialize};

use super::span::{Span, SpanKind, SpanType};

/// A string plus its style annotations.
///
/// Positions are character offsets. Spans are kept sorted by
/// `(start, end)`, every span satisfies `start < end <= char_len`, and
/// spans of different kinds may overlap freely.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawStyledText")]
pub struct StyledText {
    text: String,
    spans: Vec<Span>,
    #[serde(skip)]
    char_len: usize,
}

#[derive(Deserialize)]
struct RawStyledText {
    text: String,
    #[serde(default)]
    spans: Vec<Span>,
}

impl From<RawStyledText> for StyledText {
    fn from(raw: RawStyledText) -> Self {
        Self::with_spans(raw.text, raw.spans)
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl StyledText {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        Self {
            text,
            spans: Vec::new(),
            char_len,
        }
    }

    /// Build styled text, clamping spans into the text and dropping empty ones.
    #[must_use]
    pub fn with_spans(text: impl Into<String>, spans: Vec<Span>) -> Self {
        let mut styled = Self::new(text);
        let len = styled.char_len;
        styled.spans = spans
            .into_iter()
            .map(|mut span| {
                let (start, end) = (span.start.min(span.end), span.start.max(span.end));
                span.start = start.min(len);
                span.end = end.min(len);
                span
            })
            .filter(|span| !span.is_empty())
            .collect();
        styled.sort_spans();
        styled
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    #[must_use]
    pub const fn char_len(&self) -> usize {
        self.char_len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    #[must_use]
    pub fn char_at(&self, position: usize) -> Option<char> {
        self.text.chars().nth(position)
    }

    /// Whether `needle` occurs at character offset `position`.
    #[must_use]
    pub fn contains_at(&self, position: usize, needle: &str) -> bool {
        position <= self.char_len && self.text[self.byte_offset(position)..].starts_with(needle)
    }

    /// Start of the paragraph containing `position`: the offset right after
    /// the last line break strictly before it, or 0.
    #[must_use]
    pub fn paragraph_start(&self, position: usize) -> usize {
        let head = &self.text[..self.byte_offset(position)];
        head.rfind('\n').map_or(0, |byte| head[..=byte].chars().count())
    }

    /// Offsets at which each paragraph begins.
    pub fn paragraph_starts(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(0).chain(
            self.text
                .chars()
                .enumerate()
                .filter(|(_, ch)| *ch == '\n')
                .map(|(index, _)| index + 1),
        )
    }

    /// Insert `inserted` at `position`.
    ///
    /// Spans starting at or after the insertion point move right, spans that
    /// strictly contain it grow, and spans ending at it stay put: text typed
    /// at a span boundary does not inherit that span's style.
    pub fn insert_str(&mut self, position: usize, inserted: &str) {
        let position = position.min(self.char_len);
        let count = inserted.chars().count();
        if count == 0 {
            return;
        }
        let byte = self.byte_offset(position);
        self.text.insert_str(byte, inserted);
        self.char_len += count;

        for span in &mut self.spans {
            if span.start >= position {
                span.start += count;
                span.end += count;
            } else if span.end > position {
                span.end += count;
            }
        }
        tracing::trace!(position, count, "Shifted spans for insertion");
    }

    /// Remove characters in `[start, end)`, clipping spans that overlap it.
    pub fn remove_range(&mut self, start: usize, end: usize) {
        let start = start.min(self.char_len);
        let end = end.clamp(start, self.char_len);
        if start == end {
            return;
        }
        let (from, to) = (self.byte_offset(start), self.byte_offset(end));
        self.text.replace_range(from..to, "");
        self.char_len -= end - start;

        let removed = end - start;
        let map = |position: usize| {
            if position <= start {
                position
            } else if position >= end {
                position - removed
            } else {
                start
            }
        };
        for span in &mut self.spans {
            span.start = map(span.start);
            span.end = map(span.end);
        }
        self.spans.retain(|span| !span.is_empty());
        tracing::trace!(start, end, "Clipped spans for removal");
    }

    /// Replace `[start, end)` with `inserted`.
    pub fn replace_range(&mut self, start: usize, end: usize, inserted: &str) {
        self.remove_range(start, end);
        self.insert_str(start.min(self.char_len), inserted);
    }

    /// Apply `style` over `[start, end)`.
    ///
    /// Existing spans of the same kind are clipped out of the range first, so
    /// same-kind spans never overlap afterwards. Identical spans touching the
    /// range are merged into the new one. Empty ranges are ignored.
    pub fn add_span(
        &mut self,
        start: usize,
        end: usize,
        style: SpanType,
        font_family: Option<String>,
    ) {
        let (start, end) = self.clamp_range(start, end);
        if start == end {
            return;
        }
        self.remove_span(start, end, style.kind());

        let mut added = Span::new(start, end, style).with_font_family(font_family);
        self.spans.retain(|span| {
            let touches = span.end == added.start || span.start == added.end;
            if touches && span.style == added.style && span.font_family == added.font_family {
                added.start = added.start.min(span.start);
                added.end = added.end.max(span.end);
                false
            } else {
                true
            }
        });
        self.spans.push(added);
        self.sort_spans();
    }

    /// Remove `kind` styling from `[start, end)`.
    ///
    /// A span strictly containing the range is split in two, a span
    /// overlapping only the range's tail keeps its head (and vice versa), and
    /// a span covered by the range is dropped.
    pub fn remove_span(&mut self, start: usize, end: usize, kind: SpanKind) {
        let (start, end) = self.clamp_range(start, end);
        if start == end {
            return;
        }

        let mut kept = Vec::with_capacity(self.spans.len() + 1);
        for span in self.spans.drain(..) {
            if span.kind() != kind || span.end <= start || end <= span.start {
                kept.push(span);
                continue;
            }

            if span.start < start && end < span.end {
                let mut tail = span.clone();
                tail.start = end;
                kept.push(Span {
                    end: start,
                    ..span
                });
                kept.push(tail);
            } else if start <= span.start && end < span.end {
                kept.push(Span { start: end, ..span });
            } else if span.start < start && span.end <= end {
                kept.push(Span { end: start, ..span });
            }
        }
        kept.retain(|span| !span.is_empty());
        self.spans = kept;
        self.sort_spans();
    }

    /// Spans touching `[start, end)` (see [`Span::intersects`]).
    pub fn spans_in(&self, start: usize, end: usize) -> impl Iterator<Item = &Span> + '_ {
        let (start, end) = self.clamp_range(start, end);
        self.spans
            .iter()
            .filter(move |span| span.intersects(start, end))
    }

    /// Whether `kind` styling covers all of `[start, end)`.
    ///
    /// For a caret this is true when a span of that kind touches it.
    #[must_use]
    pub fn has_span(&self, start: usize, end: usize, kind: SpanKind) -> bool {
        let (start, end) = self.clamp_range(start, end);
        if start == end {
            return self.has_any_span(start, end, kind);
        }

        let mut covered = start;
        for span in self
            .spans
            .iter()
            .filter(|span| span.kind() == kind && span.intersects(start, end))
        {
            if span.start > covered {
                return false;
            }
            covered = covered.max(span.end);
            if covered >= end {
                return true;
            }
        }
        false
    }

    /// Whether any span of `kind` touches `[start, end)`.
    #[must_use]
    pub fn has_any_span(&self, start: usize, end: usize, kind: SpanKind) -> bool {
        self.spans_in(start, end).any(|span| span.kind() == kind)
    }

    /// Set the font family carried by every span of `kind`.
    pub fn set_font_family(&mut self, kind: SpanKind, family: &str) {
        for span in self.spans.iter_mut().filter(|span| span.kind() == kind) {
            span.font_family = Some(family.to_string());
        }
    }

    fn clamp_range(&self, start: usize, end: usize) -> (usize, usize) {
        let (start, end) = (start.min(end), start.max(end));
        (start.min(self.char_len), end.min(self.char_len))
    }

    fn byte_offset(&self, position: usize) -> usize {
        self.text
            .char_indices()
            .nth(position)
            .map_or(self.text.len(), |(byte, _)| byte)
    }

    fn sort_spans(&mut self) {
        self.spans
            .sort_by(|a, b| (a.start, a.end, a.kind()).cmp(&(b.start, b.end, b.kind())));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::rich_text::Color;

    fn bold(start: usize, end: usize) -> Span {
        Span::new(start, end, SpanType::Bold)
    }

    #[test]
    fn with_spans_clamps_and_drops_empty() {
        let text = StyledText::with_spans(
            "Hello",
            vec![bold(3, 40), bold(2, 2), Span::new(4, 1, SpanType::Italic)],
        );
        assert_eq!(
            text.spans(),
            &[Span::new(1, 4, SpanType::Italic), bold(3, 5)]
        );
    }

    #[test]
    fn multibyte_text_uses_character_offsets() {
        let mut text = StyledText::new("héllo wörld");
        assert_eq!(text.char_len(), 11);
        assert!(text.contains_at(6, "wörld"));
        text.insert_str(1, "→");
        assert_eq!(text.text(), "h→éllo wörld");
        text.remove_range(0, 2);
        assert_eq!(text.text(), "éllo wörld");
    }

    #[test]
    fn paragraph_start_finds_previous_line_break() {
        let text = StyledText::new("one\ntwo\nthree");
        assert_eq!(text.paragraph_start(0), 0);
        assert_eq!(text.paragraph_start(3), 0);
        assert_eq!(text.paragraph_start(4), 4);
        assert_eq!(text.paragraph_start(6), 4);
        assert_eq!(text.paragraph_start(13), 8);
        assert_eq!(text.paragraph_starts().collect::<Vec<_>>(), vec![0, 4, 8]);
    }

    #[test]
    fn insertion_inside_span_extends_it() {
        let mut text = StyledText::with_spans("Hello", vec![bold(0, 5)]);
        text.insert_str(2, "xx");
        assert_eq!(text.spans(), &[bold(0, 7)]);
    }

    #[test]
    fn insertion_at_span_edges_does_not_inherit_style() {
        let mut text = StyledText::with_spans("Hello", vec![bold(1, 4)]);
        text.insert_str(4, "!");
        assert_eq!(text.spans(), &[bold(1, 4)]);
        text.insert_str(1, "?");
        assert_eq!(text.spans(), &[bold(2, 5)]);
    }

    #[test]
    fn removal_clips_and_drops_spans() {
        let mut text = StyledText::with_spans(
            "abcdefghij",
            vec![bold(0, 4), Span::new(3, 5, SpanType::Italic), bold(6, 9)],
        );
        text.remove_range(2, 7);
        assert_eq!(text.text(), "abhij");
        assert_eq!(text.spans(), &[bold(0, 2), bold(2, 4)]);
    }

    #[test]
    fn remove_span_splits_span_containing_range() {
        let mut text = StyledText::with_spans("abcdefghij", vec![bold(0, 10)]);
        text.remove_span(3, 6, SpanKind::Bold);
        assert_eq!(text.spans(), &[bold(0, 3), bold(6, 10)]);
    }

    #[test]
    fn remove_span_shrinks_overlapping_edges() {
        let mut text = StyledText::with_spans("abcdefghij", vec![bold(0, 4), bold(6, 10)]);
        text.remove_span(2, 8, SpanKind::Bold);
        assert_eq!(text.spans(), &[bold(0, 2), bold(8, 10)]);
    }

    #[test]
    fn remove_span_deletes_covered_spans_and_spares_other_kinds() {
        let italic = Span::new(2, 4, SpanType::Italic);
        let mut text = StyledText::with_spans("abcdefghij", vec![bold(2, 4), italic.clone()]);
        text.remove_span(1, 5, SpanKind::Bold);
        assert_eq!(text.spans(), &[italic]);
    }

    #[test]
    fn add_span_never_overlaps_same_kind() {
        let mut text = StyledText::with_spans("abcdefghij", vec![bold(0, 4), bold(6, 9)]);
        text.add_span(3, 7, SpanType::Bold, None);
        assert_eq!(text.spans(), &[bold(0, 9)]);
    }

    #[test]
    fn add_span_keeps_touching_spans_with_other_fonts_apart() {
        let serif = bold(0, 3).with_font_family(Some("serif".to_string()));
        let mut text = StyledText::with_spans("abcdefghij", vec![serif]);
        text.add_span(3, 6, SpanType::Bold, Some("serif".to_string()));
        assert_eq!(
            text.spans(),
            &[bold(0, 6).with_font_family(Some("serif".to_string()))]
        );

        text.add_span(6, 8, SpanType::Bold, None);
        assert_eq!(
            text.spans(),
            &[
                bold(0, 6).with_font_family(Some("serif".to_string())),
                bold(6, 8)
            ]
        );
        for pair in text.spans().windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn add_span_replaces_color_of_same_kind() {
        let red = SpanType::FontColor(Some(Color::from_argb(0xFFFF_0000)));
        let blue = SpanType::FontColor(Some(Color::from_argb(0xFF00_00FF)));
        let mut text = StyledText::new("colorful");
        text.add_span(0, 8, red, None);
        text.add_span(0, 8, blue, None);
        assert_eq!(text.spans(), &[Span::new(0, 8, blue)]);
    }

    #[test]
    fn has_span_requires_full_coverage() {
        let text = StyledText::with_spans("abcdefghij", vec![bold(0, 3), bold(3, 6)]);
        assert!(text.has_span(0, 6, SpanKind::Bold));
        assert!(!text.has_span(0, 7, SpanKind::Bold));
        assert!(text.has_span(6, 6, SpanKind::Bold));
        assert!(!text.has_span(8, 8, SpanKind::Bold));
        assert!(!text.has_span(0, 6, SpanKind::Italic));
    }

    #[test]
    fn has_span_detects_gaps() {
        let text = StyledText::with_spans("abcdefghij", vec![bold(0, 3), bold(4, 6)]);
        assert!(!text.has_span(0, 6, SpanKind::Bold));
        assert!(text.has_any_span(0, 6, SpanKind::Bold));
    }

    #[test]
    fn deserialization_restores_invariants() {
        let text: StyledText = serde_json::from_str(
            r#"{"text":"Hi","spans":[{"start":0,"end":9,"style":{"type":"bold"}}]}"#,
        )
        .unwrap();
        assert_eq!(text.char_len(), 2);
        assert_eq!(text.spans(), &[bold(0, 2)]);
    }
}
