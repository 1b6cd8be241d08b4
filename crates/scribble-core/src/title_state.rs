//! Editable rich-text field state.
//!
//! [`TitleState`] is the single source of truth for one editable field: its
//! styled text, its selection, the bullet paragraph automation and the
//! undo/redo history. Hosts feed it text field changes through
//! [`TitleState::update_value`] and toolbar actions through the span and
//! bullet operations; every mutating call returns the resulting
//! [`TitleValue`] for rendering.
//!
//! Invariant kept after every mutating call: neither selection endpoint lies
//! strictly inside a bullet glyph.

use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::history::{HistoryConfig, HistoryState, UndoRedoManager, UndoRedoOperation};
use crate::models::EditorSettings;
use crate::rich_text::{
    bullet_ranges, BulletListType, Selection, Span, SpanKind, SpanType, StyledText, TextDiff,
    BULLET_PLACEHOLDER,
};

/// Current content of a field, as rendered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TitleValue {
    pub text: StyledText,
    pub selection: Selection,
}

/// Formatting active at the selection, used to reflect toolbar state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FormattingState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub font_color: bool,
    pub fill_color: bool,
    pub bullet: Option<BulletListType>,
}

/// Styles toggled on at a caret, waiting for text to be typed there.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CaretStyles {
    position: usize,
    styles: Vec<SpanType>,
}

impl CaretStyles {
    fn has(&self, position: usize, kind: SpanKind) -> bool {
        self.position == position && self.styles.iter().any(|style| style.kind() == kind)
    }
}

/// Rich-text state for one editable field.
#[derive(Debug)]
pub struct TitleState<C: Clock = SystemClock> {
    value: TitleValue,
    history: UndoRedoManager,
    font_family: Option<String>,
    caret_styles: Option<CaretStyles>,
    clock: C,
}

impl TitleState<SystemClock> {
    /// New state with the caret at the end of `text` and default history.
    #[must_use]
    pub fn new(text: impl Into<StyledText>) -> Self {
        Self::with_clock(text, HistoryConfig::default(), SystemClock)
    }
}

impl<C: Clock> TitleState<C> {
    #[must_use]
    pub fn with_clock(text: impl Into<StyledText>, config: HistoryConfig, clock: C) -> Self {
        let text = text.into();
        let selection = Selection::collapsed(text.char_len());
        Self {
            value: TitleValue { text, selection },
            history: UndoRedoManager::with_config(config),
            font_family: None,
            caret_styles: None,
            clock,
        }
    }

    /// New state configured from editor settings.
    #[must_use]
    pub fn from_settings(text: impl Into<StyledText>, settings: &EditorSettings, clock: C) -> Self {
        let mut state = Self::with_clock(text, settings.history_config(), clock);
        state.update_font_family(&settings.font_family);
        state
    }

    #[must_use]
    pub const fn value(&self) -> &TitleValue {
        &self.value
    }

    #[must_use]
    pub const fn text(&self) -> &StyledText {
        &self.value.text
    }

    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.value.selection
    }

    #[must_use]
    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    #[must_use]
    pub const fn history(&self) -> &UndoRedoManager {
        &self.history
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply `span_type` over `[start, end)`, replacing same-kind spans there.
    ///
    /// On a caret the style is held until text is typed there, so the typed
    /// text picks it up.
    pub fn add_span(&mut self, start: usize, end: usize, span_type: SpanType) -> &TitleValue {
        let len = self.value.text.char_len();
        if start.min(len) == end.min(len) {
            let position = start.min(len);
            let mut styles = self
                .caret_styles
                .take()
                .filter(|caret| caret.position == position)
                .map(|caret| caret.styles)
                .unwrap_or_default();
            styles.retain(|style| style.kind() != span_type.kind());
            styles.push(span_type);
            self.caret_styles = Some(CaretStyles { position, styles });
            return &self.value;
        }

        self.caret_styles = None;
        let before = self.value.clone();
        self.apply_span(start, end, span_type);
        self.commit(before)
    }

    /// Remove spans of `span_type`'s kind from `[start, end)`.
    ///
    /// On a caret this only drops a held style of that kind.
    pub fn remove_span(&mut self, start: usize, end: usize, span_type: SpanType) -> &TitleValue {
        if let Some(caret) = &mut self.caret_styles {
            caret.styles.retain(|style| style.kind() != span_type.kind());
        }
        let len = self.value.text.char_len();
        if start.min(len) == end.min(len) {
            return &self.value;
        }

        self.caret_styles = None;
        let before = self.value.clone();
        self.value.text.remove_span(start, end, span_type.kind());
        self.commit(before)
    }

    #[must_use]
    pub fn has_span(&self, start: usize, end: usize, span_type: SpanType) -> bool {
        let kind = span_type.kind();
        self.value.text.has_span(start, end, kind) || self.caret_has(start, end, kind)
    }

    #[must_use]
    pub fn has_any_font_color_span(&self, start: usize, end: usize) -> bool {
        self.value.text.has_any_span(start, end, SpanKind::FontColor)
            || self.caret_has(start, end, SpanKind::FontColor)
    }

    #[must_use]
    pub fn has_any_fill_color_span(&self, start: usize, end: usize) -> bool {
        self.value.text.has_any_span(start, end, SpanKind::FillColor)
            || self.caret_has(start, end, SpanKind::FillColor)
    }

    /// Spans touching `[start, end)`.
    #[must_use]
    pub fn spans_in(&self, start: usize, end: usize) -> Vec<&Span> {
        self.value.text.spans_in(start, end).collect()
    }

    /// Formatting at the current selection.
    #[must_use]
    pub fn formatting_at_selection(&self) -> FormattingState {
        let Selection { start, end } = self.value.selection;
        let text = &self.value.text;
        FormattingState {
            bold: self.has_span(start, end, SpanType::Bold),
            italic: self.has_span(start, end, SpanType::Italic),
            underline: self.has_span(start, end, SpanType::Underline),
            strikethrough: self.has_span(start, end, SpanType::Strikethrough),
            font_color: self.has_any_font_color_span(start, end),
            fill_color: self.has_any_fill_color_span(start, end),
            bullet: BulletListType::detect(text, text.paragraph_start(start)),
        }
    }

    /// Prefix the paragraph containing `position` with `bullet`.
    ///
    /// Any other bullet on that paragraph is replaced; the same bullet is
    /// left untouched.
    pub fn add_bullet_list(&mut self, position: usize, bullet: BulletListType) -> &TitleValue {
        self.caret_styles = None;
        let before = self.value.clone();
        let paragraph = self.value.text.paragraph_start(position);
        match BulletListType::detect(&self.value.text, paragraph) {
            Some(existing) if existing == bullet => return &self.value,
            Some(existing) => self.remove_prefix(paragraph, existing.glyph_len()),
            None => {}
        }
        self.insert_prefix(paragraph, bullet.glyph());
        self.commit(before)
    }

    /// Remove `bullet` from the paragraph containing `position`, if present.
    pub fn remove_bullet_list(&mut self, position: usize, bullet: BulletListType) -> &TitleValue {
        if !self.has_bullet_list(position, bullet) {
            return &self.value;
        }
        self.caret_styles = None;
        let before = self.value.clone();
        let paragraph = self.value.text.paragraph_start(position);
        self.remove_prefix(paragraph, bullet.glyph_len());
        self.commit(before)
    }

    #[must_use]
    pub fn has_bullet_list(&self, position: usize, bullet: BulletListType) -> bool {
        let text = &self.value.text;
        BulletListType::detect(text, text.paragraph_start(position)) == Some(bullet)
    }

    /// Ingest a new text field value.
    ///
    /// Styles are carried across the edit, a line break typed at the end of
    /// a bulleted paragraph continues the list, and backspacing over a
    /// bullet's placeholder removes the whole bullet. Styles held at the
    /// caret apply to text typed there and stay held while typing continues.
    pub fn update_value(&mut self, text: impl Into<String>, selection: Selection) -> &TitleValue {
        let text = text.into();
        let before = self.value.clone();
        let selection = selection.clamp(text.chars().count());
        let caret = self.caret_styles.take();

        let Some(diff) = TextDiff::between(before.text.text(), &text, Some(selection.end)) else {
            self.caret_styles =
                caret.filter(|caret| selection == Selection::collapsed(caret.position));
            self.value.selection = selection;
            return self.commit(before);
        };

        self.value
            .text
            .replace_range(diff.start, diff.start + diff.removed, &diff.inserted);
        debug_assert_eq!(self.value.text.text(), text);
        self.value.selection = selection;

        if let Some(caret) = caret.filter(|caret| diff.removed == 0 && caret.position == diff.start)
        {
            let end = diff.start + diff.inserted.chars().count();
            for style in &caret.styles {
                self.apply_span(diff.start, end, *style);
            }
            if selection == Selection::collapsed(end) {
                self.caret_styles = Some(CaretStyles {
                    position: end,
                    styles: caret.styles,
                });
            }
        }

        if diff.removed == 0 && diff.inserted == "\n" {
            self.continue_bullet(diff.start);
        } else if diff.is_deletion() && diff.removed == 1 {
            self.collapse_bullet(&before.text, diff.start);
        }

        self.commit(before)
    }

    /// Restore the state before the newest change. No-op without history.
    pub fn undo(&mut self) -> &TitleValue {
        self.caret_styles = None;
        match self.history.undo() {
            Some(state) => self.restore(state),
            None => &self.value,
        }
    }

    /// Reapply the newest undone change. No-op without redo history.
    pub fn redo(&mut self) -> &TitleValue {
        self.caret_styles = None;
        match self.history.redo() {
            Some(state) => self.restore(state),
            None => &self.value,
        }
    }

    /// Switch the font family of bold text. Not recorded in history.
    pub fn update_font_family(&mut self, family: &str) -> &TitleValue {
        self.font_family = Some(family.to_string());
        self.value.text.set_font_family(SpanKind::Bold, family);
        &self.value
    }

    /// Replace the whole content, e.g. when loading another note.
    ///
    /// History belongs to the previous content and is dropped.
    pub fn reset(&mut self, text: impl Into<StyledText>) -> &TitleValue {
        let text = text.into();
        let selection = Selection::collapsed(text.char_len());
        self.value = TitleValue { text, selection };
        self.caret_styles = None;
        self.history.clear_history();
        self.apply_font_family();
        self.value.selection = self.snap_selection(Selection::default(), selection);
        &self.value
    }

    fn restore(&mut self, state: HistoryState) -> &TitleValue {
        let len = state.text.char_len();
        self.value.text = state.text;
        self.apply_font_family();
        let selection = Selection::collapsed(state.selection.end).clamp(len);
        self.value.selection = self.snap_selection(Selection::default(), selection);
        &self.value
    }

    fn apply_span(&mut self, start: usize, end: usize, span_type: SpanType) {
        let family = match span_type {
            SpanType::Bold => self.font_family.clone(),
            _ => None,
        };
        self.value.text.add_span(start, end, span_type, family);
    }

    fn caret_has(&self, start: usize, end: usize, kind: SpanKind) -> bool {
        let len = self.value.text.char_len();
        let (start, end) = (start.min(len), end.min(len));
        start == end
            && self
                .caret_styles
                .as_ref()
                .is_some_and(|caret| caret.has(start, kind))
    }

    fn apply_font_family(&mut self) {
        if let Some(family) = &self.font_family {
            self.value.text.set_font_family(SpanKind::Bold, family);
        }
    }

    /// Finish a mutation: keep the selection out of bullet glyphs and record
    /// history if the content changed.
    fn commit(&mut self, before: TitleValue) -> &TitleValue {
        let selection = self.value.selection.clamp(self.value.text.char_len());
        self.value.selection = self.snap_selection(before.selection, selection);

        if self.value.text != before.text {
            self.history.record(UndoRedoOperation {
                pre_text: before.text,
                post_text: self.value.text.clone(),
                pre_selection: before.selection,
                post_selection: self.value.selection,
                timestamp_ms: self.clock.now_millis(),
            });
        }
        &self.value
    }

    fn insert_prefix(&mut self, at: usize, glyph: &str) {
        let len = glyph.chars().count();
        self.value.text.insert_str(at, glyph);
        self.value.selection = self
            .value
            .selection
            .map(|position| if position >= at { position + len } else { position });
    }

    fn remove_prefix(&mut self, at: usize, len: usize) {
        self.value.text.remove_range(at, at + len);
        self.value.selection = self.value.selection.map(|position| {
            if position <= at {
                position
            } else {
                position.saturating_sub(len).max(at)
            }
        });
    }

    /// After a line break typed at `newline_at`, repeat the previous
    /// paragraph's bullet on the new line.
    fn continue_bullet(&mut self, newline_at: usize) {
        let paragraph = self.value.text.paragraph_start(newline_at);
        if let Some(bullet) = BulletListType::detect(&self.value.text, paragraph) {
            tracing::debug!(?bullet, position = newline_at + 1, "Continuing bullet list");
            self.insert_prefix(newline_at + 1, bullet.glyph());
        }
    }

    /// After a single character at `removed_at` was deleted, remove the rest
    /// of the bullet glyph if that character was its placeholder.
    fn collapse_bullet(&mut self, old_text: &StyledText, removed_at: usize) {
        if old_text.char_at(removed_at) != Some(BULLET_PLACEHOLDER) {
            return;
        }
        let bullet = BulletListType::ALL.into_iter().find(|bullet| {
            let Some(glyph_start) = (removed_at + 1).checked_sub(bullet.glyph_len()) else {
                return false;
            };
            old_text.paragraph_start(glyph_start) == glyph_start
                && old_text.contains_at(glyph_start, bullet.glyph())
        });
        if let Some(bullet) = bullet {
            let glyph_start = removed_at + 1 - bullet.glyph_len();
            tracing::debug!(?bullet, position = glyph_start, "Removing bullet on backspace");
            self.remove_prefix(glyph_start, bullet.glyph_len() - 1);
        }
    }

    /// Move selection endpoints that fall strictly inside a bullet glyph to
    /// the glyph edge in the direction the endpoint was travelling.
    fn snap_selection(&self, previous: Selection, next: Selection) -> Selection {
        let ranges = bullet_ranges(&self.value.text);
        if ranges.is_empty() {
            return next;
        }
        let snap = |from: usize, to: usize| {
            ranges
                .iter()
                .find(|range| range.start < to && to < range.end)
                .map_or(to, |range| if to < from { range.start } else { range.end })
        };
        Selection::new(snap(previous.start, next.start), snap(previous.end, next.end))
    }
}
