//! Bounded, time-coalescing undo/redo history.

use std::collections::VecDeque;

use crate::rich_text::{Selection, StyledText};

/// Maximum number of entries kept on each stack.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;
/// Edits closer together than this are merged into one undo step.
pub const DEFAULT_COALESCE_WINDOW_MS: i64 = 1_000;

/// History tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    pub max_entries: usize,
    pub coalesce_window_ms: i64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_HISTORY_LIMIT,
            coalesce_window_ms: DEFAULT_COALESCE_WINDOW_MS,
        }
    }
}

/// One reversible content change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRedoOperation {
    pub pre_text: StyledText,
    pub post_text: StyledText,
    pub pre_selection: Selection,
    pub post_selection: Selection,
    /// Unix ms when the change (or the first change of a coalesced run) happened.
    pub timestamp_ms: i64,
}

/// Text and selection restored by an undo or redo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryState {
    pub text: StyledText,
    pub selection: Selection,
}

/// Undo and redo stacks.
#[derive(Debug, Clone, Default)]
pub struct UndoRedoManager {
    undo_stack: VecDeque<UndoRedoOperation>,
    redo_stack: VecDeque<UndoRedoOperation>,
    config: HistoryConfig,
}

impl UndoRedoManager {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    #[must_use]
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            config: HistoryConfig {
                max_entries: config.max_entries.max(1),
                ..config
            },
        }
    }

    #[must_use]
    pub const fn config(&self) -> HistoryConfig {
        self.config
    }

    /// Record a change, invalidating redo history.
    ///
    /// A change within the coalescing window of the newest entry extends that
    /// entry: its pre-state and timestamp stay, its post-state is replaced.
    pub fn record(&mut self, op: UndoRedoOperation) {
        self.redo_stack.clear();

        if let Some(last) = self.undo_stack.back_mut() {
            if op.timestamp_ms.saturating_sub(last.timestamp_ms) <= self.config.coalesce_window_ms
            {
                last.post_text = op.post_text;
                last.post_selection = op.post_selection;
                tracing::debug!(
                    entries = self.undo_stack.len(),
                    "Coalesced edit into last undo step"
                );
                return;
            }
        }

        self.undo_stack.push_back(op);
        Self::evict_oldest(&mut self.undo_stack, self.config.max_entries);
    }

    /// Step back, returning the state before the newest change.
    pub fn undo(&mut self) -> Option<HistoryState> {
        let op = self.undo_stack.pop_back()?;
        let state = HistoryState {
            text: op.pre_text.clone(),
            selection: op.pre_selection,
        };
        self.redo_stack.push_back(op);
        Self::evict_oldest(&mut self.redo_stack, self.config.max_entries);
        Some(state)
    }

    /// Step forward, returning the state after the newest undone change.
    pub fn redo(&mut self) -> Option<HistoryState> {
        let op = self.redo_stack.pop_back()?;
        let state = HistoryState {
            text: op.post_text.clone(),
            selection: op.post_selection,
        };
        self.undo_stack.push_back(op);
        Self::evict_oldest(&mut self.undo_stack, self.config.max_entries);
        Some(state)
    }

    /// Drop all history, e.g. when the text is replaced wholesale.
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo entries, oldest first.
    pub fn undo_entries(&self) -> impl Iterator<Item = &UndoRedoOperation> + '_ {
        self.undo_stack.iter()
    }

    fn evict_oldest(stack: &mut VecDeque<UndoRedoOperation>, max_entries: usize) {
        while stack.len() > max_entries {
            stack.pop_front();
            tracing::debug!(max_entries, "Evicted oldest history entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn op(pre: &str, post: &str, timestamp_ms: i64) -> UndoRedoOperation {
        UndoRedoOperation {
            pre_text: StyledText::new(pre),
            post_text: StyledText::new(post),
            pre_selection: Selection::collapsed(pre.chars().count()),
            post_selection: Selection::collapsed(post.chars().count()),
            timestamp_ms,
        }
    }

    #[test]
    fn records_within_window_coalesce() {
        let mut history = UndoRedoManager::new();
        history.record(op("", "a", 1_000));
        history.record(op("a", "ab", 1_900));

        assert_eq!(history.undo_len(), 1);
        let entry = history.undo_entries().next().unwrap();
        assert_eq!(entry.pre_text.text(), "");
        assert_eq!(entry.post_text.text(), "ab");
        assert_eq!(entry.post_selection, Selection::collapsed(2));
        assert_eq!(entry.timestamp_ms, 1_000);
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let mut history = UndoRedoManager::new();
        history.record(op("", "a", 0));
        history.record(op("a", "ab", 1_000));
        history.record(op("ab", "abc", 2_001));
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn keeps_most_recent_twenty_entries() {
        let mut history = UndoRedoManager::new();
        for index in 0..25_i64 {
            history.record(op(&index.to_string(), &(index + 1).to_string(), index * 5_000));
        }

        assert_eq!(history.undo_len(), 20);
        let posts: Vec<_> = history
            .undo_entries()
            .map(|entry| entry.post_text.text().to_string())
            .collect();
        let expected: Vec<_> = (6..=25).map(|n: i64| n.to_string()).collect();
        assert_eq!(posts, expected);
    }

    #[test]
    fn undo_and_redo_move_entries_between_stacks() {
        let mut history = UndoRedoManager::new();
        history.record(op("", "a", 0));
        history.record(op("a", "ab", 5_000));

        let undone = history.undo().unwrap();
        assert_eq!(undone.text.text(), "a");
        assert_eq!(undone.selection, Selection::collapsed(1));
        assert!(history.can_redo());

        let redone = history.redo().unwrap();
        assert_eq!(redone.text.text(), "ab");
        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn empty_history_is_a_no_op() {
        let mut history = UndoRedoManager::new();
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        assert!(!history.can_undo());
    }

    #[test]
    fn new_record_clears_redo() {
        let mut history = UndoRedoManager::new();
        history.record(op("", "a", 0));
        history.undo();
        assert_eq!(history.redo_len(), 1);
        history.record(op("", "b", 10_000));
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn clear_history_empties_both_stacks() {
        let mut history = UndoRedoManager::new();
        history.record(op("", "a", 0));
        history.record(op("a", "ab", 5_000));
        history.undo();
        history.clear_history();
        assert_eq!((history.undo_len(), history.redo_len()), (0, 0));
    }

    #[test]
    fn zero_capacity_keeps_one_entry() {
        let mut history = UndoRedoManager::with_config(HistoryConfig {
            max_entries: 0,
            coalesce_window_ms: 0,
        });
        history.record(op("", "a", 0));
        history.record(op("a", "ab", 10));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.undo().unwrap().text.text(), "a");
    }

    #[test]
    fn redo_stack_is_bounded_by_capacity() {
        let mut history = UndoRedoManager::with_config(HistoryConfig {
            max_entries: 3,
            coalesce_window_ms: 0,
        });
        for index in 0..5_i64 {
            history.record(op(&index.to_string(), &(index + 1).to_string(), index * 10));
        }

        let mut undone = Vec::new();
        while let Some(state) = history.undo() {
            undone.push(state.text.text().to_string());
        }
        assert_eq!(undone, vec!["4", "3", "2"]);
        assert_eq!(history.undo_len(), 0);
        assert_eq!(history.redo_len(), 3);

        let mut redone = Vec::new();
        while let Some(state) = history.redo() {
            redone.push(state.text.text().to_string());
        }
        assert_eq!(redone, vec!["3", "4", "5"]);
        assert_eq!(history.undo_len(), 3);
    }
}
