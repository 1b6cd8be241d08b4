//! Edit scripts: a line-oriented stand-in for a text field and toolbar.
//!
//! Each non-blank line is a JSON object naming one user action:
//!
//! ```text
//! {"op":"type","text":"Groceries\n"}
//! {"op":"add_bullet"}
//! {"op":"type","text":"milk","at_ms":5000}
//! {"op":"select","start":0,"end":9}
//! {"op":"add_span","style":{"type":"bold"}}
//! {"op":"undo"}
//! ```
//!
//! Lines starting with `#` are comments. `at_ms` pins the clock used for
//! history coalescing; lines without it advance the clock by a fixed step.
//! Typing is replayed one character at a time, exactly as a text field
//! would report it to [`TitleState::update_value`].

use serde::{Deserialize, Serialize};

use crate::clock::ManualClock;
use crate::rich_text::{BulletListType, Selection, SpanType};
use crate::title_state::TitleState;
use crate::util::{compact_text, replace_chars};
use crate::{Error, Result};

/// Clock advance applied to lines without `at_ms`.
pub const DEFAULT_STEP_MS: i64 = 100;

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    /// Type text at the selection, replacing it.
    Type { text: String },
    /// Delete the selection, or `count` characters before the caret.
    Backspace {
        #[serde(default = "one")]
        count: usize,
    },
    /// Move the selection. `end` defaults to `start`.
    Select { start: usize, end: Option<usize> },
    /// Style a range; defaults to the current selection.
    AddSpan {
        style: SpanType,
        start: Option<usize>,
        end: Option<usize>,
    },
    /// Unstyle a range; defaults to the current selection.
    RemoveSpan {
        style: SpanType,
        start: Option<usize>,
        end: Option<usize>,
    },
    /// Bullet the paragraph at `position` (default: the caret).
    AddBullet {
        bullet: Option<BulletListType>,
        position: Option<usize>,
    },
    /// Remove a bullet from the paragraph at `position` (default: the caret).
    RemoveBullet {
        bullet: Option<BulletListType>,
        position: Option<usize>,
    },
    Undo,
    Redo,
    /// Switch the bold font family.
    FontFamily { family: String },
}

const fn one() -> usize {
    1
}

/// A parsed script line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    #[serde(flatten)]
    pub command: EditCommand,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_ms: Option<i64>,
}

/// Parse a script, skipping blank lines and `#` comments.
pub fn parse_script(input: &str) -> Result<Vec<ScriptLine>> {
    input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_number, line)| {
            serde_json::from_str(line).map_err(|error| Error::Script {
                line: line_number,
                message: format!("{error} in `{}`", compact_text(line)),
            })
        })
        .collect()
}

/// Replays script lines against a [`TitleState`] driven by a manual clock.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    clock: ManualClock,
    default_bullet: BulletListType,
}

impl ScriptRunner {
    /// `clock` must be the clock the target state was built with.
    #[must_use]
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            default_bullet: BulletListType::Dots,
        }
    }

    #[must_use]
    pub fn with_default_bullet(mut self, bullet: BulletListType) -> Self {
        self.default_bullet = bullet;
        self
    }

    /// Apply every line in order.
    pub fn run(&self, state: &mut TitleState<ManualClock>, lines: &[ScriptLine]) {
        for line in lines {
            match line.at_ms {
                Some(at_ms) => self.clock.set(at_ms),
                None => self.clock.advance(DEFAULT_STEP_MS),
            }
            self.apply(state, &line.command);
        }
        tracing::debug!(
            lines = lines.len(),
            undo_steps = state.history().undo_len(),
            "Replayed edit script"
        );
    }

    /// Apply a single command.
    pub fn apply(&self, state: &mut TitleState<ManualClock>, command: &EditCommand) {
        let selection = state.selection();
        match command {
            EditCommand::Type { text } => {
                for ch in text.chars() {
                    type_char(state, ch);
                }
            }
            EditCommand::Backspace { count } => {
                if selection.is_collapsed() {
                    for _ in 0..*count {
                        backspace(state);
                    }
                } else {
                    backspace(state);
                }
            }
            EditCommand::Select { start, end } => {
                let text = state.text().text().to_string();
                state.update_value(text, Selection::new(*start, end.unwrap_or(*start)));
            }
            EditCommand::AddSpan { style, start, end } => {
                let (start, end) = range_or_selection(*start, *end, selection);
                state.add_span(start, end, *style);
            }
            EditCommand::RemoveSpan { style, start, end } => {
                let (start, end) = range_or_selection(*start, *end, selection);
                state.remove_span(start, end, *style);
            }
            EditCommand::AddBullet { bullet, position } => {
                let bullet = bullet.unwrap_or(self.default_bullet);
                state.add_bullet_list(position.unwrap_or(selection.start), bullet);
            }
            EditCommand::RemoveBullet { bullet, position } => {
                let position = position.unwrap_or(selection.start);
                let bullet = bullet
                    .or_else(|| {
                        BulletListType::ALL
                            .into_iter()
                            .find(|candidate| state.has_bullet_list(position, *candidate))
                    })
                    .unwrap_or(self.default_bullet);
                state.remove_bullet_list(position, bullet);
            }
            EditCommand::Undo => {
                state.undo();
            }
            EditCommand::Redo => {
                state.redo();
            }
            EditCommand::FontFamily { family } => {
                state.update_font_family(family);
            }
        }
    }
}

fn range_or_selection(
    start: Option<usize>,
    end: Option<usize>,
    selection: Selection,
) -> (usize, usize) {
    (start.unwrap_or(selection.start), end.unwrap_or(selection.end))
}

fn type_char(state: &mut TitleState<ManualClock>, ch: char) {
    let Selection { start, end } = state.selection();
    let mut buffer = [0_u8; 4];
    let text = replace_chars(state.text().text(), start, end, ch.encode_utf8(&mut buffer));
    state.update_value(text, Selection::collapsed(start + 1));
}

fn backspace(state: &mut TitleState<ManualClock>) {
    let Selection { start, end } = state.selection();
    let (from, to) = if start == end {
        if start == 0 {
            return;
        }
        (start - 1, start)
    } else {
        (start, end)
    };
    let text = replace_chars(state.text().text(), from, to, "");
    state.update_value(text, Selection::collapsed(from));
}
