//! Single-region text diffs between consecutive text field values.

/// One contiguous replacement: `removed` characters at `start` replaced by
/// `inserted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDiff {
    pub start: usize,
    pub removed: usize,
    pub inserted: String,
}

impl TextDiff {
    /// Compute the edit turning `old` into `new`, or `None` if they match.
    ///
    /// Text fields report only the resulting value, so a pure insertion or
    /// deletion in repeated characters (`"aa"` to `"aaa"`) is ambiguous. When
    /// `caret` is given and the edit is consistent with ending there, that
    /// placement wins; otherwise the longest common prefix and suffix decide.
    #[must_use]
    pub fn between(old: &str, new: &str, caret: Option<usize>) -> Option<Self> {
        if old == new {
            return None;
        }
        let old: Vec<char> = old.chars().collect();
        let new: Vec<char> = new.chars().collect();

        if let Some(diff) = caret.and_then(|caret| Self::anchored(&old, &new, caret)) {
            return Some(diff);
        }

        let prefix = old
            .iter()
            .zip(&new)
            .take_while(|(a, b)| a == b)
            .count();
        let max_suffix = old.len().min(new.len()) - prefix;
        let suffix = old
            .iter()
            .rev()
            .zip(new.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        Some(Self {
            start: prefix,
            removed: old.len() - prefix - suffix,
            inserted: new[prefix..new.len() - suffix].iter().collect(),
        })
    }

    fn anchored(old: &[char], new: &[char], caret: usize) -> Option<Self> {
        if new.len() > old.len() {
            let added = new.len() - old.len();
            let start = caret.checked_sub(added)?;
            if caret > new.len() || new[..start] != old[..start] || new[caret..] != old[start..] {
                return None;
            }
            Some(Self {
                start,
                removed: 0,
                inserted: new[start..caret].iter().collect(),
            })
        } else if new.len() < old.len() {
            let removed = old.len() - new.len();
            if caret > new.len()
                || old[..caret] != new[..caret]
                || old[caret + removed..] != new[caret..]
            {
                return None;
            }
            Some(Self {
                start: caret,
                removed,
                inserted: String::new(),
            })
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_deletion(&self) -> bool {
        self.inserted.is_empty() && self.removed > 0
    }
}
