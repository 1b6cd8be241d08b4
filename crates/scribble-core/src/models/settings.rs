//! Editor settings model

use serde::{Deserialize, Serialize};

use crate::history::{HistoryConfig, DEFAULT_COALESCE_WINDOW_MS, DEFAULT_HISTORY_LIMIT};
use crate::rich_text::BulletListType;
use crate::util::normalize_text_option;

const DEFAULT_FONT_FAMILY: &str = "system-ui";

/// Editor settings shared by every host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Font family applied to bold text
    pub font_family: String,
    /// Undo steps kept per field
    pub history_limit: usize,
    /// Edits closer together than this (ms) share one undo step
    pub coalesce_window_ms: i64,
    /// Bullet inserted by the toolbar's list button
    pub default_bullet: BulletListType,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            coalesce_window_ms: DEFAULT_COALESCE_WINDOW_MS,
            default_bullet: BulletListType::default(),
        }
    }
}

impl EditorSettings {
    /// History tuning derived from these settings
    #[must_use]
    pub const fn history_config(&self) -> HistoryConfig {
        HistoryConfig {
            max_entries: self.history_limit,
            coalesce_window_ms: self.coalesce_window_ms,
        }
    }

    /// Replace blank or out-of-range values with defaults
    pub fn normalize(&mut self) {
        self.font_family = normalize_text_option(Some(self.font_family.clone()))
            .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string());
        if self.history_limit == 0 {
            self.history_limit = DEFAULT_HISTORY_LIMIT;
        }
        if self.coalesce_window_ms < 0 {
            self.coalesce_window_ms = DEFAULT_COALESCE_WINDOW_MS;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = EditorSettings::default();
        assert_eq!(settings.history_limit, 20);
        assert_eq!(settings.coalesce_window_ms, 1_000);
        assert_eq!(settings.default_bullet, BulletListType::Dots);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: EditorSettings = serde_json::from_str(r#"{"font_family":"serif"}"#).unwrap();
        assert_eq!(settings.font_family, "serif");
        assert_eq!(settings.history_limit, 20);
    }

    #[test]
    fn test_normalize_repairs_invalid_values() {
        let mut settings = EditorSettings {
            font_family: "   ".to_string(),
            history_limit: 0,
            coalesce_window_ms: -5,
            default_bullet: BulletListType::Check,
        };
        settings.normalize();
        assert_eq!(settings.font_family, "system-ui");
        assert_eq!(settings.history_config(), HistoryConfig::default());
        assert_eq!(settings.default_bullet, BulletListType::Check);
    }
}
