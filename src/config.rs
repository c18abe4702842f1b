//! Host-supplied settings. Both structs deserialize from the JSON the
//! extension passes in; missing keys take their defaults.

use serde::{Deserialize, Serialize};

/// How line labels are rendered.
///
/// Immutable per render call: toggling a mode means building a new value
/// and handing it to [`BlameSession`](crate::BlameSession) or the render
/// functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayConfig {
    /// Celebratory wording instead of blame wording.
    pub praise_mode: bool,
    /// Prefix labels with the age tier glyph.
    pub show_emojis: bool,
    /// Mark lines whose commit summary looks like a bug fix.
    pub bug_detective: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            praise_mode: false,
            show_emojis: true,
            bug_detective: false,
        }
    }
}

/// Size limits for the various views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Limits {
    /// Revisions offered in the history quick pick.
    pub pick_history: usize,
    /// Revisions shown in the history tree.
    pub history_list: usize,
    pub leaderboard_size: usize,
    /// Authors shown in the statistics view.
    pub top_authors: usize,
    /// Months shown in the statistics activity table.
    pub recent_months: usize,
    /// Quiet period before an edit-triggered refresh runs.
    pub debounce_ms: u64,
    /// Characters of commit summary kept in inline annotations.
    pub summary_width: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            pick_history: 20,
            history_list: 50,
            leaderboard_size: 10,
            top_authors: 5,
            recent_months: 6,
            debounce_ms: 500,
            summary_width: 60,
        }
    }
}

/// Everything a [`BlameSession`](crate::BlameSession) is created with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    pub display: DisplayConfig,
    pub limits: Limits,
}
