use serde::{Deserialize, Serialize};

/// One revision of a file, from `git log --follow`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub hash: String,
    pub author: String,
    /// Author date at day granularity (`YYYY-MM-DD`, from `--date=short`).
    pub date: String,
    pub message: String,
}

impl HistoryEntry {
    /// The 8-character hash used in diff titles.
    pub fn short_hash(&self) -> &str {
        self.hash.get(..8).unwrap_or(&self.hash)
    }
}
