use serde::{Deserialize, Serialize};

/// Author name git reports for lines that only exist in the working tree.
pub const UNCOMMITTED_AUTHOR: &str = "Not Committed Yet";

/// Placeholder email git reports for working-tree lines.
pub const UNCOMMITTED_EMAIL: &str = "not.committed.yet";

/// One commit's authorship of one source line, from `git blame --porcelain`.
///
/// Only the hash is guaranteed; every other field is whatever git emitted
/// for the block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAttribution {
    pub commit_hash: String,
    pub author: Option<String>,
    pub author_email: Option<String>,
    pub author_time: Option<i64>,
    pub committer: Option<String>,
    pub committer_time: Option<i64>,
    pub summary: Option<String>,
}

impl LineAttribution {
    /// Whether this line belongs to the working tree rather than a commit.
    pub fn is_uncommitted(&self) -> bool {
        self.author.as_deref() == Some(UNCOMMITTED_AUTHOR) || is_zero_hash(&self.commit_hash)
    }

    /// The abbreviated hash (7 characters) git shows by default.
    pub fn short_hash(&self) -> &str {
        self.commit_hash.get(..7).unwrap_or(&self.commit_hash)
    }

    /// The author email, unless it is missing or git's working-tree placeholder.
    pub fn valid_email(&self) -> Option<&str> {
        self.author_email
            .as_deref()
            .filter(|email| !email.is_empty())
            .filter(|email| !email.to_ascii_lowercase().contains(UNCOMMITTED_EMAIL))
    }

    /// Fill every unset field from `other`. Used when plain porcelain output
    /// only carries a commit's metadata on its first block.
    pub(crate) fn fill_missing_from(&mut self, other: &LineAttribution) {
        fn fill<T: Clone>(slot: &mut Option<T>, from: &Option<T>) {
            if slot.is_none() {
                slot.clone_from(from);
            }
        }
        fill(&mut self.author, &other.author);
        fill(&mut self.author_email, &other.author_email);
        fill(&mut self.author_time, &other.author_time);
        fill(&mut self.committer, &other.committer);
        fill(&mut self.committer_time, &other.committer_time);
        fill(&mut self.summary, &other.summary);
    }
}

/// A [`LineAttribution`] tagged with its 1-based line number in the
/// current file, as produced by a full-file scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlameLine {
    pub line_number: u32,
    #[serde(flatten)]
    pub attribution: LineAttribution,
}

/// Strip the `^` git puts in front of boundary commits and lowercase the rest.
///
/// Normalizing an already-normalized hash returns it unchanged.
pub fn normalize_hash(raw: &str) -> String {
    raw.strip_prefix('^').unwrap_or(raw).to_ascii_lowercase()
}

/// True for git's all-zero working-tree hash (any length).
pub fn is_zero_hash(hash: &str) -> bool {
    !hash.is_empty() && hash.bytes().all(|b| b == b'0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_hash_strips_boundary_marker() {
        assert_eq!(normalize_hash("^abcdef0"), "abcdef0");
        assert_eq!(normalize_hash("ABCDEF0"), "abcdef0");
        // Only one marker is stripped.
        assert_eq!(normalize_hash("^^abc"), "^abc");
    }

    #[test]
    fn test_normalize_hash_is_idempotent() {
        for raw in ["^1234abcd", "1234abcd", "", "^", "0000000000000000000000000000000000000000"] {
            let once = normalize_hash(raw);
            assert_eq!(normalize_hash(&once), once, "input {:?}", raw);
        }
    }

    #[test]
    fn test_uncommitted_detection() {
        let by_hash = LineAttribution {
            commit_hash: "0".repeat(40),
            ..Default::default()
        };
        assert!(by_hash.is_uncommitted());

        let by_author = LineAttribution {
            commit_hash: "abc1234".to_string(),
            author: Some(UNCOMMITTED_AUTHOR.to_string()),
            ..Default::default()
        };
        assert!(by_author.is_uncommitted());

        let committed = LineAttribution {
            commit_hash: "a0b0c0d".to_string(),
            author: Some("Alice".to_string()),
            ..Default::default()
        };
        assert!(!committed.is_uncommitted());
        assert!(!is_zero_hash(""));
    }

    #[test]
    fn test_short_hash_and_email() {
        let attribution = LineAttribution {
            commit_hash: "abcdef0123456789".to_string(),
            author_email: Some("Not.Committed.Yet".to_string()),
            ..Default::default()
        };
        assert_eq!(attribution.short_hash(), "abcdef0");
        assert_eq!(attribution.valid_email(), None);

        let short = LineAttribution {
            commit_hash: "abc".to_string(),
            author_email: Some("alice@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(short.short_hash(), "abc");
        assert_eq!(short.valid_email(), Some("alice@example.com"));
    }

    #[test]
    fn test_fill_missing_keeps_existing_fields() {
        let mut partial = LineAttribution {
            commit_hash: "abc".to_string(),
            summary: Some("Own summary".to_string()),
            ..Default::default()
        };
        let full = LineAttribution {
            commit_hash: "abc".to_string(),
            author: Some("Alice".to_string()),
            author_time: Some(1_700_000_000),
            summary: Some("Cached summary".to_string()),
            ..Default::default()
        };
        partial.fill_missing_from(&full);
        assert_eq!(partial.author.as_deref(), Some("Alice"));
        assert_eq!(partial.author_time, Some(1_700_000_000));
        assert_eq!(partial.summary.as_deref(), Some("Own summary"));
    }
}
