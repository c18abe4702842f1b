use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::blame::{parse_file_blame, BlameLine};
use crate::classify::is_bug_fix;

/// Line count for one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorLines {
    pub author: String,
    pub lines: u32,
}

/// Who owns how much of a file, when it was written, and how much of it
/// came from bug-fix commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorshipAggregate {
    /// Per-author line counts in the order authors first appear in the blame.
    pub lines_by_author: Vec<AuthorLines>,
    /// `YYYY-MM` (UTC) of each line's author time -> line count.
    pub line_count_by_month: BTreeMap<String, u32>,
    pub bug_fix_line_count: u32,
    pub total_lines: u32,
}

impl AuthorshipAggregate {
    pub fn author_count(&self) -> usize {
        self.lines_by_author.len()
    }

    /// Lines attributed to `author`, zero if they own none.
    pub fn lines_for(&self, author: &str) -> u32 {
        self.lines_by_author
            .iter()
            .find(|a| a.author == author)
            .map_or(0, |a| a.lines)
    }

    /// Share of lines last touched by a bug-fix commit, in percent.
    pub fn bug_fix_percentage(&self) -> f64 {
        percentage(self.bug_fix_line_count, self.total_lines)
    }
}

/// Aggregate full-file `git blame --line-porcelain` output.
pub fn aggregate(raw: &str) -> AuthorshipAggregate {
    aggregate_lines(&parse_file_blame(raw))
}

/// Aggregate already-parsed blame lines in a single pass.
///
/// Every line with an author counts once towards its author and the total,
/// so the author counts always sum to `total_lines`. Lines git emitted
/// without an author are skipped.
pub fn aggregate_lines(lines: &[BlameLine]) -> AuthorshipAggregate {
    let mut result = AuthorshipAggregate::default();
    let mut author_index: HashMap<String, usize> = HashMap::new();

    for line in lines {
        let attribution = &line.attribution;

        let Some(author) = attribution.author.as_deref() else {
            log::debug!(
                "blame line {} ({}) has no author, skipping",
                line.line_number,
                attribution.short_hash()
            );
            continue;
        };

        match author_index.get(author) {
            Some(&idx) => result.lines_by_author[idx].lines += 1,
            None => {
                author_index.insert(author.to_string(), result.lines_by_author.len());
                result.lines_by_author.push(AuthorLines {
                    author: author.to_string(),
                    lines: 1,
                });
            }
        }
        result.total_lines += 1;

        if let Some(month) = attribution.author_time.and_then(month_bucket) {
            *result.line_count_by_month.entry(month).or_insert(0) += 1;
        }

        if attribution.summary.as_deref().is_some_and(is_bug_fix) {
            result.bug_fix_line_count += 1;
        }
    }

    result
}

/// The UTC `YYYY-MM` bucket for a Unix timestamp.
pub fn month_bucket(timestamp: i64) -> Option<String> {
    let datetime = OffsetDateTime::from_unix_timestamp(timestamp).ok()?;
    Some(format!("{:04}-{:02}", datetime.year(), u8::from(datetime.month())))
}

/// `part` as a percentage of `whole`, rounded to one decimal place.
pub(crate) fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (f64::from(part) * 1000.0 / f64::from(whole)).round() / 10.0
}
