use serde::{Deserialize, Serialize};

use super::aggregate::{percentage, AuthorshipAggregate};
use crate::config::Limits;

/// One row of a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRank {
    /// 1-based position.
    pub rank: usize,
    pub author: String,
    pub lines: u32,
    /// Share of the denominator the ranking was built against, one decimal.
    pub percentage: f64,
}

/// Lines last written in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthActivity {
    pub month: String,
    pub lines: u32,
}

/// Everything the statistics view shows for one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_lines: u32,
    pub author_count: usize,
    pub bug_fix_line_count: u32,
    pub bug_fix_percentage: f64,
    pub top_authors: Vec<AuthorRank>,
    pub recent_activity: Vec<MonthActivity>,
}

/// Rank authors by descending line count and keep the first `limit`.
///
/// The sort is stable: authors with equal counts keep the order in which
/// they first appeared in the blame. Percentages are taken against
/// `denominator`, or against the aggregate's own total when it is zero.
pub fn rank_authors(aggregate: &AuthorshipAggregate, limit: usize, denominator: u32) -> Vec<AuthorRank> {
    let denominator = if denominator == 0 {
        aggregate.total_lines
    } else {
        denominator
    };

    let mut sorted: Vec<_> = aggregate.lines_by_author.iter().collect();
    sorted.sort_by(|a, b| b.lines.cmp(&a.lines));

    sorted
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, entry)| AuthorRank {
            rank: idx + 1,
            author: entry.author.clone(),
            lines: entry.lines,
            percentage: percentage(entry.lines, denominator),
        })
        .collect()
}

/// The leaderboard: top authors as a share of the file's current line count.
pub fn leaderboard(aggregate: &AuthorshipAggregate, limits: &Limits, file_line_count: u32) -> Vec<AuthorRank> {
    rank_authors(aggregate, limits.leaderboard_size, file_line_count)
}

/// The newest `months` months that have any lines, newest first.
pub fn recent_activity(aggregate: &AuthorshipAggregate, months: usize) -> Vec<MonthActivity> {
    aggregate
        .line_count_by_month
        .iter()
        .rev()
        .take(months)
        .map(|(month, &lines)| MonthActivity {
            month: month.clone(),
            lines,
        })
        .collect()
}

pub fn statistics(aggregate: &AuthorshipAggregate, limits: &Limits) -> Statistics {
    Statistics {
        total_lines: aggregate.total_lines,
        author_count: aggregate.author_count(),
        bug_fix_line_count: aggregate.bug_fix_line_count,
        bug_fix_percentage: aggregate.bug_fix_percentage(),
        top_authors: rank_authors(aggregate, limits.top_authors, aggregate.total_lines),
        recent_activity: recent_activity(aggregate, limits.recent_months),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::stats::aggregate::AuthorLines;

    fn make_test_aggregate(counts: &[(&str, u32)]) -> AuthorshipAggregate {
        let lines_by_author: Vec<_> = counts
            .iter()
            .map(|&(author, lines)| AuthorLines {
                author: author.to_string(),
                lines,
            })
            .collect();
        let total_lines = lines_by_author.iter().map(|a| a.lines).sum();
        AuthorshipAggregate {
            lines_by_author,
            line_count_by_month: BTreeMap::new(),
            bug_fix_line_count: 0,
            total_lines,
        }
    }

    #[test]
    fn test_rank_descending() {
        let aggregate = make_test_aggregate(&[("Alice", 2), ("Bob", 5), ("Carol", 3)]);
        let ranks = rank_authors(&aggregate, 10, 0);
        let names: Vec<_> = ranks.iter().map(|r| r.author.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Carol", "Alice"]);
        assert_eq!(ranks[0].rank, 1);
        assert_eq!(ranks[0].percentage, 50.0);
    }

    #[test]
    fn test_rank_ties_keep_first_encounter_order() {
        let aggregate = make_test_aggregate(&[("Zed", 4), ("Amy", 4), ("Bob", 1)]);
        let ranks = rank_authors(&aggregate, 10, 0);
        assert_eq!(ranks[0].author, "Zed");
        assert_eq!(ranks[1].author, "Amy");
    }

    #[test]
    fn test_leaderboard_and_top_authors_truncate() {
        let names: Vec<String> = (0..12).map(|i| format!("dev{}", i)).collect();
        let counts: Vec<(&str, u32)> = names.iter().map(|n| (n.as_str(), 1)).collect();
        let aggregate = make_test_aggregate(&counts);
        let limits = Limits::default();

        assert_eq!(leaderboard(&aggregate, &limits, 24).len(), 10);
        assert_eq!(leaderboard(&aggregate, &limits, 24)[0].percentage, 4.2);
        assert_eq!(statistics(&aggregate, &limits).top_authors.len(), 5);
    }

    #[test]
    fn test_recent_activity_newest_first() {
        let mut aggregate = make_test_aggregate(&[("Alice", 10)]);
        for (i, month) in ["2023-01", "2023-02", "2023-03", "2023-04", "2023-05", "2023-06", "2024-01"]
            .iter()
            .enumerate()
        {
            aggregate.line_count_by_month.insert(month.to_string(), i as u32 + 1);
        }
        let activity = recent_activity(&aggregate, 6);
        assert_eq!(activity.len(), 6);
        assert_eq!(activity[0].month, "2024-01");
        assert_eq!(activity[0].lines, 7);
        assert_eq!(activity[5].month, "2023-02");
    }

    #[test]
    fn test_statistics_empty() {
        let stats = statistics(&AuthorshipAggregate::default(), &Limits::default());
        assert_eq!(stats.total_lines, 0);
        assert!(stats.top_authors.is_empty());
        assert!(stats.recent_activity.is_empty());
        assert_eq!(stats.bug_fix_percentage, 0.0);
    }
}
