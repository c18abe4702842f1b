pub mod aggregate;
pub mod ranking;

pub use aggregate::{aggregate, aggregate_lines, month_bucket, AuthorLines, AuthorshipAggregate};
pub use ranking::{
    leaderboard, rank_authors, recent_activity, statistics, AuthorRank, MonthActivity, Statistics,
};
