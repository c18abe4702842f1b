use std::fmt;

use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;

/// Units for [`relative_age`], largest first. Month and year are fixed
/// 30 and 365 day spans.
const INTERVALS: [(&str, i64); 6] = [
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("week", 604_800),
    ("day", SECONDS_PER_DAY),
    ("hour", 3_600),
    ("minute", 60),
];

/// Describe how long ago `timestamp` was, relative to `now` (both Unix
/// seconds), as "3 days ago", "1 hour ago" or "just now".
///
/// The largest unit with a whole count of at least one wins. Timestamps in
/// the future read as "just now".
pub fn relative_age(timestamp: i64, now: i64) -> String {
    let seconds = now.saturating_sub(timestamp);

    for (name, unit) in INTERVALS {
        let count = seconds / unit;
        if count >= 1 {
            let plural = if count > 1 { "s" } else { "" };
            return format!("{} {}{} ago", count, name, plural);
        }
    }

    "just now".to_string()
}

/// Seven ordered buckets of code age, newest first.
///
/// The host picks iconography per tier; [`AgeTier::glyph`] is the default set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgeTier {
    /// Less than a day old.
    Fresh,
    /// 1 to 6 days.
    Recent,
    /// 7 to 29 days.
    Growing,
    /// 30 to 89 days.
    Maturing,
    /// 90 to 364 days.
    Established,
    /// 365 to 729 days.
    Veteran,
    /// Two years or older.
    Ancient,
}

impl AgeTier {
    pub const ALL: [AgeTier; 7] = [
        AgeTier::Fresh,
        AgeTier::Recent,
        AgeTier::Growing,
        AgeTier::Maturing,
        AgeTier::Established,
        AgeTier::Veteran,
        AgeTier::Ancient,
    ];

    /// Map whole elapsed days onto a tier.
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d < 1 => AgeTier::Fresh,
            d if d < 7 => AgeTier::Recent,
            d if d < 30 => AgeTier::Growing,
            d if d < 90 => AgeTier::Maturing,
            d if d < 365 => AgeTier::Established,
            d if d < 730 => AgeTier::Veteran,
            _ => AgeTier::Ancient,
        }
    }

    /// Tier for a commit made at `timestamp`, seen from `now` (Unix seconds).
    pub fn from_timestamp(timestamp: i64, now: i64) -> Self {
        let days = now.saturating_sub(timestamp).div_euclid(SECONDS_PER_DAY);
        Self::from_days(days)
    }

    pub fn glyph(self) -> &'static str {
        match self {
            AgeTier::Fresh => "🔥",
            AgeTier::Recent => "✨",
            AgeTier::Growing => "🌱",
            AgeTier::Maturing => "🌿",
            AgeTier::Established => "🌳",
            AgeTier::Veteran => "🏛️",
            AgeTier::Ancient => "🦴",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgeTier::Fresh => "fresh",
            AgeTier::Recent => "recent",
            AgeTier::Growing => "growing",
            AgeTier::Maturing => "maturing",
            AgeTier::Established => "established",
            AgeTier::Veteran => "veteran",
            AgeTier::Ancient => "ancient",
        }
    }
}

impl fmt::Display for AgeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
