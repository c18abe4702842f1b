//! Text the extension shows for a blamed line: the inline annotation, the
//! status bar entry, its tooltip, and the hover card.
//!
//! Everything here is a pure function of the attribution, the display
//! configuration, the cached git user and the current time.

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::OffsetDateTime;

use crate::blame::LineAttribution;
use crate::classify::{is_bug_fix, relative_age, AgeTier};
use crate::config::DisplayConfig;
use crate::history::HistoryEntry;
use crate::stats::AuthorRank;

const YOU: &str = "You";
const UNKNOWN_AUTHOR: &str = "Unknown";
const WORKING_TREE: &str = "Working Tree";
const BUG_ICON: &str = "🐛 ";
const PRAISE_ICONS: [&str; 9] = ["💪", "🎯", "⚡", "🚀", "🌟", "✨", "🎨", "👑", "🏆"];
const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Inputs shared by every label of one render pass.
#[derive(Debug, Clone, Copy)]
pub struct LabelContext<'a> {
    pub config: &'a DisplayConfig,
    /// `user.name` of the current working directory, if known.
    pub user_name: Option<&'a str>,
    /// Current time, Unix seconds.
    pub now: i64,
    /// Maximum summary length (in characters) for inline annotations.
    pub summary_width: usize,
}

/// All labels for one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineLabels {
    /// End-of-line decoration; absent when git gave no author time.
    pub annotation: Option<String>,
    pub status_text: String,
    pub tooltip: String,
    pub hover_markdown: String,
    pub is_uncommitted: bool,
    pub is_bug_fix: bool,
    pub age_tier: Option<AgeTier>,
}

pub fn line_labels(attribution: &LineAttribution, ctx: &LabelContext<'_>) -> LineLabels {
    let config = ctx.config;
    let uncommitted = attribution.is_uncommitted();
    let bug_fix = attribution.summary.as_deref().is_some_and(is_bug_fix);
    let age_tier = attribution
        .author_time
        .map(|time| AgeTier::from_timestamp(time, ctx.now));

    let time_ago = attribution
        .author_time
        .map_or_else(|| "unknown time".to_string(), |time| relative_age(time, ctx.now));
    let date = attribution
        .author_time
        .map_or_else(|| "unknown".to_string(), format_timestamp);

    let display_author = display_author(attribution, ctx.user_name);
    let summary = summary_text(attribution.summary.as_deref());
    let short_hash = if uncommitted {
        WORKING_TREE
    } else {
        attribution.short_hash()
    };

    let bug_icon = if config.bug_detective && bug_fix { BUG_ICON } else { "" };
    let age_glyph = match age_tier {
        Some(tier) if config.show_emojis => format!("{} ", tier.glyph()),
        _ => String::new(),
    };

    let annotation = attribution.author_time.map(|_| {
        let prefix = if config.praise_mode { "👏 " } else { "" };
        format!(
            " {}{}{}{} ({}) - {}",
            prefix,
            bug_icon,
            age_glyph,
            display_author,
            time_ago,
            truncate_summary(summary, ctx.summary_width)
        )
    });

    let status_text = format!(
        "{}{}$(person) {} - $(calendar) {} - $(git-commit) {}",
        bug_icon, age_glyph, display_author, time_ago, short_hash
    );

    let mut tooltip = String::new();
    if config.praise_mode {
        tooltip.push_str("🌟 ");
    }
    tooltip.push_str(&format!("Author: {}", hover_author(attribution, ctx.user_name)));
    if let Some(email) = attribution.valid_email() {
        tooltip.push_str(&format!("\nEmail: {}", email));
    }
    tooltip.push_str(&format!(
        "\nSummary: {}\n\nCommit: {}\nDate: {}",
        summary, short_hash, date
    ));

    let hover_markdown = hover_markdown(attribution, config, &age_glyph, &date, bug_fix);

    LineLabels {
        annotation,
        status_text,
        tooltip,
        hover_markdown,
        is_uncommitted: uncommitted,
        is_bug_fix: bug_fix,
        age_tier,
    }
}

fn hover_markdown(
    attribution: &LineAttribution,
    config: &DisplayConfig,
    age_glyph: &str,
    date: &str,
    bug_fix: bool,
) -> String {
    let author = attribution.author.as_deref().unwrap_or(UNKNOWN_AUTHOR);
    let mut md = String::new();

    md.push_str(if config.praise_mode {
        "**🌟 Code Authorship**\n\n"
    } else {
        "**Blame Information**\n\n"
    });
    md.push_str(age_glyph);
    if config.praise_mode {
        md.push_str(&format!(
            "Crafted by: **{}** {}\n\n",
            author,
            praise_icon(&attribution.commit_hash)
        ));
    } else {
        md.push_str(&format!("Author: {}\n\n", author));
    }
    if let Some(email) = attribution.valid_email() {
        md.push_str(&format!("Email: {}\n\n", email));
    }
    md.push_str(&format!("Date: {}\n\n", date));
    if bug_fix && config.bug_detective {
        md.push_str("🐛 **Bug Fix Detected!**\n\n");
    }
    md.push_str(&format!(
        "Summary: {}\n\n",
        attribution.summary.as_deref().unwrap_or_default()
    ));
    md.push_str(&format!(
        "Commit: `{}`",
        attribution.commit_hash.get(..8).unwrap_or(&attribution.commit_hash)
    ));
    md
}

/// Name to show for the line's author: "You" for your own and uncommitted
/// lines (or your configured name for the latter when known).
pub fn display_author(attribution: &LineAttribution, user_name: Option<&str>) -> String {
    if attribution.is_uncommitted() {
        return user_name.unwrap_or(YOU).to_string();
    }
    match attribution.author.as_deref() {
        Some(author) if Some(author) == user_name => YOU.to_string(),
        Some(author) if !author.is_empty() => author.to_string(),
        _ => UNKNOWN_AUTHOR.to_string(),
    }
}

/// Author line for tooltips, which spells out uncommitted state.
pub fn hover_author(attribution: &LineAttribution, user_name: Option<&str>) -> String {
    if attribution.is_uncommitted() {
        return match user_name {
            Some(name) => format!("{} (uncommitted)", name),
            None => "Uncommitted changes".to_string(),
        };
    }
    match attribution.author.as_deref() {
        Some(author) if !author.is_empty() => author.to_string(),
        _ => UNKNOWN_AUTHOR.to_string(),
    }
}

/// The summary to display, with placeholders for missing and working-tree summaries.
pub fn summary_text(summary: Option<&str>) -> &str {
    match summary {
        None | Some("") => "No commit message",
        Some(s) if s.to_ascii_lowercase().contains("not committed yet") => "Uncommitted changes",
        Some(s) => s,
    }
}

/// Cut `summary` to `max_chars` characters, ending in "..." when shortened.
pub fn truncate_summary(summary: &str, max_chars: usize) -> String {
    if summary.chars().count() <= max_chars {
        return summary.to_string();
    }
    let kept: String = summary.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Label for a leaderboard row: medal for the podium, "N. " below it.
pub fn leaderboard_label(rank: &AuthorRank, user_name: Option<&str>) -> String {
    let marker = match MEDALS.get(rank.rank.wrapping_sub(1)) {
        Some(medal) => format!("{} ", medal),
        None => format!("{}. ", rank.rank),
    };
    let author = if Some(rank.author.as_str()) == user_name {
        YOU
    } else {
        rank.author.as_str()
    };
    format!("{}{}", marker, author)
}

/// Title of the diff between a historical revision and the working copy.
pub fn diff_title(file_name: &str, entry: &HistoryEntry) -> String {
    format!(
        "{} ({}) ↔ {} (Current)",
        file_name,
        entry.short_hash(),
        file_name
    )
}

/// Label for a history list row.
pub fn history_label(entry: &HistoryEntry) -> &str {
    if entry.message.is_empty() {
        "No message"
    } else {
        &entry.message
    }
}

/// `YYYY-MM-DD HH:MM:SS UTC`, or the raw number if out of range.
pub fn format_timestamp(timestamp: i64) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
    OffsetDateTime::from_unix_timestamp(timestamp)
        .ok()
        .and_then(|datetime| datetime.format(&format).ok())
        .unwrap_or_else(|| timestamp.to_string())
}

/// A praise glyph picked from the commit hash, so a line always gets the same one.
fn praise_icon(commit_hash: &str) -> &'static str {
    let sum: usize = commit_hash.bytes().map(usize::from).sum();
    PRAISE_ICONS[sum % PRAISE_ICONS.len()]
}
