pub mod blame;
pub mod classify;
pub mod config;
pub mod error;
pub mod git;
pub mod history;
pub mod render;
pub mod session;
pub mod stats;

use std::borrow::Cow;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use blame::LineAttribution;
use classify::AgeTier;
use config::{DisplayConfig, Limits, SessionConfig};
use git::GitQuery;
use render::LabelContext;
use session::{Debouncer, UserNameCache};
use stats::AuthorRank;

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ErrorResult {
    error: String,
}

fn json_error(msg: &str) -> String {
    serde_json::to_string(&ErrorResult {
        error: msg.to_string(),
    })
    .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", msg))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| json_error(&format!("Serialization error: {}", e)))
}

/// git output is mostly UTF-8, but `--porcelain` echoes file content, which
/// may not be.
fn decode(raw: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(raw)
}

/// JS hands over times as f64; anything before the epoch clamps to zero.
fn millis(now_ms: f64) -> u64 {
    now_ms.max(0.0) as u64
}

/// The attribution for a single-line blame, or `None` with the reason logged.
fn line_attribution(raw: &[u8]) -> Option<LineAttribution> {
    blame::parse_line_attribution(&decode(raw))
        .inspect_err(|e| log::debug!("no attribution: {}", e))
        .ok()
}

#[derive(Serialize)]
struct LeaderboardRow<'a> {
    #[serde(flatten)]
    rank: &'a AuthorRank,
    label: String,
}

fn leaderboard_rows(
    raw_blame: &[u8],
    limits: &Limits,
    file_line_count: u32,
    user_name: Option<&str>,
) -> String {
    let aggregate = stats::aggregate(&decode(raw_blame));
    let ranks = stats::leaderboard(&aggregate, limits, file_line_count);
    let rows: Vec<_> = ranks
        .iter()
        .map(|rank| LeaderboardRow {
            rank,
            label: render::leaderboard_label(rank, user_name),
        })
        .collect();
    to_json(&rows)
}

// ---------------------------------------------------------------------------
// WASM-exported functions
// ---------------------------------------------------------------------------

/// Parse `git blame -L n,n --porcelain` output for one line.
///
/// Returns: JSON LineAttribution, or `null` when the output holds no
/// attribution (untracked file, line past the end, empty output).
#[wasm_bindgen]
pub fn parse_line_attribution(raw_blame: &[u8]) -> String {
    match line_attribution(raw_blame) {
        Some(attribution) => to_json(&attribution),
        None => "null".to_string(),
    }
}

/// Parse full-file `git blame --line-porcelain` output.
///
/// Returns: JSON array of BlameLine objects, one per source line.
#[wasm_bindgen]
pub fn parse_file_blame(raw_blame: &[u8]) -> String {
    to_json(&blame::parse_file_blame(&decode(raw_blame)))
}

/// Parse `git log` output produced with [`git::history_format`].
///
/// Returns: JSON array of HistoryEntry objects, newest first.
#[wasm_bindgen]
pub fn parse_history(raw_log: &[u8]) -> String {
    to_json(&history::parse_history(&decode(raw_log)))
}

/// Parse `git log` output and keep entries whose `field` matches `pattern`.
///
/// Supported fields: "message", "author", "hash", "date".
/// Returns: JSON array of HistoryEntry objects, or `{ error }`.
#[wasm_bindgen]
pub fn filter_history(raw_log: &[u8], field: &str, pattern: &str) -> String {
    let entries = history::parse_history(&decode(raw_log));
    match history::filter_history(&entries, field, pattern) {
        Ok(filtered) => to_json(&filtered),
        Err(e) => json_error(&e.to_string()),
    }
}

/// Aggregate full-file blame output.
///
/// Returns: JSON AuthorshipAggregate.
#[wasm_bindgen]
pub fn aggregate_blame(raw_blame: &[u8]) -> String {
    to_json(&stats::aggregate(&decode(raw_blame)))
}

/// Top authors of a file. Percentages are against `file_line_count`, or the
/// blamed line total when it is 0.
///
/// Returns: JSON array of { rank, author, lines, percentage, label }.
#[wasm_bindgen]
pub fn leaderboard(raw_blame: &[u8], file_line_count: u32) -> String {
    leaderboard_rows(raw_blame, &Limits::default(), file_line_count, None)
}

/// Everything the statistics view needs for one file.
///
/// Returns: JSON Statistics.
#[wasm_bindgen]
pub fn statistics(raw_blame: &[u8]) -> String {
    let aggregate = stats::aggregate(&decode(raw_blame));
    to_json(&stats::statistics(&aggregate, &Limits::default()))
}

/// "3 days ago" style phrase. Both arguments are Unix seconds.
#[wasm_bindgen]
pub fn relative_age(timestamp: f64, now: f64) -> String {
    classify::relative_age(timestamp as i64, now as i64)
}

/// Age tier name ("fresh" ... "ancient"). Both arguments are Unix seconds.
#[wasm_bindgen]
pub fn age_tier(timestamp: f64, now: f64) -> String {
    AgeTier::from_timestamp(timestamp as i64, now as i64).to_string()
}

#[wasm_bindgen]
pub fn is_bug_fix(summary: &str) -> bool {
    classify::is_bug_fix(summary)
}

/// Arguments for a git query described as JSON, e.g.
/// `{"kind":"lineBlame","path":"src/a.rs","line":3}`.
///
/// Returns: JSON array of strings, or `{ error }`.
#[wasm_bindgen]
pub fn git_args(query_json: &str) -> String {
    match serde_json::from_str::<GitQuery>(query_json) {
        Ok(query) => to_json(&query.args()),
        Err(e) => json_error(&format!("Invalid git query: {}", e)),
    }
}

// ---------------------------------------------------------------------------
// Per-editor session
// ---------------------------------------------------------------------------

/// State the extension keeps between requests: display settings, the git
/// user of the current working directory, and the pending refresh.
#[wasm_bindgen]
pub struct BlameSession {
    display: DisplayConfig,
    limits: Limits,
    users: UserNameCache,
    refresh: Debouncer,
}

#[wasm_bindgen]
impl BlameSession {
    /// Create a session from a JSON SessionConfig. Missing keys take their
    /// defaults; unparseable JSON falls back to defaults entirely.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> BlameSession {
        let config = if config_json.trim().is_empty() {
            SessionConfig::default()
        } else {
            serde_json::from_str(config_json).unwrap_or_else(|e| {
                log::warn!("invalid session config, using defaults: {}", e);
                SessionConfig::default()
            })
        };
        BlameSession::from_config(config)
    }

    /// Replace the display configuration.
    ///
    /// Returns: the JSON DisplayConfig now in effect, or `{ error }` (the
    /// previous configuration stays).
    pub fn set_display_config(&mut self, config_json: &str) -> String {
        match serde_json::from_str::<DisplayConfig>(config_json) {
            Ok(display) => {
                self.display = display;
                to_json(&self.display)
            }
            Err(e) => json_error(&format!("Invalid display config: {}", e)),
        }
    }

    pub fn display_config(&self) -> String {
        to_json(&self.display)
    }

    /// Whether the host should run `git config user.name` in `workdir`.
    pub fn needs_user_refresh(&self, workdir: &str) -> bool {
        self.users.needs_refresh(workdir)
    }

    /// Record the `git config user.name` result for `workdir`.
    pub fn store_user_name(&mut self, workdir: &str, user_name: Option<String>) {
        self.users.store(workdir, user_name.as_deref());
    }

    pub fn user_name(&self) -> Option<String> {
        self.users.user_name().map(str::to_string)
    }

    /// Schedule an edit-triggered refresh, cancelling any pending one.
    /// Returns the ticket to pass to `fire_refresh` after `refresh_delay_ms`.
    pub fn schedule_refresh(&mut self, now_ms: f64) -> u32 {
        self.refresh.schedule(millis(now_ms))
    }

    pub fn cancel_refresh(&mut self) {
        self.refresh.cancel();
    }

    /// True if the refresh for `ticket` should run now.
    pub fn fire_refresh(&mut self, ticket: u32, now_ms: f64) -> bool {
        self.refresh.fire(ticket, millis(now_ms))
    }

    pub fn refresh_delay_ms(&self) -> f64 {
        self.refresh.delay_ms() as f64
    }

    /// Arguments for the history query, sized for the quick pick
    /// (`for_pick`) or the history list.
    pub fn history_args(&self, path: &str, for_pick: bool) -> String {
        let limit = if for_pick {
            self.limits.pick_history
        } else {
            self.limits.history_list
        };
        to_json(
            &GitQuery::History {
                path: path.to_string(),
                limit,
            }
            .args(),
        )
    }

    /// Labels for a line, from single-line blame output. `now` is Unix seconds.
    ///
    /// Returns: JSON LineLabels, or `null` when the line has no attribution.
    pub fn line_labels(&self, raw_blame: &[u8], now: f64) -> String {
        let Some(attribution) = line_attribution(raw_blame) else {
            return "null".to_string();
        };
        let ctx = LabelContext {
            config: &self.display,
            user_name: self.users.user_name(),
            now: now as i64,
            summary_width: self.limits.summary_width,
        };
        to_json(&render::line_labels(&attribution, &ctx))
    }

    /// Leaderboard rows labelled for this session's user.
    pub fn leaderboard(&self, raw_blame: &[u8], file_line_count: u32) -> String {
        leaderboard_rows(raw_blame, &self.limits, file_line_count, self.users.user_name())
    }

    pub fn statistics(&self, raw_blame: &[u8]) -> String {
        let aggregate = stats::aggregate(&decode(raw_blame));
        to_json(&stats::statistics(&aggregate, &self.limits))
    }
}

impl BlameSession {
    pub fn from_config(config: SessionConfig) -> Self {
        let refresh = Debouncer::new(config.limits.debounce_ms);
        BlameSession {
            display: config.display,
            limits: config.limits,
            users: UserNameCache::new(),
            refresh,
        }
    }
}

impl Default for BlameSession {
    fn default() -> Self {
        BlameSession::from_config(SessionConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
