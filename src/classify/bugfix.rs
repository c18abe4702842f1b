use std::sync::OnceLock;

use regex::Regex;

/// Words that mark a commit summary as a bug fix. Matched whole-word and
/// case-insensitively, so "prefixed" or "fixes" do not count. Word
/// boundaries are ASCII: a non-ASCII letter next to a keyword does not
/// join it into a longer word.
pub const BUG_FIX_KEYWORDS: [&str; 9] = [
    "fix",
    "bug",
    "issue",
    "patch",
    "hotfix",
    "defect",
    "error",
    "crash",
    "regression",
];

fn bug_fix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"(?i)(?-u:\b)(?:{})(?-u:\b)", BUG_FIX_KEYWORDS.join("|"));
        Regex::new(&pattern).expect("bug-fix keyword pattern is a valid regex")
    })
}

/// Whether a commit summary reads like a bug fix.
pub fn is_bug_fix(summary: &str) -> bool {
    !summary.is_empty() && bug_fix_regex().is_match(summary)
}
