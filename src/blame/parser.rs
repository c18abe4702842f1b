use std::collections::HashMap;

use super::types::{normalize_hash, BlameLine, LineAttribution};
use crate::error::ParseError;

/// Parse `git blame -L n,n --porcelain` output for a single line.
///
/// The output looks like:
/// ```text
/// <sha> <orig_line> <final_line> <num_lines>
/// author <name>
/// author-mail <<email>>
/// author-time <epoch>
/// author-tz <tz>
/// committer <name>
/// committer-mail <<email>>
/// committer-time <epoch>
/// committer-tz <tz>
/// summary <text>
/// filename <path>
/// \t<line content>
/// ```
///
/// The hash is the first token of the first line. If the first line has no
/// token, the first later line shaped like `<token><whitespace>` supplies it
/// instead. Fields git did not emit stay `None`; only a missing hash fails.
pub fn parse_line_attribution(raw: &str) -> Result<LineAttribution, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut lines = raw.lines().map(|l| l.trim_end_matches('\r'));
    let first_line = lines.next().unwrap_or_default();

    let mut attribution = LineAttribution::default();
    let mut hash = leading_token(first_line).map(normalize_hash).filter(|h| !h.is_empty());

    for line in lines {
        if hash.is_none() {
            if let Some(token) = fallback_token(line) {
                hash = Some(normalize_hash(token)).filter(|h| !h.is_empty());
                continue;
            }
        }
        apply_field(&mut attribution, line);
    }

    match hash {
        Some(hash) => {
            attribution.commit_hash = hash;
            Ok(attribution)
        }
        None => Err(ParseError::MissingHash {
            first_line: first_line.to_string(),
        }),
    }
}

/// Parse full-file `git blame --line-porcelain` (or `--porcelain`) output
/// into one [`BlameLine`] per source line, in output order.
///
/// A new block starts at every SHA header line. Plain `--porcelain` only
/// prints a commit's metadata the first time the commit appears, so later
/// blocks for the same commit are completed from the first one.
pub fn parse_file_blame(raw: &str) -> Vec<BlameLine> {
    let mut blame_lines: Vec<BlameLine> = Vec::new();
    let mut known_commits: HashMap<String, LineAttribution> = HashMap::new();
    let mut current: Option<BlameLine> = None;

    for line in raw.lines() {
        let line = line.trim_end_matches('\r');

        // Content lines echo the file and may look like headers.
        if line.starts_with('\t') {
            continue;
        }

        if let Some(header) = parse_sha_header(line) {
            finish_block(current.take(), &mut known_commits, &mut blame_lines);
            current = Some(BlameLine {
                line_number: header.final_line,
                attribution: LineAttribution {
                    commit_hash: header.hash,
                    ..Default::default()
                },
            });
            continue;
        }

        if let Some(block) = current.as_mut() {
            apply_field(&mut block.attribution, line);
        }
    }

    finish_block(current, &mut known_commits, &mut blame_lines);
    blame_lines
}

fn finish_block(
    block: Option<BlameLine>,
    known_commits: &mut HashMap<String, LineAttribution>,
    blame_lines: &mut Vec<BlameLine>,
) {
    let Some(mut block) = block else {
        return;
    };

    match known_commits.get(&block.attribution.commit_hash) {
        Some(first_seen) => block.attribution.fill_missing_from(first_seen),
        None => {
            known_commits.insert(block.attribution.commit_hash.clone(), block.attribution.clone());
        }
    }

    blame_lines.push(block);
}

/// Record one `key value` line of a porcelain block on `attribution`.
///
/// `author ` can never match `author-mail ` or `author-time ` because the
/// character after the stem differs; the same holds for `committer`.
fn apply_field(attribution: &mut LineAttribution, line: &str) {
    // Content lines are tab-prefixed and may contain anything.
    if line.starts_with('\t') {
        return;
    }

    if let Some(val) = line.strip_prefix("author-mail ") {
        attribution.author_email = Some(strip_angle_brackets(val));
    } else if let Some(val) = line.strip_prefix("author-time ") {
        attribution.author_time = val.trim().parse().ok();
    } else if let Some(val) = line.strip_prefix("author ") {
        attribution.author = Some(val.to_string());
    } else if let Some(val) = line.strip_prefix("committer-time ") {
        attribution.committer_time = val.trim().parse().ok();
    } else if let Some(val) = line.strip_prefix("committer ") {
        attribution.committer = Some(val.to_string());
    } else if let Some(val) = line.strip_prefix("summary ") {
        attribution.summary = Some(val.to_string());
    }
    // author-tz, committer-mail, committer-tz, previous, boundary, filename: unused
}

fn strip_angle_brackets(val: &str) -> String {
    val.trim().trim_start_matches('<').trim_end_matches('>').to_string()
}

/// The run of non-whitespace at the very start of `line`, if any.
fn leading_token(line: &str) -> Option<&str> {
    if line.starts_with(char::is_whitespace) {
        return None;
    }
    line.split_whitespace().next()
}

/// Like [`leading_token`], but only when whitespace follows the token.
fn fallback_token(line: &str) -> Option<&str> {
    let token = leading_token(line)?;
    line[token.len()..]
        .starts_with(char::is_whitespace)
        .then_some(token)
}

struct ShaHeader {
    hash: String,
    final_line: u32,
}

/// Parse a blame SHA header line.
///
/// Format: `[^]<40 or 64 hex chars> <orig_line> <final_line> [<num_lines>]`
fn parse_sha_header(line: &str) -> Option<ShaHeader> {
    let mut parts = line.split_whitespace();

    let hash = normalize_hash(parts.next()?);
    if hash.len() != 40 && hash.len() != 64 {
        return None;
    }
    if !hash.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let _orig_line: u32 = parts.next()?.parse().ok()?;
    let final_line: u32 = parts.next()?.parse().ok()?;

    Some(ShaHeader { hash, final_line })
}
