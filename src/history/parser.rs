use super::types::HistoryEntry;

/// Separates fields within a record (ASCII unit separator).
pub const FIELD_SEPARATOR: char = '\u{1f}';

/// Terminates each record (ASCII record separator).
pub const RECORD_SEPARATOR: char = '\u{1e}';

/// Parse `git log` output into history entries, newest first.
///
/// Expected format uses unit separator (\x1f) delimited fields and record
/// separator (\x1e) after each record:
///   `%H%x1f%an%x1f%ad%x1f%s%x1e`
///
/// Fields in order:
///   0: %H  - full commit hash
///   1: %an - author name
///   2: %ad - author date (with `--date=short`)
///   3: %s  - subject
///
/// Records without a hash (the empty tail after the final separator) are
/// dropped. Missing trailing fields read as empty strings. git's ordering is
/// kept as is.
pub fn parse_history(raw: &str) -> Vec<HistoryEntry> {
    raw.split(RECORD_SEPARATOR)
        .filter_map(|record| {
            let mut fields = record.split(FIELD_SEPARATOR);

            // git puts a newline between records; it lands at the front of the hash.
            let hash = fields.next().unwrap_or_default().trim();
            if hash.is_empty() {
                return None;
            }

            let author = fields.next().unwrap_or_default();
            let date = fields.next().unwrap_or_default();
            let message = fields.next().unwrap_or_default();

            Some(HistoryEntry {
                hash: hash.to_string(),
                author: author.to_string(),
                date: date.trim().to_string(),
                message: message.trim_end_matches(&['\r', '\n'][..]).to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_history_two_records() {
        let raw = "h1\u{1f}A\u{1f}2024-01-01\u{1f}msg1\u{1e}h2\u{1f}B\u{1f}2024-01-02\u{1f}msg2\u{1e}";
        let entries = parse_history(raw);
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0],
            HistoryEntry {
                hash: "h1".to_string(),
                author: "A".to_string(),
                date: "2024-01-01".to_string(),
                message: "msg1".to_string(),
            }
        );
        assert_eq!(entries[1].hash, "h2");
        assert_eq!(entries[1].author, "B");
        assert_eq!(entries[1].message, "msg2");
    }

    #[test]
    fn test_parse_history_newline_between_records() {
        let raw = "h1\u{1f}A\u{1f}2024-01-01\u{1f}msg1\u{1e}\nh2\u{1f}B\u{1f}2024-01-02\u{1f}msg2\u{1e}";
        let entries = parse_history(raw);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].hash, "h2");
    }

    #[test]
    fn test_parse_history_empty() {
        assert!(parse_history("").is_empty());
        assert!(parse_history("\n").is_empty());
    }

    #[test]
    fn test_parse_history_drops_hashless_records() {
        let raw = "\u{1f}A\u{1f}2024-01-01\u{1f}orphan\u{1e}h1\u{1f}B\u{1f}2024-01-02\u{1f}kept\u{1e}";
        let entries = parse_history(raw);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "kept");
    }

    #[test]
    fn test_parse_history_short_record() {
        let entries = parse_history("h1\u{1f}A");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, "");
        assert_eq!(entries[0].message, "");
    }

    #[test]
    fn test_message_may_contain_printable_delimiters() {
        let raw = "h1\u{1f}A\u{1f}2024-01-01\u{1f}Merge | split; tabs\tand, commas\u{1e}";
        let entries = parse_history(raw);
        assert_eq!(entries[0].message, "Merge | split; tabs\tand, commas");
    }
}
