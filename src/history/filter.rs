use regex::Regex;

use super::types::HistoryEntry;
use crate::error::FilterError;

/// Filter history entries by a regex pattern on a specified field.
///
/// Supported fields: "message" (or "subject"), "author", "hash" (or "sha"),
/// and "date". Order of the surviving entries is preserved.
pub fn filter_history(
    entries: &[HistoryEntry],
    field: &str,
    pattern: &str,
) -> Result<Vec<HistoryEntry>, FilterError> {
    let select: fn(&HistoryEntry) -> &str = match field {
        "message" | "subject" => |e| e.message.as_str(),
        "author" => |e| e.author.as_str(),
        "hash" | "sha" => |e| e.hash.as_str(),
        "date" => |e| e.date.as_str(),
        other => return Err(FilterError::UnknownField(other.to_string())),
    };

    let re = Regex::new(pattern).map_err(|e| FilterError::InvalidPattern(e.to_string()))?;

    Ok(entries
        .iter()
        .filter(|entry| re.is_match(select(entry)))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_history() -> Vec<HistoryEntry> {
        vec![
            HistoryEntry {
                hash: "aaa111".to_string(),
                author: "Alice".to_string(),
                date: "2024-03-02".to_string(),
                message: "Fix critical bug in parser".to_string(),
            },
            HistoryEntry {
                hash: "bbb222".to_string(),
                author: "Bob".to_string(),
                date: "2023-11-20".to_string(),
                message: "Add new feature for history view".to_string(),
            },
        ]
    }

    #[test]
    fn test_filter_by_author() {
        let result = filter_history(&make_test_history(), "author", "Alice").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].author, "Alice");
    }

    #[test]
    fn test_filter_by_message() {
        let result = filter_history(&make_test_history(), "message", "(?i)BUG").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].hash, "aaa111");
    }

    #[test]
    fn test_filter_by_hash_and_date() {
        let history = make_test_history();
        assert_eq!(filter_history(&history, "sha", "^bbb").unwrap()[0].hash, "bbb222");
        assert_eq!(filter_history(&history, "date", "^2024-").unwrap().len(), 1);
    }

    #[test]
    fn test_filter_no_match() {
        let result = filter_history(&make_test_history(), "author", "Charlie").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_invalid_regex() {
        let result = filter_history(&make_test_history(), "author", "[invalid");
        assert!(matches!(result, Err(FilterError::InvalidPattern(_))));
    }

    #[test]
    fn test_filter_unknown_field() {
        let result = filter_history(&make_test_history(), "committer", "x");
        assert_eq!(result, Err(FilterError::UnknownField("committer".to_string())));
    }
}
