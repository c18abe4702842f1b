use serde::{Deserialize, Serialize};

use crate::history::{FIELD_SEPARATOR, RECORD_SEPARATOR};

/// A question the extension asks git. [`GitQuery::args`] turns it into the
/// argument list for the git binary; the host runs it in the repository's
/// working directory and hands stdout to the matching parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GitQuery {
    /// Porcelain blame for a single 1-based line.
    LineBlame { path: String, line: u32 },
    /// Line-porcelain blame for the whole file.
    FileBlame { path: String },
    /// Newest-first history of a file across renames, at most `limit` entries.
    History { path: String, limit: usize },
    /// File contents at a revision. The revision comes from the host, so it
    /// is placed after `--end-of-options` and can never be read as a flag.
    ShowAtRevision { revision: String, path: String },
    /// The configured `user.name`.
    UserName,
}

impl GitQuery {
    pub fn args(&self) -> Vec<String> {
        match self {
            GitQuery::LineBlame { path, line } => vec![
                "blame".to_string(),
                "-L".to_string(),
                format!("{},{}", line, line),
                "--porcelain".to_string(),
                "--".to_string(),
                path.clone(),
            ],
            GitQuery::FileBlame { path } => vec![
                "blame".to_string(),
                "--line-porcelain".to_string(),
                "--".to_string(),
                path.clone(),
            ],
            GitQuery::History { path, limit } => vec![
                "log".to_string(),
                "--follow".to_string(),
                format!("--pretty=format:{}", history_format()),
                "--date=short".to_string(),
                "-n".to_string(),
                limit.to_string(),
                "--".to_string(),
                path.clone(),
            ],
            GitQuery::ShowAtRevision { revision, path } => vec![
                "show".to_string(),
                "--end-of-options".to_string(),
                format!("{}:{}", revision, to_git_path(path)),
            ],
            GitQuery::UserName => vec!["config".to_string(), "user.name".to_string()],
        }
    }
}

/// The `--pretty` format matching [`parse_history`](crate::history::parse_history):
/// hash, author, date, subject.
pub fn history_format() -> String {
    format!(
        "%H{f}%an{f}%ad{f}%s{r}",
        f = FIELD_SEPARATOR,
        r = RECORD_SEPARATOR
    )
}

/// git wants forward slashes in `<rev>:<path>`, even on Windows.
pub fn to_git_path(path: &str) -> String {
    path.replace('\\', "/")
}
