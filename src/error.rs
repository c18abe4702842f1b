//! Error types for blame parsing, history filtering, and git invocation.
//!
//! None of these are fatal to the host. The wasm layer turns them into
//! `null` (no attribution) or `{"error": ...}` JSON.

use std::io;

use thiserror::Error;

/// A blame block that could not be turned into a [`LineAttribution`].
///
/// [`LineAttribution`]: crate::blame::LineAttribution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// git produced no output at all.
    #[error("blame output is empty")]
    Empty,

    /// The output has text but no token that could be a commit hash.
    #[error("blame output has no commit hash (first line: {first_line:?})")]
    MissingHash {
        /// The first line of the offending output, for diagnostics.
        first_line: String,
    },
}

/// Failure to obtain output from the git binary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GitError {
    /// The git process could not be started (binary missing, bad cwd).
    #[error("failed to run {binary:?} in {workdir}")]
    SpawnFailed {
        /// The git executable that was invoked.
        binary: String,
        /// The working directory the command ran in.
        workdir: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// git ran but exited unsuccessfully, e.g. for an untracked file.
    #[error("git {args} failed ({exit_status}): {stderr}")]
    Failed {
        /// The arguments, joined with spaces.
        args: String,
        /// A human-readable description of the exit status.
        exit_status: String,
        /// Trimmed stderr output.
        stderr: String,
    },
}

/// Why no data is available for a request.
///
/// Both cases are expected and frequent (untracked files, lines past the
/// end of the committed file); callers render "no data" and move on.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Unavailable {
    /// git is missing, or refused the query.
    #[error("git unavailable")]
    ToolUnavailable(#[from] GitError),

    /// git answered, but the answer had no usable attribution.
    #[error("incomplete blame output")]
    ParseIncomplete(#[from] ParseError),
}

/// An error while filtering history entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FilterError {
    /// The pattern is not a valid regular expression.
    #[error("invalid regex pattern: {0}")]
    InvalidPattern(String),

    /// The field name is not one of `message`, `author`, `hash`, `date`.
    #[error("unknown history field: {0:?}")]
    UnknownField(String),
}
