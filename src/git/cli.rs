//! Running git as a subprocess. Not available on wasm32, where the host
//! runs the commands built by [`GitQuery::args`] itself.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::query::GitQuery;
use crate::blame::{parse_line_attribution, LineAttribution};
use crate::error::{GitError, Unavailable};
use crate::history::{parse_history, HistoryEntry};
use crate::session::UserNameCache;
use crate::stats::{aggregate, AuthorshipAggregate};

/// Reads the git binary from `$GIT`, falling back to `git` if unset or blank.
fn git_binary_from_env() -> String {
    std::env::var("GIT")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "git".to_string())
}

/// A git binary bound to one working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCli {
    binary: String,
    workdir: PathBuf,
}

impl GitCli {
    /// Uses `$GIT` or `git` from `PATH`.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self::with_binary(git_binary_from_env(), workdir)
    }

    pub fn with_binary(binary: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        GitCli {
            binary: binary.into(),
            workdir: workdir.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run `query` and return stdout (lossily decoded). No retries.
    pub fn run(&self, query: &GitQuery) -> Result<String, GitError> {
        let args = query.args();
        let output = Command::new(&self.binary)
            .current_dir(&self.workdir)
            .args(&args)
            .output()
            .map_err(|source| GitError::SpawnFailed {
                binary: self.binary.clone(),
                workdir: self.workdir.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            let exit_status = match output.status.code() {
                Some(code) => format!("exit code {}", code),
                None => "killed by signal".to_string(),
            };
            return Err(GitError::Failed {
                args: args.join(" "),
                exit_status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Attribution for one 1-based line of `path`.
    pub fn line_attribution(&self, path: &str, line: u32) -> Result<LineAttribution, Unavailable> {
        let stdout = self
            .run(&GitQuery::LineBlame {
                path: path.to_string(),
                line,
            })
            .inspect_err(|e| log::warn!("blame of {}:{} unavailable: {}", path, line, e))?;

        let attribution = parse_line_attribution(&stdout)
            .inspect_err(|e| log::debug!("blame of {}:{} incomplete: {}", path, line, e))?;
        Ok(attribution)
    }

    /// Aggregate statistics for the whole of `path`.
    pub fn file_aggregate(&self, path: &str) -> Result<AuthorshipAggregate, Unavailable> {
        let stdout = self
            .run(&GitQuery::FileBlame {
                path: path.to_string(),
            })
            .inspect_err(|e| log::warn!("blame of {} unavailable: {}", path, e))?;
        Ok(aggregate(&stdout))
    }

    /// Up to `limit` revisions of `path`, newest first.
    pub fn history(&self, path: &str, limit: usize) -> Result<Vec<HistoryEntry>, Unavailable> {
        let stdout = self
            .run(&GitQuery::History {
                path: path.to_string(),
                limit,
            })
            .inspect_err(|e| log::warn!("history of {} unavailable: {}", path, e))?;
        Ok(parse_history(&stdout))
    }

    /// Contents of `path` at `revision`.
    pub fn show_at_revision(&self, revision: &str, path: &str) -> Result<String, Unavailable> {
        let contents = self.run(&GitQuery::ShowAtRevision {
            revision: revision.to_string(),
            path: path.to_string(),
        })?;
        Ok(contents)
    }

    /// The configured `user.name`, or `None` when unset or git fails.
    pub fn user_name(&self) -> Option<String> {
        match self.run(&GitQuery::UserName) {
            Ok(stdout) => Some(stdout.trim().to_string()).filter(|s| !s.is_empty()),
            Err(e) => {
                log::debug!("no git user.name in {}: {}", self.workdir.display(), e);
                None
            }
        }
    }

    /// Refresh `cache` for this working directory if it is stale.
    pub fn refresh_user_name(&self, cache: &mut UserNameCache) {
        let workdir = self.workdir.display().to_string();
        if cache.needs_refresh(&workdir) {
            let name = self.user_name();
            cache.store(&workdir, name.as_deref());
        }
    }
}
