// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Project-level aggregation of commit history
//!
//! A [`Project`] names itself after the final segment of its path and
//! collects every commit reachable from HEAD, together with the files each
//! commit touched.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

use crate::commit::{CommitRecord, Commits};
use crate::error::GitError;
use crate::repo::GitRepo;
use crate::since::parse_since;

/// Environment variable read by [`ParseOptions::from_env`]
pub const SINCE_ENV_VAR: &str = "GIT_SINCE";

/// Options for a single [`Project::parse_commits`] call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Lower bound on committer date, as `YYYY-MM-DD`. Blank means unbounded.
    pub since: Option<String>,
}

impl ParseOptions {
    /// Options that walk the whole history
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Only keep commits since the given `YYYY-MM-DD` date
    #[must_use]
    pub fn since(mut self, date: impl Into<String>) -> Self {
        self.since = Some(date.into());
        self
    }

    /// Read the since boundary from `GIT_SINCE`, if set
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            since: std::env::var(SINCE_ENV_VAR).ok(),
        }
    }
}

/// A repository's name and its commit history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Final segment of the absolute project path
    pub name: String,
    /// Commits in walk order, newest first
    pub commits: Commits,
    #[serde(skip)]
    source_path: PathBuf,
}

impl Project {
    /// Create a project for the repository at `path` with no commits yet
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidPath` if `path` cannot be made absolute.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let name = project_name(path)?;
        Ok(Self {
            name,
            commits: Commits::new(),
            source_path: path.to_path_buf(),
        })
    }

    /// Path the project was created with
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Walk the history reachable from HEAD and attach file-change statistics.
    ///
    /// Commits are appended to `self.commits` as they are walked. On error
    /// the walk stops and whatever was appended so far stays in place, so
    /// callers must treat the contents as incomplete whenever this fails.
    /// A statistics failure keeps every commit, but only those newer than the
    /// failing one carry file changes.
    ///
    /// # Errors
    ///
    /// Returns the first `GitError` hit while opening, resolving HEAD,
    /// parsing the since boundary, walking, or computing statistics.
    pub fn parse_commits(&mut self, options: &ParseOptions) -> Result<(), GitError> {
        let repo = GitRepo::open(&self.source_path)?;
        let head = repo.head()?;

        let since = match options.since.as_deref() {
            Some(value) => parse_since(value)?,
            None => None,
        };
        debug!(project = %self.name, head = %head, since = ?since, "Walking history");

        for commit in repo.log(head, since)? {
            self.commits.push(CommitRecord::from_git(&commit?));
        }

        self.commits.parse_file_changes(&repo)?;

        info!(
            project = %self.name,
            commits = self.commits.len(),
            "Parsed commit history"
        );
        Ok(())
    }
}

/// Final segment of the absolute, lexically normalized form of `path`.
///
/// The filesystem root has no final segment and yields an empty name.
///
/// # Errors
///
/// Returns `GitError::InvalidPath` if `path` cannot be made absolute.
pub fn project_name(path: &Path) -> Result<String, GitError> {
    let absolute = std::path::absolute(path).map_err(|source| GitError::InvalidPath {
        path: path.display().to_string(),
        source,
    })?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other.as_os_str()),
        }
    }

    Ok(normalized
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default())
}
