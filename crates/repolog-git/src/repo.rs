// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository access
//!
//! This module opens a repository with the `git2` crate, resolves HEAD,
//! walks history lazily and computes per-commit file-change statistics.

use crate::commit::{ChangeStatus, FileChange, git_time_to_utc};
use crate::error::GitError;
use chrono::{DateTime, Utc};
use git2::{DiffFindOptions, DiffOptions, ErrorCode, Oid, Patch, Repository, Revwalk, Sort};
use std::path::Path;
use tracing::{debug, trace};

/// Name of the metadata directory inside a working tree
pub const GIT_DIR_NAME: &str = ".git";

/// A read-only handle to an opened repository.
///
/// The underlying libgit2 handle is released when this value is dropped.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open the repository rooted at `path`.
    ///
    /// `path` itself is probed as a metadata directory first (a bare
    /// repository or a `.git` directory), then `path/.git`. Parent
    /// directories are never searched.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if neither probe finds a
    /// repository, or `GitError::Storage` if one is found but cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let not_found = || GitError::RepositoryNotFound {
            path: path.display().to_string(),
        };

        if !path.is_dir() {
            return Err(not_found());
        }

        match Repository::open_bare(path) {
            Ok(repo) => {
                debug!(path = %path.display(), "Opened path as metadata directory");
                return Ok(Self { repo });
            }
            Err(e) if e.code() == ErrorCode::NotFound => {}
            Err(source) => {
                return Err(GitError::Storage {
                    path: path.display().to_string(),
                    source,
                });
            }
        }

        let dot_git = path.join(GIT_DIR_NAME);
        if !dot_git.exists() {
            return Err(not_found());
        }

        match Repository::open(&dot_git) {
            Ok(repo) => {
                debug!(path = %dot_git.display(), "Opened nested metadata directory");
                Ok(Self { repo })
            }
            Err(e) if e.code() == ErrorCode::NotFound => Err(not_found()),
            Err(source) => Err(GitError::Storage {
                path: dot_git.display().to_string(),
                source,
            }),
        }
    }

    /// Check if the repository was opened without a working tree
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    /// Get the metadata directory path
    #[must_use]
    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Resolve HEAD to the commit it points at
    ///
    /// # Errors
    ///
    /// Returns `GitError::NoHead` if HEAD is unborn or does not peel to a commit.
    pub fn head(&self) -> Result<Oid, GitError> {
        let head = self
            .repo
            .head()
            .map_err(|source| GitError::NoHead { source })?;
        let commit = head
            .peel_to_commit()
            .map_err(|source| GitError::NoHead { source })?;
        Ok(commit.id())
    }

    /// Start a newest-first walk of the commits reachable from `from`.
    ///
    /// With `since`, commits whose committer time is earlier are skipped;
    /// the walk continues past them, so the boundary is an exact filter.
    ///
    /// # Errors
    ///
    /// Returns `GitError::HistoryWalk` if the walk cannot be set up.
    pub fn log(&self, from: Oid, since: Option<DateTime<Utc>>) -> Result<CommitLog<'_>, GitError> {
        let mut revwalk = self.repo.revwalk().map_err(GitError::HistoryWalk)?;
        revwalk
            .set_sorting(Sort::TIME | Sort::TOPOLOGICAL)
            .map_err(GitError::HistoryWalk)?;
        revwalk.push(from).map_err(GitError::HistoryWalk)?;

        Ok(CommitLog {
            repo: &self.repo,
            revwalk,
            since,
        })
    }

    /// Count commits reachable from HEAD
    ///
    /// # Errors
    ///
    /// Returns `GitError` if HEAD cannot be resolved or walked.
    pub fn commit_count(&self) -> Result<usize, GitError> {
        let head = self.head()?;
        let mut count = 0;
        for commit in self.log(head, None)? {
            commit?;
            count += 1;
        }
        Ok(count)
    }

    /// Compute per-file statistics for the commit `sha` against its first
    /// parent, or against the empty tree for a root commit.
    ///
    /// # Errors
    ///
    /// Returns `GitError::StatsComputation` if the commit cannot be found or diffed.
    pub fn file_changes(&self, sha: &str) -> Result<Vec<FileChange>, GitError> {
        let stats_err = |source: git2::Error| GitError::StatsComputation {
            sha: sha.to_string(),
            source,
        };

        let oid = Oid::from_str(sha).map_err(stats_err)?;
        let commit = self.repo.find_commit(oid).map_err(stats_err)?;
        let tree = commit.tree().map_err(stats_err)?;

        let parent_tree = if commit.parent_count() > 0 {
            Some(
                commit
                    .parent(0)
                    .and_then(|parent| parent.tree())
                    .map_err(stats_err)?,
            )
        } else {
            None
        };

        let mut opts = DiffOptions::new();
        opts.ignore_whitespace(false);

        let mut diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))
            .map_err(stats_err)?;

        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true).copies(false);
        diff.find_similar(Some(&mut find_opts)).map_err(stats_err)?;

        let mut files = Vec::with_capacity(diff.deltas().len());
        for (idx, delta) in diff.deltas().enumerate() {
            let status = ChangeStatus::from(delta.status());
            let old_file = delta.old_file().path().map(|p| p.display().to_string());
            let path = delta
                .new_file()
                .path()
                .map(|p| p.display().to_string())
                .or_else(|| old_file.clone())
                .unwrap_or_else(|| "<unknown>".to_string());
            let old_path = match status {
                ChangeStatus::Renamed | ChangeStatus::Copied => old_file,
                _ => None,
            };

            let (insertions, deletions, binary) =
                match Patch::from_diff(&diff, idx).map_err(stats_err)? {
                    Some(patch) => {
                        let (_, insertions, deletions) = patch.line_stats().map_err(stats_err)?;
                        (insertions, deletions, patch.delta().flags().is_binary())
                    }
                    None => (0, 0, delta.flags().is_binary()),
                };

            files.push(FileChange {
                path,
                old_path,
                status,
                insertions,
                deletions,
                binary,
            });
        }

        Ok(files)
    }
}

/// Lazy, single-pass walk over commits, newest first.
///
/// Borrows the repository handle, so it cannot outlive it; dropping it
/// before exhaustion releases nothing but the walk itself.
pub struct CommitLog<'repo> {
    repo: &'repo Repository,
    revwalk: Revwalk<'repo>,
    since: Option<DateTime<Utc>>,
}

impl<'repo> Iterator for CommitLog<'repo> {
    type Item = Result<git2::Commit<'repo>, GitError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let oid = match self.revwalk.next()? {
                Ok(oid) => oid,
                Err(e) => return Some(Err(GitError::HistoryWalk(e))),
            };

            let commit = match self.repo.find_commit(oid) {
                Ok(commit) => commit,
                Err(e) => return Some(Err(GitError::HistoryWalk(e))),
            };

            if let Some(since) = self.since {
                if git_time_to_utc(commit.committer().when()) < since {
                    trace!(sha = %oid, "Skipping commit before since boundary");
                    continue;
                }
            }

            return Some(Ok(commit));
        }
    }
}
