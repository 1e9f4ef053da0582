//! Commit records and their file-change statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use tracing::{debug, trace};

use crate::error::GitError;
use crate::repo::GitRepo;

/// How a file was touched by a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    /// File did not exist in the parent
    Added,
    /// File content changed
    Modified,
    /// File was removed
    Deleted,
    /// File moved, possibly with edits
    Renamed,
    /// File copied from another path
    Copied,
    /// File changed kind (e.g. regular file to symlink)
    TypeChanged,
    /// Anything libgit2 reports that the above don't cover
    Unknown,
}

impl From<git2::Delta> for ChangeStatus {
    fn from(delta: git2::Delta) -> Self {
        match delta {
            git2::Delta::Added => Self::Added,
            git2::Delta::Modified => Self::Modified,
            git2::Delta::Deleted => Self::Deleted,
            git2::Delta::Renamed => Self::Renamed,
            git2::Delta::Copied => Self::Copied,
            git2::Delta::Typechange => Self::TypeChanged,
            _ => Self::Unknown,
        }
    }
}

/// Per-file statistics for one commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Path of the file after the change (before it, for deletions)
    pub path: String,
    /// Previous path, only set for renames and copies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_path: Option<String>,
    /// Kind of change
    pub status: ChangeStatus,
    /// Lines added
    pub insertions: usize,
    /// Lines removed
    pub deletions: usize,
    /// Binary files carry no line counts
    #[serde(default)]
    pub binary: bool,
}

/// One commit from the history walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Author timestamp
    pub date: DateTime<Utc>,
    /// Committer name
    pub committer: String,
    /// Committer email
    pub committer_email: String,
    /// Committer timestamp
    pub committed_at: DateTime<Utc>,
    /// Full commit message
    pub message: String,
    /// Parent commit SHAs
    pub parents: Vec<String>,
    /// Files touched by this commit, relative to its first parent
    #[serde(default)]
    pub file_changes: Vec<FileChange>,
}

/// Convert a libgit2 time to UTC, clamping out-of-range values to the epoch.
///
/// A clamped commit sorts before any since boundary and is filtered out.
pub(crate) fn git_time_to_utc(time: git2::Time) -> DateTime<Utc> {
    DateTime::from_timestamp(time.seconds(), 0).unwrap_or_else(|| {
        trace!(seconds = time.seconds(), "Timestamp out of range, clamping to epoch");
        DateTime::UNIX_EPOCH
    })
}

/// Decode signature or message bytes, replacing invalid UTF-8
fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

impl CommitRecord {
    /// Build an owned record from a libgit2 commit; file changes start empty.
    ///
    /// Text that is not valid UTF-8 (e.g. a Latin-1 message) is decoded
    /// lossily rather than dropped.
    #[must_use]
    pub fn from_git(commit: &git2::Commit<'_>) -> Self {
        let author = commit.author();
        let committer = commit.committer();

        Self {
            sha: commit.id().to_string(),
            author: lossy(author.name_bytes()),
            author_email: lossy(author.email_bytes()),
            date: git_time_to_utc(author.when()),
            committer: lossy(committer.name_bytes()),
            committer_email: lossy(committer.email_bytes()),
            committed_at: git_time_to_utc(committer.when()),
            message: lossy(commit.message_bytes()),
            parents: commit.parent_ids().map(|id| id.to_string()).collect(),
            file_changes: Vec::new(),
        }
    }

    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        &self.sha[..7.min(self.sha.len())]
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Check if this is a merge commit (has multiple parents)
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Check if this is a root commit (has no parents)
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Total lines added across all files
    #[must_use]
    pub fn insertions(&self) -> usize {
        self.file_changes.iter().map(|f| f.insertions).sum()
    }

    /// Total lines removed across all files
    #[must_use]
    pub fn deletions(&self) -> usize {
        self.file_changes.iter().map(|f| f.deletions).sum()
    }
}

/// Commits in walk order, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commits(Vec<CommitRecord>);

impl Commits {
    /// Create an empty sequence
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a record, keeping walk order
    pub fn push(&mut self, record: CommitRecord) {
        self.0.push(record);
    }

    /// Attach file-change statistics to every record.
    ///
    /// Stops at the first failure; records before it keep their statistics.
    ///
    /// # Errors
    ///
    /// Returns `GitError::StatsComputation` if a commit cannot be found or diffed.
    pub fn parse_file_changes(&mut self, repo: &GitRepo) -> Result<(), GitError> {
        for record in &mut self.0 {
            let changes = repo.file_changes(&record.sha)?;
            debug!(
                sha = %record.short_sha(),
                files = changes.len(),
                "Computed file changes"
            );
            record.file_changes = changes;
        }
        Ok(())
    }

    /// Consume into the underlying vector
    #[must_use]
    pub fn into_inner(self) -> Vec<CommitRecord> {
        self.0
    }
}

impl Deref for Commits {
    type Target = [CommitRecord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<CommitRecord>> for Commits {
    fn from(records: Vec<CommitRecord>) -> Self {
        Self(records)
    }
}

impl<'a> IntoIterator for &'a Commits {
    type Item = &'a CommitRecord;
    type IntoIter = std::slice::Iter<'a, CommitRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Commits {
    type Item = CommitRecord;
    type IntoIter = std::vec::IntoIter<CommitRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
