// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for repolog-git

use thiserror::Error;

/// Errors that can occur while reading a repository's history
#[derive(Debug, Error)]
pub enum GitError {
    /// The project path could not be resolved to an absolute path
    #[error("Invalid path '{path}': {source}")]
    InvalidPath {
        /// The path as supplied by the caller
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Neither the path nor its `.git` subdirectory is a repository
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was probed for a repository
        path: String,
    },

    /// Repository metadata exists but could not be read
    #[error("Repository storage error at {path}: {source}")]
    Storage {
        /// The path of the repository that failed to open
        path: String,
        /// Underlying libgit2 error
        #[source]
        source: git2::Error,
    },

    /// HEAD is unborn or does not point at a commit
    #[error("Repository has no HEAD commit: {source}")]
    NoHead {
        /// Underlying libgit2 error
        #[source]
        source: git2::Error,
    },

    /// The since boundary is not a `YYYY-MM-DD` date
    #[error("Invalid since date '{value}' (expected YYYY-MM-DD): {source}")]
    InvalidDate {
        /// The raw value that failed to parse
        value: String,
        /// Underlying chrono parse error
        #[source]
        source: chrono::ParseError,
    },

    /// Advancing the commit history walk failed
    #[error("History walk failed: {0}")]
    HistoryWalk(#[source] git2::Error),

    /// Computing file-change statistics for a commit failed
    #[error("Failed to compute file changes for {sha}: {source}")]
    StatsComputation {
        /// SHA of the commit being diffed
        sha: String,
        /// Underlying libgit2 error
        #[source]
        source: git2::Error,
    },
}
