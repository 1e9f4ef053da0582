// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! repolog-git: commit history and file-change statistics
//!
//! This library crate reads the history reachable from a repository's HEAD
//! and records, for every commit, which files it touched and by how many
//! lines.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use repolog_git::{ParseOptions, Project};
//!
//! let mut project = Project::new(".").expect("project");
//! project
//!     .parse_commits(&ParseOptions::unbounded().since("2024-01-15"))
//!     .expect("parse commits");
//!
//! for c in &project.commits {
//!     println!("{} +{} -{} {}", c.short_sha(), c.insertions(), c.deletions(), c.subject());
//! }
//! ```

pub mod commit;
pub mod error;
pub mod project;
pub mod repo;
pub mod since;

pub use commit::{ChangeStatus, CommitRecord, Commits, FileChange};
pub use error::GitError;
pub use project::{ParseOptions, Project};
pub use repo::{CommitLog, GitRepo};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::{CommitRecord, Commits, FileChange};
    pub use crate::error::GitError;
    pub use crate::project::{ParseOptions, Project};
    pub use crate::repo::GitRepo;
}
