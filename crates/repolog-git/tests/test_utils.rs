// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test utilities for repolog-git integration tests
//!
//! Fixture repositories are written directly through `git2` so every commit
//! gets a fixed author/committer time, independent of the host's git setup.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use git2::{Oid, Repository, Signature, Time};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

// ============================================================================
// Temporary Directory Management
// ============================================================================

/// Counter for generating unique test directory names
static TEST_DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A temporary directory that is removed when dropped
pub struct TempTestDir {
    path: PathBuf,
}

impl TempTestDir {
    /// Create a unique directory under the system temp directory
    pub fn new(test_name: &str) -> Self {
        let counter = TEST_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir_name = format!(
            "repolog-test-{}-{}-{}",
            test_name,
            std::process::id(),
            counter
        );
        let path = std::env::temp_dir().join(dir_name);
        fs::create_dir_all(&path).expect("Failed to create temp test directory");
        Self { path }
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a subdirectory within the temp directory
    pub fn create_subdir(&self, name: &str) -> PathBuf {
        let subdir = self.path.join(name);
        fs::create_dir_all(&subdir).expect("Failed to create subdirectory");
        subdir
    }
}

impl Drop for TempTestDir {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}

// ============================================================================
// Git Repository Scaffolding
// ============================================================================

/// Directory name every fixture repository is created under
pub const FIXTURE_NAME: &str = "myrepo";

/// A repository whose commits are built from an in-memory file snapshot
pub struct FixtureRepo {
    temp_dir: TempTestDir,
    path: PathBuf,
    repo: Repository,
    files: BTreeMap<String, Vec<u8>>,
}

impl FixtureRepo {
    /// Initialize a repository with a working tree at `<tmp>/myrepo`
    pub fn new(test_name: &str) -> Self {
        Self::init(test_name, false)
    }

    /// Initialize a bare repository at `<tmp>/myrepo`
    pub fn new_bare(test_name: &str) -> Self {
        Self::init(test_name, true)
    }

    fn init(test_name: &str, bare: bool) -> Self {
        let temp_dir = TempTestDir::new(test_name);
        let path = temp_dir.create_subdir(FIXTURE_NAME);
        let repo = if bare {
            Repository::init_bare(&path)
        } else {
            Repository::init(&path)
        }
        .expect("Failed to init repository");

        Self {
            temp_dir,
            path,
            repo,
            files: BTreeMap::new(),
        }
    }

    /// Path passed to `Project::new` / `GitRepo::open`
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The temp directory holding the repository
    pub fn temp_dir(&self) -> &TempTestDir {
        &self.temp_dir
    }

    /// Underlying repository
    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Set a file's content in the next snapshot
    pub fn write(&mut self, path: &str, content: impl AsRef<[u8]>) -> &mut Self {
        self.files
            .insert(path.to_string(), content.as_ref().to_vec());
        self
    }

    /// Drop a file from the next snapshot
    pub fn remove(&mut self, path: &str) -> &mut Self {
        self.files.remove(path);
        self
    }

    /// Move a file, keeping its content
    pub fn rename(&mut self, from: &str, to: &str) -> &mut Self {
        let content = self.files.remove(from).expect("renamed file exists");
        self.files.insert(to.to_string(), content);
        self
    }

    /// Commit the snapshot on top of HEAD and advance HEAD
    pub fn commit(&mut self, message: &str, when: DateTime<Utc>) -> Oid {
        let parents: Vec<Oid> = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .into_iter()
            .collect();
        self.commit_with_parents(message, when, &parents, true)
    }

    /// Commit the snapshot with explicit parents, optionally advancing HEAD
    pub fn commit_with_parents(
        &mut self,
        message: &str,
        when: DateTime<Utc>,
        parents: &[Oid],
        update_head: bool,
    ) -> Oid {
        let tree_id = self.write_tree(&self.files.clone());
        let tree = self.repo.find_tree(tree_id).expect("tree exists");
        let sig = Signature::new(
            "Test Author",
            "test@example.com",
            &Time::new(when.timestamp(), 0),
        )
        .expect("valid signature");

        let parent_commits: Vec<git2::Commit<'_>> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).expect("parent exists"))
            .collect();
        let parent_refs: Vec<&git2::Commit<'_>> = parent_commits.iter().collect();

        self.repo
            .commit(
                update_head.then_some("HEAD"),
                &sig,
                &sig,
                message,
                &tree,
                &parent_refs,
            )
            .expect("Failed to commit")
    }

    /// Write a commit object from raw signature and message bytes on top of
    /// HEAD, optionally with an `encoding` header, and detach HEAD onto it
    pub fn commit_raw(
        &mut self,
        author: &[u8],
        message: &[u8],
        encoding: Option<&str>,
        when: DateTime<Utc>,
    ) -> Oid {
        let tree_id = self.write_tree(&self.files.clone());
        let parent = self.repo.head().ok().and_then(|head| head.target());

        let mut raw = format!("tree {tree_id}\n").into_bytes();
        if let Some(parent) = parent {
            raw.extend_from_slice(format!("parent {parent}\n").as_bytes());
        }
        for role in ["author", "committer"] {
            raw.extend_from_slice(role.as_bytes());
            raw.push(b' ');
            raw.extend_from_slice(author);
            raw.extend_from_slice(format!(" <test@example.com> {} +0000\n", when.timestamp()).as_bytes());
        }
        if let Some(encoding) = encoding {
            raw.extend_from_slice(format!("encoding {encoding}\n").as_bytes());
        }
        raw.push(b'\n');
        raw.extend_from_slice(message);

        let oid = self
            .repo
            .odb()
            .expect("odb")
            .write(git2::ObjectType::Commit, &raw)
            .expect("write raw commit");
        self.repo.set_head_detached(oid).expect("detach HEAD");
        oid
    }

    /// Delete a loose object from the object database
    pub fn remove_object(&self, oid: Oid) {
        let hex = oid.to_string();
        let object = self.repo.path().join("objects").join(&hex[..2]).join(&hex[2..]);
        fs::remove_file(&object).expect("remove loose object");
    }

    /// Create `count` commits one day apart starting at `start`, oldest first
    pub fn create_commits(&mut self, count: usize, start: DateTime<Utc>) -> Vec<Oid> {
        (0..count)
            .map(|i| {
                self.write(&format!("file_{i}.txt"), format!("Content {i}\n"));
                self.commit(
                    &format!("Commit {i}"),
                    start + chrono::Duration::days(i as i64),
                )
            })
            .collect()
    }

    /// Write a (possibly nested) tree for the given snapshot
    fn write_tree(&self, files: &BTreeMap<String, Vec<u8>>) -> Oid {
        let mut blobs: Vec<(&str, &[u8])> = Vec::new();
        let mut subdirs: BTreeMap<&str, BTreeMap<String, Vec<u8>>> = BTreeMap::new();

        for (path, content) in files {
            match path.split_once('/') {
                Some((dir, rest)) => {
                    subdirs
                        .entry(dir)
                        .or_default()
                        .insert(rest.to_string(), content.clone());
                }
                None => blobs.push((path.as_str(), content.as_slice())),
            }
        }

        let mut builder = self.repo.treebuilder(None).expect("treebuilder");
        for (name, content) in blobs {
            let blob = self.repo.blob(content).expect("blob");
            builder.insert(name, blob, 0o100_644).expect("insert blob");
        }
        for (name, nested) in subdirs {
            let subtree = self.write_tree(&nested);
            builder.insert(name, subtree, 0o040_000).expect("insert tree");
        }
        builder.write().expect("write tree")
    }
}

/// Midnight UTC on the given day, plus `hour` hours
pub fn day(year: i32, month: u32, dom: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, dom, hour, 0, 0)
        .single()
        .expect("valid date")
}
