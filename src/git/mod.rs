//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the repository facts
//! the resolvers consume, allowing for multiple implementations including a
//! real Git working copy and a mock implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//!   plus the `git` executable for `rev-list --count` and `ls-remote`
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! Facts are read eagerly, once per run. [WorkingTreeFacts::gather] captures
//! everything the timestamp composer needs so that no resolver calls back
//! into the repository.
//!
//! ```rust
//! # use git_timestamp::git::{Repository, TagSource, WorkingTreeFacts};
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let facts = WorkingTreeFacts::gather(repo, None)?;
//! let tags = repo.list_tags(&TagSource::Local)?;
//! println!("{} commits, {} tags", facts.commit_count, tags.len());
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{local_clock, TagInventory};
use crate::error::Result;
use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Where to read the tag inventory from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSource {
    /// Tags present in the local repository
    Local,
    /// Tags advertised by a remote repository
    Remote { url: String },
}

/// Repository facts consumed by the resolvers
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying failures (process, network, permissions) to the repository
/// access variants of [crate::error::GitTimestampError]; callers propagate
/// them unchanged.
pub trait Repository {
    /// Number of commits reachable from HEAD on the current branch
    ///
    /// Returns 0 for a repository without commits.
    fn commit_count(&self) -> Result<u64>;

    /// All tag names known to the given source
    fn list_tags(&self, source: &TagSource) -> Result<TagInventory>;

    /// Modified, added, removed and untracked files, relative to the repository root
    fn changed_files(&self) -> Result<BTreeSet<PathBuf>>;

    /// Every file in the index, relative to the repository root
    fn tracked_files(&self) -> Result<BTreeSet<PathBuf>>;

    /// Modification time of a file relative to the repository root
    ///
    /// # Returns
    /// * `Ok(Some(time))` - Last modification time
    /// * `Ok(None)` - If the file does not exist (e.g. a deleted file)
    /// * `Err` - If the file exists but cannot be inspected
    fn mod_time(&self, path: &Path) -> Result<Option<SystemTime>>;
}

/// Working-tree facts captured for the timestamp composer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingTreeFacts {
    /// Newest modification time across the descriptor, tracked and changed files
    pub last_modified: NaiveDateTime,
    /// Commits reachable from HEAD
    pub commit_count: u64,
    pub changed_files: BTreeSet<PathBuf>,
}

impl WorkingTreeFacts {
    /// Read all facts from the repository.
    ///
    /// # Arguments
    /// * `repo` - Facts provider
    /// * `descriptor` - Project descriptor file whose modification time also counts
    pub fn gather<R: Repository + ?Sized>(repo: &R, descriptor: Option<&Path>) -> Result<Self> {
        let changed_files = repo.changed_files()?;
        let tracked_files = repo.tracked_files()?;

        let mut latest = SystemTime::UNIX_EPOCH;
        let candidates = descriptor
            .into_iter()
            .chain(tracked_files.iter().map(PathBuf::as_path))
            .chain(changed_files.iter().map(PathBuf::as_path));
        for path in candidates {
            if let Some(modified) = repo.mod_time(path)? {
                latest = latest.max(modified);
            }
        }

        let commit_count = repo.commit_count()?;
        log::debug!(
            "{} tracked and {} changed files, {} commits on HEAD",
            tracked_files.len(),
            changed_files.len(),
            commit_count
        );

        Ok(WorkingTreeFacts {
            last_modified: local_clock(latest),
            commit_count,
            changed_files,
        })
    }

    /// Whether the working tree differs from HEAD
    pub fn is_dirty(&self) -> bool {
        !self.changed_files.is_empty()
    }
}
