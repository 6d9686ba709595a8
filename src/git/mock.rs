use crate::domain::TagInventory;
use crate::error::{GitTimestampError, Result};
use crate::git::{Repository, TagSource};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    commit_count: u64,
    local_tags: TagInventory,
    remote_tags: HashMap<String, TagInventory>,
    changed_files: BTreeSet<PathBuf>,
    tracked_files: BTreeSet<PathBuf>,
    mod_times: HashMap<PathBuf, SystemTime>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commit_count: 0,
            local_tags: TagInventory::new(),
            remote_tags: HashMap::new(),
            changed_files: BTreeSet::new(),
            tracked_files: BTreeSet::new(),
            mod_times: HashMap::new(),
        }
    }

    /// Set the number of commits on HEAD
    pub fn set_commit_count(&mut self, count: u64) {
        self.commit_count = count;
    }

    /// Add a local tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.local_tags.insert(name);
    }

    /// Add a tag advertised by the remote at `url`
    pub fn add_remote_tag(&mut self, url: impl Into<String>, name: impl Into<String>) {
        self.remote_tags.entry(url.into()).or_default().insert(name);
    }

    /// Add a tracked file with its modification time
    pub fn add_tracked_file(&mut self, path: impl Into<PathBuf>, modified: SystemTime) {
        let path = path.into();
        self.mod_times.insert(path.clone(), modified);
        self.tracked_files.insert(path);
    }

    /// Add a changed file; `None` models a deleted file
    pub fn add_changed_file(&mut self, path: impl Into<PathBuf>, modified: Option<SystemTime>) {
        let path = path.into();
        if let Some(modified) = modified {
            self.mod_times.insert(path.clone(), modified);
        }
        self.changed_files.insert(path);
    }

    /// Set the modification time of a file that is neither tracked nor changed
    pub fn set_mod_time(&mut self, path: impl Into<PathBuf>, modified: SystemTime) {
        self.mod_times.insert(path.into(), modified);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn commit_count(&self) -> Result<u64> {
        Ok(self.commit_count)
    }

    fn list_tags(&self, source: &TagSource) -> Result<TagInventory> {
        match source {
            TagSource::Local => Ok(self.local_tags.clone()),
            TagSource::Remote { url } => self.remote_tags.get(url).cloned().ok_or_else(|| {
                GitTimestampError::access(format!("Cannot list tags of remote {}", url))
            }),
        }
    }

    fn changed_files(&self) -> Result<BTreeSet<PathBuf>> {
        Ok(self.changed_files.clone())
    }

    fn tracked_files(&self) -> Result<BTreeSet<PathBuf>> {
        Ok(self.tracked_files.clone())
    }

    fn mod_time(&self, path: &Path) -> Result<Option<SystemTime>> {
        Ok(self.mod_times.get(path).copied())
    }
}
