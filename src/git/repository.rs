use crate::domain::TagInventory;
use crate::error::{GitTimestampError, Result};
use crate::git::command::{parse_commit_count, parse_ls_remote_tags, GitCommand};
use crate::git::{Repository, TagSource};
use git2::{ErrorCode, Repository as Git2Repo, Status, StatusOptions};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    git: GitCommand,
}

impl Git2Repository {
    /// Open or discover a git working copy
    ///
    /// # Returns
    /// * `Ok(Git2Repository)` - Repository with a working directory
    /// * `Err(UnsupportedRepository)` - If `path` is not inside a git working copy
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            GitTimestampError::unsupported(format!(
                "{} is not inside a git repository: {}",
                path.display(),
                e.message()
            ))
        })?;

        Self::from_git2(repo)
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Result<Self> {
        let workdir = repo
            .workdir()
            .ok_or_else(|| GitTimestampError::unsupported("Bare repositories have no working tree"))?
            .to_path_buf();

        Ok(Git2Repository {
            repo,
            git: GitCommand::new(workdir),
        })
    }

    /// Root of the working tree
    pub fn workdir(&self) -> &Path {
        self.git.workdir()
    }

    /// URL of a configured remote, if the remote exists
    pub fn remote_url(&self, remote_name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(remote_name) {
            Ok(remote) => Ok(remote.url().map(str::to_string)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn has_commits(&self) -> Result<bool> {
        match self.repo.head() {
            Ok(_) => Ok(true),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

impl Repository for Git2Repository {
    fn commit_count(&self) -> Result<u64> {
        if !self.has_commits()? {
            return Ok(0);
        }
        let output = self.git.run(&["rev-list", "--count", "HEAD"])?;
        parse_commit_count(&output)
    }

    fn list_tags(&self, source: &TagSource) -> Result<TagInventory> {
        match source {
            TagSource::Local => {
                let tags = self.repo.tag_names(None)?;
                Ok(tags.iter().flatten().collect())
            }
            TagSource::Remote { url } => {
                let output = self.git.run(&["ls-remote", "--tags", "--quiet", url])?;
                Ok(parse_ls_remote_tags(&output))
            }
        }
    }

    fn changed_files(&self) -> Result<BTreeSet<PathBuf>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .exclude_submodules(true);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses
            .iter()
            .filter(|entry| {
                let status = entry.status();
                status != Status::CURRENT && !status.contains(Status::IGNORED)
            })
            .filter_map(|entry| entry.path().map(PathBuf::from))
            .collect())
    }

    fn tracked_files(&self) -> Result<BTreeSet<PathBuf>> {
        let index = self.repo.index()?;
        Ok(index
            .iter()
            .map(|entry| PathBuf::from(String::from_utf8_lossy(&entry.path).into_owned()))
            .collect())
    }

    fn mod_time(&self, path: &Path) -> Result<Option<SystemTime>> {
        match fs::metadata(self.workdir().join(path)) {
            Ok(metadata) => Ok(Some(metadata.modified()?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_outside_repository() {
        let dir = tempfile::tempdir().unwrap();
        match Git2Repository::open(dir.path()) {
            Err(GitTimestampError::UnsupportedRepository(msg)) => {
                assert!(msg.contains("not inside a git repository"));
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("temporary directory should not be a repository"),
        }
    }

    #[test]
    fn test_bare_repository_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let bare = Git2Repo::init_bare(dir.path()).unwrap();
        assert!(matches!(
            Git2Repository::from_git2(bare),
            Err(GitTimestampError::UnsupportedRepository(_))
        ));
    }

    #[test]
    fn test_empty_repository_has_no_commits() {
        let dir = tempfile::tempdir().unwrap();
        Git2Repo::init(dir.path()).unwrap();
        let repo = Git2Repository::open(dir.path()).unwrap();
        assert_eq!(repo.commit_count().unwrap(), 0);
        assert!(repo.list_tags(&TagSource::Local).unwrap().is_empty());
        assert_eq!(repo.remote_url("origin").unwrap(), None);
    }
}
