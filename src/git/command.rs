use crate::domain::TagInventory;
use crate::error::{GitTimestampError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

const REFS_TAGS: &str = "refs/tags/";
const PEELED_SUFFIX: &str = "^{}";

/// Runs the `git` executable inside a working copy
#[derive(Debug, Clone)]
pub struct GitCommand {
    workdir: PathBuf,
}

impl GitCommand {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        GitCommand {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Execute `git <args>` and return its standard output.
    ///
    /// Standard error lines are logged as warnings. Credential prompts are
    /// disabled so a remote query never blocks on the terminal.
    ///
    /// # Returns
    /// * `Ok(String)` - Standard output of a successful command
    /// * `Err(RepositoryAccess)` - If git cannot be started or exits non-zero
    pub fn run(&self, args: &[&str]) -> Result<String> {
        log::debug!("Executing: git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| {
                GitTimestampError::access(format!("Failed to execute git {}: {}", args[0], e))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines().filter(|line| !line.trim().is_empty()) {
            log::warn!("{}", line);
        }

        if !output.status.success() {
            return Err(GitTimestampError::access(format!(
                "git {} failed with exit code {}\nStderr: {}",
                args.join(" "),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Parse the output of `git rev-list --count HEAD`.
///
/// Blank output counts as zero commits.
pub fn parse_commit_count(output: &str) -> Result<u64> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<u64>()
        .map_err(|_| GitTimestampError::commit_count(output))
}

/// Parse the output of `git ls-remote --tags`.
///
/// Only lines of the form `<40 hex digits> refs/tags/<name>` are kept; the
/// `^{}` suffix of peeled annotated tags is removed.
pub fn parse_ls_remote_tags(output: &str) -> TagInventory {
    let mut tags = TagInventory::new();
    let Ok(re) = regex::Regex::new(r"^[0-9a-fA-F]{40}\s+refs/tags/.+$") else {
        return tags;
    };

    for line in output.lines().map(str::trim) {
        if !re.is_match(line) {
            continue;
        }
        if let Some(index) = line.find(REFS_TAGS) {
            let name = &line[index + REFS_TAGS.len()..];
            tags.insert(name.strip_suffix(PEELED_SUFFIX).unwrap_or(name));
        }
    }

    tags
}
