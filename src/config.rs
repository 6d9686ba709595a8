use crate::domain::{ProjectCoordinates, ScmLocation, DEFAULT_TAG_NAME_FORMAT};
use crate::error::{GitTimestampError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the run directory
pub const CONFIG_FILE_NAME: &str = "gittimestamp.toml";
/// File name looked up in the user configuration directory
pub const USER_CONFIG_FILE_NAME: &str = ".gittimestamp.toml";

/// Represents the complete configuration for git-timestamp.
///
/// Built once per invocation and never mutated after CLI overrides are applied.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub scm: ScmConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub timestamp: TimestampConfig,

    /// Path of the file this configuration was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Coordinates of the project being versioned.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub group_id: String,

    #[serde(default)]
    pub artifact_id: String,

    #[serde(default)]
    pub version: Option<String>,

    /// Project descriptor; its modification time participates in the timestamp
    #[serde(default)]
    pub descriptor: Option<PathBuf>,

    /// Sub-modules released together with the project
    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

/// A sub-module of a multi-module project
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ModuleConfig {
    #[serde(default)]
    pub group_id: String,

    pub artifact_id: String,

    pub version: String,
}

impl ModuleConfig {
    /// Coordinates of this module, with its own declared version
    pub fn coordinates(&self) -> ProjectCoordinates {
        ProjectCoordinates::new(
            self.group_id.clone(),
            self.artifact_id.clone(),
            self.version.clone(),
        )
    }
}

fn default_true() -> bool {
    true
}

/// Source control location of the project.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScmConfig {
    #[serde(default)]
    pub connection: Option<String>,

    #[serde(default)]
    pub developer_connection: Option<String>,

    #[serde(default = "default_true")]
    pub prefer_developer_connection: bool,
}

impl Default for ScmConfig {
    fn default() -> Self {
        ScmConfig {
            connection: None,
            developer_connection: None,
            prefer_developer_connection: true,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ScmConfig {
    /// The preferred connection URL, falling back to the other one when blank
    pub fn effective_url(&self) -> Option<&str> {
        let connection = non_blank(&self.connection);
        let developer = non_blank(&self.developer_connection);
        if self.prefer_developer_connection {
            developer.or(connection)
        } else {
            connection.or(developer)
        }
    }

    /// Validate the effective URL, if any
    ///
    /// # Returns
    /// * `Ok(None)` - No SCM URL configured
    /// * `Ok(Some(location))` - A git SCM location
    /// * `Err` - Unknown or non-git SCM URL
    pub fn location(&self) -> Result<Option<ScmLocation>> {
        self.effective_url().map(ScmLocation::parse).transpose()
    }
}

fn default_snapshot_text() -> String {
    "-SNAPSHOT".to_string()
}

fn default_tag_name_format() -> String {
    DEFAULT_TAG_NAME_FORMAT.to_string()
}

fn default_release_property() -> Option<String> {
    Some("releaseVersion".to_string())
}

fn default_development_property() -> Option<String> {
    Some("developmentVersion".to_string())
}

fn default_tag_name_property() -> Option<String> {
    Some("tag".to_string())
}

/// Configuration for release version resolution.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Text at the end of the declared version that is replaced by the commit count
    #[serde(default = "default_snapshot_text")]
    pub snapshot_text: String,

    #[serde(default = "default_tag_name_format")]
    pub tag_name_format: String,

    /// Always append the repeat index, so the first candidate is `<base>.0`
    #[serde(default)]
    pub always_include_repeat_count: bool,

    /// Read tags from the local repository instead of the remote
    #[serde(default)]
    pub local_tags: bool,

    #[serde(default)]
    pub skip_auto_version_submodules_detection: bool,

    #[serde(default = "default_release_property")]
    pub release_property: Option<String>,

    #[serde(default = "default_development_property")]
    pub development_property: Option<String>,

    #[serde(default = "default_tag_name_property")]
    pub tag_name_property: Option<String>,

    #[serde(default)]
    pub release_version_file: Option<PathBuf>,

    #[serde(default)]
    pub tag_name_file: Option<PathBuf>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            snapshot_text: default_snapshot_text(),
            tag_name_format: default_tag_name_format(),
            always_include_repeat_count: false,
            local_tags: false,
            skip_auto_version_submodules_detection: false,
            release_property: default_release_property(),
            development_property: default_development_property(),
            tag_name_property: default_tag_name_property(),
            release_version_file: None,
            tag_name_file: None,
        }
    }
}

/// Configuration for timestamp version composition.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TimestampConfig {
    /// Append the timestamp to release versions
    #[serde(default)]
    pub version_timestamp_releases: bool,

    /// Replace the snapshot marker of snapshot versions with the timestamp
    #[serde(default = "default_true")]
    pub version_timestamp_snapshots: bool,

    /// Inject `<commit count + dirty>` ahead of the timestamp in snapshot versions
    #[serde(default)]
    pub version_includes_commit_count: bool,

    #[serde(default = "default_snapshot_text")]
    pub snapshot_suffix: String,

    #[serde(default)]
    pub timestamp_property: Option<String>,

    #[serde(default)]
    pub version_property: Option<String>,

    #[serde(default)]
    pub timestamp_file: Option<PathBuf>,

    #[serde(default)]
    pub version_file: Option<PathBuf>,
}

impl Default for TimestampConfig {
    fn default() -> Self {
        TimestampConfig {
            version_timestamp_releases: false,
            version_timestamp_snapshots: true,
            version_includes_commit_count: false,
            snapshot_suffix: default_snapshot_text(),
            timestamp_property: None,
            version_property: None,
            timestamp_file: None,
            version_file: None,
        }
    }
}

impl Config {
    /// Project coordinates, requiring a declared version
    pub fn coordinates(&self) -> Result<ProjectCoordinates> {
        let version = non_blank(&self.project.version).ok_or_else(|| {
            GitTimestampError::config(
                "No project version declared; set [project].version or pass --project-version",
            )
        })?;

        Ok(ProjectCoordinates::new(
            self.project.group_id.clone(),
            self.project.artifact_id.clone(),
            version,
        ))
    }

    /// Resolve relative descriptor and output paths against `base`.
    ///
    /// `source` is left alone; it already names the file that was read.
    pub fn anchor_paths(&mut self, base: &Path) {
        let anchor = |path: &mut Option<PathBuf>| {
            if let Some(p) = path.as_mut().filter(|p| p.is_relative()) {
                *p = base.join(&*p);
            }
        };
        anchor(&mut self.project.descriptor);
        anchor(&mut self.release.release_version_file);
        anchor(&mut self.release.tag_name_file);
        anchor(&mut self.timestamp.timestamp_file);
        anchor(&mut self.timestamp.version_file);
    }

    /// The descriptor whose modification time counts towards the timestamp.
    ///
    /// Defaults to the configuration file itself.
    pub fn descriptor(&self) -> Option<&Path> {
        self.project
            .descriptor
            .as_deref()
            .or(self.source.as_deref())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter, relative to `directory`
/// 2. `gittimestamp.toml` in `directory`
/// 3. `.gittimestamp.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `directory` - Directory the tool runs in (`-C`), usually `.`
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, directory: &Path) -> Result<Config> {
    let local_config = directory.join(CONFIG_FILE_NAME);
    let path = if let Some(path) = config_path {
        directory.join(path)
    } else if local_config.exists() {
        local_config
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(USER_CONFIG_FILE_NAME);
        if user_config.exists() {
            user_config
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        GitTimestampError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let mut config = parse_config(&config_str)
        .map_err(|e| GitTimestampError::config(format!("{}: {}", path.display(), e)))?;
    config.source = Some(path);
    Ok(config)
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| GitTimestampError::config(e.to_string()))
}
