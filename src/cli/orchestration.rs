//! Main workflow orchestration logic
//!
//! Each workflow opens the repository, gathers its facts once, runs the
//! resolver and turns the result into [Outputs]. Argument parsing stays in
//! main.rs so the workflows can be called programmatically.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::ScmLocation;
use crate::error::{GitTimestampError, Result};
use crate::git::{Git2Repository, Repository, TagSource, WorkingTreeFacts};
use crate::outputs::Outputs;
use crate::resolver::{
    ReleaseResolution, ReleaseResolver, SubmoduleVersioning, TimestampComposer,
    TimestampResolution,
};
use crate::warning::ResolutionWarning;

/// Property set when all modules share the project version
pub const AUTO_VERSION_SUBMODULES_PROPERTY: &str = "autoVersionSubmodules";

/// Remote consulted when no SCM URL is configured
pub const DEFAULT_REMOTE: &str = "origin";

/// Result of the timestamp workflow
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampWorkflowResult {
    pub resolution: TimestampResolution,
    pub outputs: Outputs,
}

/// Result of the release preparation workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowResult {
    pub resolution: ReleaseResolution,
    pub outputs: Outputs,
    pub warnings: Vec<ResolutionWarning>,
}

/// Compose the timestamp version for the working copy containing `directory`
pub fn run_timestamp_workflow(config: &Config, directory: &Path) -> Result<TimestampWorkflowResult> {
    config.scm.location()?;
    let repo = Git2Repository::open(directory)?;
    let descriptor = config.descriptor().map(absolute).transpose()?;
    timestamp_workflow(config, &repo, descriptor.as_deref())
}

/// Compose the timestamp version from any facts provider
pub fn timestamp_workflow<R: Repository + ?Sized>(
    config: &Config,
    repo: &R,
    descriptor: Option<&Path>,
) -> Result<TimestampWorkflowResult> {
    let coords = config.coordinates()?;
    let facts = WorkingTreeFacts::gather(repo, descriptor)?;
    let resolution = TimestampComposer::new(config.timestamp.clone()).compose(&facts, &coords);

    let settings = &config.timestamp;
    let timestamp = resolution.timestamp.to_string();
    let mut outputs = Outputs::new();
    outputs.set_property(settings.timestamp_property.as_deref(), timestamp.as_str());
    outputs.set_property(settings.version_property.as_deref(), resolution.version.as_str());
    outputs.set_file(settings.timestamp_file.as_deref(), timestamp.as_str());
    outputs.set_file(settings.version_file.as_deref(), resolution.version.as_str());

    Ok(TimestampWorkflowResult {
        resolution,
        outputs,
    })
}

/// Resolve the next release for the working copy containing `directory`
pub fn run_release_workflow(config: &Config, directory: &Path) -> Result<ReleaseWorkflowResult> {
    let coords = config.coordinates()?;
    ReleaseResolver::new(config.release.clone()).bare_version(&coords)?;

    let scm = config.scm.location()?;
    let repo = Git2Repository::open(directory)?;
    let source = tag_source(config, scm.as_ref(), &repo)?;
    release_workflow(config, &repo, &source)
}

/// Resolve the next release from any facts provider
pub fn release_workflow<R: Repository + ?Sized>(
    config: &Config,
    repo: &R,
    source: &TagSource,
) -> Result<ReleaseWorkflowResult> {
    let coords = config.coordinates()?;
    let resolver = ReleaseResolver::new(config.release.clone());
    let resolution = resolver.resolve_repository(repo, &coords, source)?;

    let settings = &config.release;
    let mut outputs = Outputs::new();
    outputs.set_property(
        settings.release_property.as_deref(),
        resolution.release_version.as_str(),
    );
    outputs.set_file(
        settings.release_version_file.as_deref(),
        resolution.release_version.as_str(),
    );
    outputs.set_property(
        settings.development_property.as_deref(),
        resolution.development_version.as_str(),
    );
    outputs.set_property(
        settings.tag_name_property.as_deref(),
        resolution.tag_name.as_str(),
    );
    outputs.set_file(settings.tag_name_file.as_deref(), resolution.tag_name.as_str());

    let mut warnings = Vec::new();
    match resolver.submodule_versioning(&coords, &config.project.modules) {
        SubmoduleVersioning::Shared => {
            outputs.set_property(Some(AUTO_VERSION_SUBMODULES_PROPERTY), "true");
        }
        SubmoduleVersioning::Mismatch(warning) => {
            log::debug!("{}", warning);
            warnings.push(warning);
        }
        SubmoduleVersioning::Disabled => {}
    }

    Ok(ReleaseWorkflowResult {
        resolution,
        outputs,
        warnings,
    })
}

/// Decide where tags are read from.
///
/// Local tags only when explicitly requested; otherwise the SCM fetch URL,
/// or the URL of the `origin` remote when no SCM URL is configured.
pub fn tag_source(
    config: &Config,
    scm: Option<&ScmLocation>,
    repo: &Git2Repository,
) -> Result<TagSource> {
    if config.release.local_tags {
        return Ok(TagSource::Local);
    }

    let url = match scm {
        Some(location) => location.fetch_url.clone(),
        None => repo.remote_url(DEFAULT_REMOTE)?.ok_or_else(|| {
            GitTimestampError::config(format!(
                "No SCM URL configured and no '{}' remote to list tags from; \
                 configure [scm] or use local tags",
                DEFAULT_REMOTE
            ))
        })?,
    };
    Ok(TagSource::Remote { url })
}

/// Write files, the optional properties file, and print properties to stdout
pub fn publish_outputs(outputs: &Outputs, properties_file: Option<&Path>) -> Result<()> {
    outputs.write_files()?;
    if let Some(path) = properties_file {
        outputs.write_properties(path)?;
    }
    print!("{}", outputs.render_properties());
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModuleConfig;
    use crate::git::MockRepository;
    use std::time::SystemTime;

    fn config(version: &str) -> Config {
        let mut config = Config::default();
        config.project.group_id = "com.example".to_string();
        config.project.artifact_id = "widget".to_string();
        config.project.version = Some(version.to_string());
        config
    }

    #[test]
    fn test_release_workflow_outputs() {
        let mut repo = MockRepository::new();
        repo.set_commit_count(57);

        let result = release_workflow(&config("1-SNAPSHOT"), &repo, &TagSource::Local).unwrap();
        assert_eq!(
            result.outputs.render_properties(),
            "releaseVersion=1.57\ndevelopmentVersion=1-SNAPSHOT\ntag=widget-1.57\nautoVersionSubmodules=true\n"
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_release_workflow_module_mismatch() {
        let mut config = config("1-SNAPSHOT");
        config.project.modules.push(ModuleConfig {
            group_id: "com.example".to_string(),
            artifact_id: "widget-core".to_string(),
            version: "0.9".to_string(),
        });

        let repo = MockRepository::new();
        let result = release_workflow(&config, &repo, &TagSource::Local).unwrap();
        assert_eq!(result.outputs.property(AUTO_VERSION_SUBMODULES_PROPERTY), None);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_release_workflow_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config("1-SNAPSHOT");
        config.release.release_version_file = Some(dir.path().join("release.txt"));
        config.release.tag_name_file = Some(dir.path().join("tag.txt"));

        let repo = MockRepository::new();
        let result = release_workflow(&config, &repo, &TagSource::Local).unwrap();
        assert_eq!(result.outputs.files().len(), 2);
        assert_eq!(result.outputs.files()[1].1, "widget-1.0");
    }

    #[test]
    fn test_timestamp_workflow_outputs() {
        let mut config = config("1.0-SNAPSHOT");
        config.timestamp.timestamp_property = Some("buildTimestamp".to_string());
        config.timestamp.version_property = Some("buildVersion".to_string());

        let mut repo = MockRepository::new();
        repo.set_commit_count(3);
        repo.add_tracked_file("src/lib.rs", SystemTime::now());

        let result = timestamp_workflow(&config, &repo, None).unwrap();
        let timestamp = result.resolution.timestamp.to_string();
        assert!(timestamp.ends_with("-3"));
        assert_eq!(result.outputs.property("buildTimestamp"), Some(timestamp.as_str()));
        assert_eq!(
            result.outputs.property("buildVersion"),
            Some(format!("1.0-{}", timestamp).as_str())
        );
    }

    #[test]
    fn test_timestamp_workflow_without_outputs_configured() {
        let repo = MockRepository::new();
        let result = timestamp_workflow(&config("1.0"), &repo, None).unwrap();
        assert!(result.outputs.properties().is_empty());
        assert_eq!(result.resolution.version, "1.0");
    }

    #[test]
    fn test_workflows_require_version() {
        let repo = MockRepository::new();
        assert!(timestamp_workflow(&Config::default(), &repo, None).is_err());
        assert!(release_workflow(&Config::default(), &repo, &TagSource::Local).is_err());
    }
}
