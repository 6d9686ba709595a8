use crate::config::{ModuleConfig, ReleaseConfig};
use crate::domain::{CandidateVersions, ProjectCoordinates, TagInventory, TagNameTemplate};
use crate::error::{GitTimestampError, Result};
use crate::git::{Repository, TagSource};
use crate::warning::ResolutionWarning;

/// Versions and tag chosen for a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseResolution {
    /// Version to release, e.g. `1.57` or `1.57.1`
    pub release_version: String,
    /// Version to continue development with (the declared version)
    pub development_version: String,
    /// Tag that does not exist yet for `release_version`
    pub tag_name: String,
}

/// Whether every module can be assumed to carry the project version
#[derive(Debug, Clone, PartialEq)]
pub enum SubmoduleVersioning {
    Disabled,
    Shared,
    Mismatch(ResolutionWarning),
}

/// Pick the first candidate whose tag name is not in `tags`.
///
/// At most `tags.len() + 1` candidates are drawn: candidate versions are
/// distinct, so as long as the template references the version their tag
/// names are distinct too and one of them must be free.
///
/// # Returns
/// * `Ok((version, tag_name))` - The lowest free candidate
/// * `Err(Template)` - If the template cannot be rendered, or renders the same
///   existing tag for every candidate
pub fn resolve_free_tag<I>(
    candidates: I,
    template: &TagNameTemplate,
    coords: &ProjectCoordinates,
    tags: &TagInventory,
) -> Result<(String, String)>
where
    I: IntoIterator<Item = String>,
{
    for version in candidates.into_iter().take(tags.len() + 1) {
        let tag_name = template.interpolate(coords, &version)?;
        if !tags.contains(&tag_name) {
            log::info!(
                "Could not find a tag called {} recommending version {}",
                tag_name,
                version
            );
            return Ok((version, tag_name));
        }
        log::debug!(
            "Skipping {} as there is already a tag named {}",
            version,
            tag_name
        );
    }

    Err(GitTimestampError::template(format!(
        "Tag name format '{}' collides with an existing tag for every candidate version; \
         it must reference @{{project.version}}",
        template.format
    )))
}

/// Resolves release versions from commit count and existing tags
pub struct ReleaseResolver {
    config: ReleaseConfig,
}

impl ReleaseResolver {
    /// Create a new release resolver
    pub fn new(config: ReleaseConfig) -> Self {
        ReleaseResolver { config }
    }

    pub fn template(&self) -> TagNameTemplate {
        TagNameTemplate::new(self.config.tag_name_format.clone())
    }

    /// The declared version with the snapshot text removed and a `.` appended
    /// unless it already ends in `.` or `-`.
    ///
    /// # Returns
    /// * `Ok(String)` - e.g. `1.` for `1-SNAPSHOT`, `1.` for `1.x-SNAPSHOT` with snapshot text `x-SNAPSHOT`
    /// * `Err(Config)` - If the declared version does not end with the snapshot text
    pub fn bare_version(&self, coords: &ProjectCoordinates) -> Result<String> {
        let snapshot_text = &self.config.snapshot_text;
        let bare = coords
            .declared_version
            .strip_suffix(snapshot_text.as_str())
            .ok_or_else(|| {
                GitTimestampError::config(format!(
                    "The current project version is '{}' which does not end with the expected text to be replaced: '{}'",
                    coords.declared_version, snapshot_text
                ))
            })?;

        if bare.ends_with('.') || bare.ends_with('-') {
            Ok(bare.to_string())
        } else {
            Ok(format!("{}.", bare))
        }
    }

    /// Base of the candidate sequence: bare version followed by the commit count
    pub fn base_version(&self, coords: &ProjectCoordinates, commit_count: u64) -> Result<String> {
        Ok(format!("{}{}", self.bare_version(coords)?, commit_count))
    }

    /// Resolve the release from already gathered facts
    pub fn resolve(
        &self,
        coords: &ProjectCoordinates,
        commit_count: u64,
        tags: &TagInventory,
    ) -> Result<ReleaseResolution> {
        let base_version = self.base_version(coords, commit_count)?;
        let candidates =
            CandidateVersions::new(base_version, self.config.always_include_repeat_count);

        let (release_version, tag_name) =
            resolve_free_tag(candidates, &self.template(), coords, tags)?;
        log::debug!("Known tags: {:?}", tags.sorted());

        Ok(ReleaseResolution {
            release_version,
            development_version: coords.declared_version.clone(),
            tag_name,
        })
    }

    /// Gather facts from the repository and resolve the release.
    ///
    /// The declared version is checked before the repository is queried.
    pub fn resolve_repository<R: Repository + ?Sized>(
        &self,
        repo: &R,
        coords: &ProjectCoordinates,
        source: &TagSource,
    ) -> Result<ReleaseResolution> {
        self.bare_version(coords)?;

        let commit_count = repo.commit_count()?;
        let tags = repo.list_tags(source)?;
        log::debug!("{} commits on HEAD, {} tags", commit_count, tags.len());

        self.resolve(coords, commit_count, &tags)
    }

    /// Whether all modules share the project version
    pub fn submodule_versioning(
        &self,
        coords: &ProjectCoordinates,
        modules: &[ModuleConfig],
    ) -> SubmoduleVersioning {
        if self.config.skip_auto_version_submodules_detection {
            log::debug!("autoVersionSubmodules detection disabled");
            return SubmoduleVersioning::Disabled;
        }

        match modules
            .iter()
            .find(|module| module.version != coords.declared_version)
        {
            Some(module) => SubmoduleVersioning::Mismatch(ResolutionWarning::ModuleVersionMismatch {
                module: module.coordinates().key(),
                version: module.version.clone(),
                project_version: coords.declared_version.clone(),
            }),
            None => {
                log::info!(
                    "All modules share the same version: {}",
                    coords.declared_version
                );
                SubmoduleVersioning::Shared
            }
        }
    }
}
