use crate::error::{GitTimestampError, Result};

const SCM_PREFIX: &str = "scm:";
const GIT_SCM_PREFIX: &str = "scm:git:";

/// Identity of the project being versioned.
///
/// Supplied once per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub declared_version: String,
}

impl ProjectCoordinates {
    /// Create new project coordinates
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        declared_version: impl Into<String>,
    ) -> Self {
        ProjectCoordinates {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            declared_version: declared_version.into(),
        }
    }

    /// `group:artifact` form used in log and warning messages
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

/// A validated `scm:git:` location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScmLocation {
    /// The URL as configured, including the `scm:git:` prefix
    pub url: String,
    /// The URL handed to git for remote queries
    pub fetch_url: String,
}

impl ScmLocation {
    /// Parse an SCM URL of the form `scm:<provider>:<provider specific part>`.
    ///
    /// # Returns
    /// * `Ok(ScmLocation)` - For `scm:git:` URLs
    /// * `Err(Config)` - If the URL does not start with `scm:`
    /// * `Err(UnsupportedRepository)` - If the provider is anything other than git
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        if !url.starts_with(SCM_PREFIX) {
            return Err(GitTimestampError::config(format!("Unknown SCM URL: {}", url)));
        }

        let fetch_url = url.strip_prefix(GIT_SCM_PREFIX).ok_or_else(|| {
            GitTimestampError::unsupported(format!("Only Git SCM type is supported: {}", url))
        })?;
        if fetch_url.is_empty() {
            return Err(GitTimestampError::config(format!(
                "SCM URL has no repository location: {}",
                url
            )));
        }

        Ok(ScmLocation {
            url: url.to_string(),
            fetch_url: fetch_url.to_string(),
        })
    }
}
