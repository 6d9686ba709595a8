use crate::config::TimestampConfig;
use crate::domain::{ProjectCoordinates, SnapshotMatch, TimestampIdentifier, SNAPSHOT_MARKER};
use crate::git::WorkingTreeFacts;
use crate::warning::ResolutionWarning;

/// Timestamp and version composed for a build
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampResolution {
    pub timestamp: TimestampIdentifier,
    pub version: String,
    pub warnings: Vec<ResolutionWarning>,
}

/// Composes timestamp versions from working-tree facts
pub struct TimestampComposer {
    config: TimestampConfig,
}

impl TimestampComposer {
    /// Create a new composer
    pub fn new(config: TimestampConfig) -> Self {
        TimestampComposer { config }
    }

    /// Compose the timestamp and the rewritten project version.
    ///
    /// - Snapshots (`…-SNAPSHOT` or `…-yyyyMMdd.HHmmss-N`) get their marker
    ///   replaced by the timestamp when `version_timestamp_snapshots` is set.
    /// - Releases get `-<timestamp>` appended when `version_timestamp_releases` is set.
    /// - Otherwise the declared version is passed through.
    ///
    /// Identical facts always yield identical output.
    pub fn compose(
        &self,
        facts: &WorkingTreeFacts,
        coords: &ProjectCoordinates,
    ) -> TimestampResolution {
        let timestamp = TimestampIdentifier::new(facts.last_modified, facts.commit_count);
        let mut warnings = Vec::new();
        let declared = &coords.declared_version;

        let version = match SnapshotMatch::classify(declared) {
            SnapshotMatch::Snapshot { prefix } if self.config.version_timestamp_snapshots => {
                if self.config.version_includes_commit_count {
                    self.with_commit_count(&prefix, facts, &timestamp)
                        .unwrap_or_else(|warning| {
                            log::debug!("{}", warning);
                            warnings.push(warning);
                            format!("{}{}", prefix, timestamp)
                        })
                } else {
                    format!("{}{}", prefix, timestamp)
                }
            }
            SnapshotMatch::Release if self.config.version_timestamp_releases => {
                format!("{}-{}", declared, timestamp)
            }
            _ => declared.clone(),
        };

        log::info!("Timestamp: {}", timestamp);
        log::info!("Version:   {}", version);

        TimestampResolution {
            timestamp,
            version,
            warnings,
        }
    }

    /// `<bare>.<commit count + dirty>-<timestamp>`, where bare is the snapshot
    /// marker with the configured suffix removed
    fn with_commit_count(
        &self,
        prefix: &str,
        facts: &WorkingTreeFacts,
        timestamp: &TimestampIdentifier,
    ) -> Result<String, ResolutionWarning> {
        let marker = format!("{}{}", prefix, SNAPSHOT_MARKER);
        let suffix = &self.config.snapshot_suffix;
        let Some(bare) = marker.strip_suffix(suffix.as_str()) else {
            return Err(ResolutionWarning::SnapshotSuffixMismatch {
                marker,
                suffix: suffix.clone(),
            });
        };

        let separator = if bare.ends_with('.') || bare.ends_with('-') {
            ""
        } else {
            "."
        };
        let build_number = facts.commit_count + u64::from(facts.is_dirty());

        Ok(format!(
            "{}{}{}-{}",
            bare, separator, build_number, timestamp
        ))
    }
}
