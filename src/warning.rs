use std::fmt;

/// Non-fatal conditions met while resolving versions.
/// These never abort a run but must be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionWarning {
    /// The snapshot marker does not end with the configured suffix, so the
    /// commit count could not be injected into the version
    SnapshotSuffixMismatch { marker: String, suffix: String },
    /// A module's version differs from the project version, so modules cannot
    /// be assumed to be versioned together
    ModuleVersionMismatch {
        module: String,
        version: String,
        project_version: String,
    },
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionWarning::SnapshotSuffixMismatch { marker, suffix } => {
                write!(
                    f,
                    "Version '{}' does not end with the snapshot suffix '{}'; commit count not included",
                    marker, suffix
                )
            }
            ResolutionWarning::ModuleVersionMismatch {
                module,
                version,
                project_version,
            } => {
                write!(
                    f,
                    "Module {} has version {} which is not the same as {} thus autoVersionSubmodules cannot be assumed true",
                    module, version, project_version
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_mismatch_display() {
        let warning = ResolutionWarning::SnapshotSuffixMismatch {
            marker: "1.0-SNAPSHOT".to_string(),
            suffix: "-BUILD".to_string(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("1.0-SNAPSHOT"));
        assert!(msg.contains("-BUILD"));
    }

    #[test]
    fn test_module_mismatch_display() {
        let warning = ResolutionWarning::ModuleVersionMismatch {
            module: "com.example:widget-core".to_string(),
            version: "2-SNAPSHOT".to_string(),
            project_version: "1-SNAPSHOT".to_string(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("com.example:widget-core"));
        assert!(msg.contains("autoVersionSubmodules"));
    }
}
