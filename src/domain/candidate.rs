//! Candidate release versions derived from a base version.
//!
//! The sequence for base `1.57` is `1.57, 1.57.1, 1.57.2, ...`, or
//! `1.57.0, 1.57.1, ...` when the repeat count is always included.

/// Returns the candidate version at `index` of the sequence for `base_version`.
///
/// Index 0 is the bare base version unless `always_include_repeat_count` is set.
pub fn candidate_version(base_version: &str, index: u64, always_include_repeat_count: bool) -> String {
    if index == 0 && !always_include_repeat_count {
        base_version.to_string()
    } else {
        format!("{}.{}", base_version, index)
    }
}

/// Unbounded iterator over candidate versions.
///
/// Each instance owns its repeat counter; a fresh sequence needs a fresh
/// instance. `next` never returns `None`, so callers must bound the search.
#[derive(Debug, Clone)]
pub struct CandidateVersions {
    base_version: String,
    always_include_repeat_count: bool,
    next_index: u64,
}

impl CandidateVersions {
    /// Create a generator starting at repeat index 0
    pub fn new(base_version: impl Into<String>, always_include_repeat_count: bool) -> Self {
        CandidateVersions {
            base_version: base_version.into(),
            always_include_repeat_count,
            next_index: 0,
        }
    }

    /// The base version every candidate starts with
    pub fn base_version(&self) -> &str {
        &self.base_version
    }
}

impl Iterator for CandidateVersions {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let version = candidate_version(
            &self.base_version,
            self.next_index,
            self.always_include_repeat_count,
        );
        self.next_index += 1;
        Some(version)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
