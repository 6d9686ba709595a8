//! Classification of declared versions as releases or snapshots.
//!
//! A version is a snapshot when it is exactly `SNAPSHOT`, ends in `-SNAPSHOT`,
//! or ends in a previously generated timestamp such as `-20190322.100407-39`.

/// The literal marker at the end of snapshot versions
pub const SNAPSHOT_MARKER: &str = "SNAPSHOT";

/// `yyyyMMdd.HHmmss`, each entry the set of bytes allowed at that position
const CLOCK_SHAPE: [&[u8]; 15] = [
    b"0123456789",
    b"0123456789",
    b"0123456789",
    b"0123456789",
    b"01",
    b"0123456789",
    b"0123",
    b"0123456789",
    b".",
    b"012",
    b"0123456789",
    b"0123456",
    b"0123456789",
    b"0123456",
    b"0123456789",
];

/// Result of classifying a declared version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotMatch {
    Release,
    /// `prefix` is everything before the marker, including the trailing `-`
    Snapshot { prefix: String },
}

impl SnapshotMatch {
    /// Classify a version string
    ///
    /// # Examples
    /// ```ignore
    /// assert_eq!(SnapshotMatch::classify("1.0"), SnapshotMatch::Release);
    /// assert_eq!(SnapshotMatch::classify("1.0-SNAPSHOT").prefix(), Some("1.0-"));
    /// assert_eq!(SnapshotMatch::classify("1.0-20190322.100407-39").prefix(), Some("1.0-"));
    /// ```
    pub fn classify(version: &str) -> Self {
        let marker_start = version
            .strip_suffix(SNAPSHOT_MARKER)
            .map(str::len)
            .or_else(|| timestamp_suffix_start(version));

        match marker_start {
            Some(start) if start == 0 || version[..start].ends_with('-') => {
                SnapshotMatch::Snapshot {
                    prefix: version[..start].to_string(),
                }
            }
            _ => SnapshotMatch::Release,
        }
    }

    pub fn is_snapshot(&self) -> bool {
        matches!(self, SnapshotMatch::Snapshot { .. })
    }

    /// The portion preceding the snapshot marker, if this is a snapshot
    pub fn prefix(&self) -> Option<&str> {
        match self {
            SnapshotMatch::Release => None,
            SnapshotMatch::Snapshot { prefix } => Some(prefix),
        }
    }
}

/// Byte offset where a trailing `yyyyMMdd.HHmmss-N` suffix begins
fn timestamp_suffix_start(version: &str) -> Option<usize> {
    let dash = version.rfind('-')?;
    let count = &version[dash + 1..];
    if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let clock_start = dash.checked_sub(CLOCK_SHAPE.len())?;
    let clock = &version.as_bytes()[clock_start..dash];
    let matches_shape = clock
        .iter()
        .zip(CLOCK_SHAPE.iter())
        .all(|(byte, allowed)| allowed.contains(byte));

    matches_shape.then_some(clock_start)
}
