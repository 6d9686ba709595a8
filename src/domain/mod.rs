//! Domain logic - pure value types independent of git operations

pub mod candidate;
pub mod coordinates;
pub mod snapshot;
pub mod tag;
pub mod timestamp;

pub use candidate::{candidate_version, CandidateVersions};
pub use coordinates::{ProjectCoordinates, ScmLocation};
pub use snapshot::{SnapshotMatch, SNAPSHOT_MARKER};
pub use tag::{TagInventory, TagNameTemplate, DEFAULT_TAG_NAME_FORMAT};
pub use timestamp::{local_clock, TimestampIdentifier};
