//! Version resolution over gathered repository facts

pub mod release;
pub mod timestamp;

pub use release::{resolve_free_tag, ReleaseResolution, ReleaseResolver, SubmoduleVersioning};
pub use timestamp::{TimestampComposer, TimestampResolution};
