//! User interface module - console output for resolution results.

pub mod formatter;

pub use formatter::{
    display_error, display_release, display_status, display_success, display_timestamp,
    display_warning,
};
