//! Command-line workflows, decoupled from argument parsing.

pub mod orchestration;

pub use orchestration::{
    publish_outputs, release_workflow, run_release_workflow, run_timestamp_workflow,
    timestamp_workflow, ReleaseWorkflowResult, TimestampWorkflowResult,
};
