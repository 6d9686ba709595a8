pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod outputs;
pub mod resolver;
pub mod ui;
pub mod warning;

pub use error::{GitTimestampError, Result};
