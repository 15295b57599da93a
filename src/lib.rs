//! covagg - multi-module JaCoCo execution data merge and coverage reporting
//!
//! This library merges the per-module execution data files of a multi-module
//! build, analyzes the compiled classes of the included modules against the
//! merged data and hands the resulting coverage bundle to a report renderer.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use error::{CovaggError, ErrorSeverity, Result, ResultExt};
pub use models::{
    config::Settings,
    coverage::{BundleSummary, ClassCoverage, CoverageBundle, CoverageStatus},
    execution_data::{ExecutionData, ExecutionDataStore, SessionInfo, SessionInfoStore},
    module::{BuildModule, Module},
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
