//! Data models and structures for covagg

pub mod config;
pub mod coverage;
pub mod execution_data;
pub mod filter;
pub mod module;

pub use config::Settings;
pub use coverage::{BundleSummary, ClassCoverage, CoverageBundle, CoverageStatus};
pub use execution_data::{ExecutionData, ExecutionDataStore, SessionInfo, SessionInfoStore};
pub use filter::FileFilter;
pub use module::{BuildModule, Module};
