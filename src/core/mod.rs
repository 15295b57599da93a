//! Core functionality for merging execution data and building coverage bundles

pub mod analyzer;
pub mod bundle;
pub mod discovery;
pub mod loader;
pub mod locator;
pub mod merger;
pub mod modules;
pub mod pipeline;
pub mod scanner;

pub use analyzer::{Analyzer, ClassAnalyzer, CoverageBuilder};
pub use bundle::BundleCreator;
pub use loader::ExecFileLoader;
pub use locator::ArtifactResolution;
pub use merger::{ExecutionDataMerger, MergeOutcome};
pub use modules::included_modules;
pub use pipeline::{
    Capabilities, ModuleSource, ReportContext, ReportOutcome, ReportPipeline, ReportRenderer,
    ReportRequest,
};
