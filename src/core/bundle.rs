//! Coverage bundle construction
//!
//! Walks each artifact directory through the file filter and feeds the
//! matching files to a [`ClassAnalyzer`] bound to the execution data store.

use crate::core::analyzer::{Analyzer, ClassAnalyzer, CoverageBuilder};
use crate::core::scanner::matching_files;
use crate::error::Result;
use crate::models::coverage::CoverageBundle;
use crate::models::execution_data::ExecutionDataStore;
use crate::models::filter::FileFilter;
use crate::output::log::Log;
use crate::output::ProgressReporter;
use std::path::PathBuf;

/// Builds one bundle out of any number of artifact directories
pub struct BundleCreator<'a> {
    log: &'a dyn Log,
    progress: Option<&'a ProgressReporter>,
}

impl<'a> BundleCreator<'a> {
    pub fn new(log: &'a dyn Log) -> Self {
        Self { log, progress: None }
    }

    /// Report each analyzed file on `progress`
    pub fn with_progress(mut self, progress: &'a ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Analyze the filtered contents of `artifact_dirs` in order.
    ///
    /// Directories that do not exist are skipped; any read failure aborts.
    pub fn create_bundle(
        &self,
        artifact_dirs: &[PathBuf],
        filter: &FileFilter,
        execution_data: &ExecutionDataStore,
        bundle_name: &str,
    ) -> Result<CoverageBundle> {
        let filter = filter.compile()?;
        let mut builder = CoverageBuilder::new();

        if let Some(progress) = self.progress {
            progress.start("Analyzing classes");
        }

        {
            let mut analyzer = ClassAnalyzer::new(execution_data, &mut builder);
            for dir in artifact_dirs {
                if !dir.is_dir() {
                    self.log.verbose(&format!("Skipping missing directory {}", dir.display()));
                    continue;
                }

                for file in matching_files(dir, &filter)? {
                    if let Some(progress) = self.progress {
                        progress.tick(&file.display().to_string());
                    }
                    analyzer.analyze_all(&file)?;
                }
            }
        }

        if let Some(progress) = self.progress {
            progress.finish(&format!(
                "Analyzed {} classes from {} files",
                builder.class_count(),
                progress.processed()
            ));
        }

        let bundle = builder.bundle(bundle_name);
        for class in bundle.mismatched_classes() {
            self.log.warn(&format!(
                "Execution data for class {} does not match",
                class.name
            ));
        }
        Ok(bundle)
    }
}
