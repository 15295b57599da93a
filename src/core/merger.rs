//! Merging of per-module execution data files

use crate::core::loader::ExecFileLoader;
use crate::error::Result;
use crate::models::module::Module;
use crate::output::log::Log;
use std::path::{Path, PathBuf};

/// Result of a merge run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The merged store was written to `path`
    Written {
        path: PathBuf,
        classes: usize,
        sessions: usize,
    },
    /// No execution data was found, nothing was written
    Skipped,
}

/// Candidate execution data files, one per module, in module order
pub fn candidate_files<M: Module + ?Sized>(modules: &[&M], merged_file: &Path) -> Vec<PathBuf> {
    let file_name = merged_file
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| crate::models::config::DEFAULT_DATA_FILE_NAME.into());
    modules
        .iter()
        .map(|module| module.build_directory().join(&file_name))
        .collect()
}

/// Merges execution data files into one output file
pub struct ExecutionDataMerger<'a> {
    log: &'a dyn Log,
}

impl<'a> ExecutionDataMerger<'a> {
    pub fn new(log: &'a dyn Log) -> Self {
        Self { log }
    }

    /// Merge the data files of `modules` into `merged_file`.
    ///
    /// The caller makes sure `merged_file` does not exist yet; it is
    /// overwritten otherwise.
    pub fn merge_modules<M: Module + ?Sized>(
        &self,
        modules: &[&M],
        merged_file: &Path,
    ) -> Result<MergeOutcome> {
        self.merge(&candidate_files(modules, merged_file), merged_file)
    }

    /// Load every existing file of `candidates` and write the union to
    /// `merged_file`. Missing candidates are skipped.
    pub fn merge(&self, candidates: &[PathBuf], merged_file: &Path) -> Result<MergeOutcome> {
        let mut loader = ExecFileLoader::new();
        for candidate in candidates {
            if !candidate.is_file() {
                continue;
            }
            self.log.info(&format!("Loading execution data file {}", candidate.display()));
            loader.load(candidate)?;
        }

        if loader.execution_data().is_empty() {
            self.log
                .info("Skipping JaCoCo merge execution due to missing execution data files");
            return Ok(MergeOutcome::Skipped);
        }

        self.log.info(&format!(
            "Writing merged execution data to {}",
            merged_file.display()
        ));
        loader.save(merged_file, false)?;

        Ok(MergeOutcome::Written {
            path: merged_file.to_path_buf(),
            classes: loader.execution_data().len(),
            sessions: loader.sessions().len(),
        })
    }
}
