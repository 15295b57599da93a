//! Report pipeline
//!
//! A single pipeline serves both the single-project report and the aggregate
//! report. Which modules contribute and how their class directories are found
//! is decided by a [`Capabilities`] record.

use crate::core::bundle::BundleCreator;
use crate::core::loader::ExecFileLoader;
use crate::core::locator::{locate_artifact_directories, ArtifactResolution};
use crate::core::merger::{ExecutionDataMerger, MergeOutcome};
use crate::core::modules::{excluded_modules, included_modules};
use crate::error::Result;
use crate::models::config::{Settings, REPORT_DIRECTORY_NAME};
use crate::models::coverage::CoverageBundle;
use crate::models::execution_data::SessionInfoStore;
use crate::models::filter::FileFilter;
use crate::models::module::{resolve_path, Module};
use crate::output::log::Log;
use crate::output::ProgressReporter;
use std::path::{Path, PathBuf};

/// Which modules contribute execution data and classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleSource {
    /// Only the project the report is generated for
    SelfOnly,
    /// All included modules of the reactor
    ReactorSiblings,
}

/// Static choices made once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    pub artifact_resolution: ArtifactResolution,
    pub module_source: ModuleSource,
}

impl Capabilities {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            artifact_resolution: ArtifactResolution::from_pattern(
                settings.class_directory_pattern.as_deref(),
            ),
            module_source: if settings.aggregate {
                ModuleSource::ReactorSiblings
            } else {
                ModuleSource::SelfOnly
            },
        }
    }
}

/// Everything a report run reads
#[derive(Debug)]
pub struct ReportRequest<'a, M: Module> {
    /// The project the report is generated for
    pub project: &'a M,
    /// All modules of the reactor, in build order
    pub reactor: &'a [M],
    pub excluded_ids: &'a [String],
    /// Merged execution data file, shared by the merge and the analysis
    pub data_file: PathBuf,
    pub output_directory: PathBuf,
    pub filter: FileFilter,
    pub skip: bool,
}

/// What a renderer gets to work with
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub bundle: CoverageBundle,
    pub sessions: SessionInfoStore,
    pub source_roots: Vec<PathBuf>,
    pub output_directory: PathBuf,
}

/// Turns a report context into report files
pub trait ReportRenderer {
    fn render(&self, context: &ReportContext) -> Result<()>;
}

/// Result of a report run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Nothing was done because the skip flag was set
    Skipped,
    Generated {
        classes: usize,
        /// Present when a merge was attempted during this run
        merge: Option<MergeOutcome>,
    },
}

/// Append `jacoco` to a reporting directory unless it already ends with it
pub fn resolve_report_output_directory(reporting_directory: &Path) -> PathBuf {
    if reporting_directory
        .file_name()
        .map(|name| name == REPORT_DIRECTORY_NAME)
        .unwrap_or(false)
    {
        reporting_directory.to_path_buf()
    } else {
        reporting_directory.join(REPORT_DIRECTORY_NAME)
    }
}

/// Runs merge, analysis and rendering in sequence
pub struct ReportPipeline<'a> {
    capabilities: Capabilities,
    log: &'a dyn Log,
    progress: Option<&'a ProgressReporter>,
}

impl<'a> ReportPipeline<'a> {
    pub fn new(capabilities: Capabilities, log: &'a dyn Log) -> Self {
        Self {
            capabilities,
            log,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: &'a ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn run<M: Module>(
        &self,
        request: &ReportRequest<'_, M>,
        renderer: &dyn ReportRenderer,
    ) -> Result<ReportOutcome> {
        if request.skip {
            self.log
                .info("Skipping JaCoCo execution because property jacoco.skip is set.");
            return Ok(ReportOutcome::Skipped);
        }

        let modules: Vec<&M> = match self.capabilities.module_source {
            ModuleSource::SelfOnly => vec![request.project],
            ModuleSource::ReactorSiblings => {
                included_modules(request.reactor, request.excluded_ids)
            }
        };
        let excluded: Vec<&M> = match self.capabilities.module_source {
            ModuleSource::SelfOnly => Vec::new(),
            ModuleSource::ReactorSiblings => {
                excluded_modules(request.reactor, request.excluded_ids)
            }
        };

        // An existing merged file is used as is
        let merge = if self.capabilities.module_source == ModuleSource::ReactorSiblings
            && !request.data_file.exists()
        {
            let merger = ExecutionDataMerger::new(self.log);
            Some(merger.merge_modules(&modules, &request.data_file)?)
        } else {
            None
        };

        let mut loader = ExecFileLoader::new();
        if request.data_file.is_file() {
            self.log.verbose(&format!(
                "Loading execution data file {}",
                request.data_file.display()
            ));
            loader.load(&request.data_file)?;
        } else {
            self.log.verbose(&format!(
                "No execution data file at {}, reporting without coverage",
                request.data_file.display()
            ));
        }
        let (sessions, execution_data) = loader.into_parts();

        let artifact_dirs = locate_artifact_directories(
            &self.capabilities.artifact_resolution,
            request.project.base_dir(),
            &modules,
            &excluded,
            self.log,
        )?;

        let mut creator = BundleCreator::new(self.log);
        if let Some(progress) = self.progress {
            creator = creator.with_progress(progress);
        }
        let bundle = creator.create_bundle(
            &artifact_dirs,
            &request.filter,
            &execution_data,
            request.project.name(),
        )?;

        let source_roots = modules
            .iter()
            .flat_map(|module| {
                module
                    .source_roots()
                    .iter()
                    .map(|root| resolve_path(module.base_dir(), root))
                    .collect::<Vec<_>>()
            })
            .collect();

        let classes = bundle.class_count();
        let context = ReportContext {
            bundle,
            sessions,
            source_roots,
            output_directory: request.output_directory.clone(),
        };
        renderer.render(&context)?;

        Ok(ReportOutcome::Generated { classes, merge })
    }
}
