//! Configuration-related data structures

use crate::models::module::{resolve_path, BuildModule, DEFAULT_BUILD_DIRECTORY};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default simple name of the execution data file
pub const DEFAULT_DATA_FILE_NAME: &str = "jacoco.exec";

/// Directory name the report output is placed in
pub const REPORT_DIRECTORY_NAME: &str = "jacoco";

/// Reporting directory below the build directory
pub const DEFAULT_REPORTING_DIRECTORY: &str = "site";

/// Main configuration settings for covagg
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base directory of the project the report is generated for
    pub base_dir: PathBuf,

    /// Name of the coverage bundle (defaults to the base directory name)
    pub project_name: Option<String>,

    /// Build directory of the project (defaults to `<base_dir>/target`)
    pub build_directory: Option<PathBuf>,

    /// Merged execution data file (defaults to `<build_directory>/jacoco.exec`)
    pub data_file: Option<PathBuf>,

    /// Report output directory (defaults to `<build_directory>/site/jacoco`)
    pub output_directory: Option<PathBuf>,

    /// Aggregate the execution data and classes of all reactor modules
    pub aggregate: bool,

    /// Skip the report entirely
    pub skip: bool,

    /// Artifact ids of modules left out of the aggregation
    pub skipped_modules: Vec<String>,

    /// Glob selecting class directories relative to `base_dir`
    pub class_directory_pattern: Option<String>,

    /// Artifact files to include (empty means all known artifact types)
    pub includes: Vec<String>,

    /// Artifact files to exclude
    pub excludes: Vec<String>,

    /// Explicit reactor modules; discovered from the tree when empty
    pub modules: Vec<BuildModule>,

    /// Maximum directory depth for module discovery
    pub max_depth: Option<usize>,

    /// Output format (text, json, csv)
    pub output_format: OutputFormat,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in console output
    pub use_colors: bool,

    /// Whether to show a progress spinner while analyzing
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            project_name: None,
            build_directory: None,
            data_file: None,
            output_directory: None,
            aggregate: false,
            skip: false,
            skipped_modules: Vec::new(),
            class_directory_pattern: None,
            includes: Vec::new(),
            excludes: Vec::new(),
            modules: Vec::new(),
            max_depth: Some(8),
            output_format: OutputFormat::Text,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

impl Settings {
    /// Name used for the coverage bundle
    pub fn resolved_project_name(&self) -> String {
        if let Some(name) = &self.project_name {
            return name.clone();
        }
        self.base_dir
            .canonicalize()
            .ok()
            .as_deref()
            .unwrap_or(self.base_dir.as_path())
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string())
    }

    pub fn resolved_build_directory(&self) -> PathBuf {
        match &self.build_directory {
            Some(dir) => resolve_path(&self.base_dir, dir),
            None => self.base_dir.join(DEFAULT_BUILD_DIRECTORY),
        }
    }

    pub fn resolved_data_file(&self) -> PathBuf {
        match &self.data_file {
            Some(file) => resolve_path(&self.base_dir, file),
            None => self.resolved_build_directory().join(DEFAULT_DATA_FILE_NAME),
        }
    }

    pub fn resolved_output_directory(&self) -> PathBuf {
        match &self.output_directory {
            Some(dir) => resolve_path(&self.base_dir, dir),
            None => self
                .resolved_build_directory()
                .join(DEFAULT_REPORTING_DIRECTORY)
                .join(REPORT_DIRECTORY_NAME),
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl OutputFormat {
    /// File extension of the rendered summary
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialSettings {
    pub base_dir: Option<PathBuf>,
    pub project_name: Option<String>,
    pub build_directory: Option<PathBuf>,
    pub data_file: Option<PathBuf>,
    pub output_directory: Option<PathBuf>,
    pub aggregate: Option<bool>,
    pub skip: Option<bool>,
    pub skipped_modules: Option<Vec<String>>,
    pub class_directory_pattern: Option<String>,
    pub includes: Option<Vec<String>>,
    pub excludes: Option<Vec<String>>,
    pub modules: Option<Vec<BuildModule>>,
    pub max_depth: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.base_dir.is_some() {
            self.base_dir = other.base_dir;
        }
        if other.project_name.is_some() {
            self.project_name = other.project_name;
        }
        if other.build_directory.is_some() {
            self.build_directory = other.build_directory;
        }
        if other.data_file.is_some() {
            self.data_file = other.data_file;
        }
        if other.output_directory.is_some() {
            self.output_directory = other.output_directory;
        }
        if other.aggregate.is_some() {
            self.aggregate = other.aggregate;
        }
        if other.skip.is_some() {
            self.skip = other.skip;
        }
        if other.skipped_modules.is_some() {
            self.skipped_modules = other.skipped_modules;
        }
        if other.class_directory_pattern.is_some() {
            self.class_directory_pattern = other.class_directory_pattern;
        }
        if other.includes.is_some() {
            self.includes = other.includes;
        }
        if other.excludes.is_some() {
            self.excludes = other.excludes;
        }
        if other.modules.is_some() {
            self.modules = other.modules;
        }
        if other.max_depth.is_some() {
            self.max_depth = other.max_depth;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(base_dir) = &self.base_dir {
            settings.base_dir = base_dir.clone();
        }
        if let Some(project_name) = &self.project_name {
            settings.project_name = Some(project_name.clone());
        }
        if let Some(build_directory) = &self.build_directory {
            settings.build_directory = Some(build_directory.clone());
        }
        if let Some(data_file) = &self.data_file {
            settings.data_file = Some(data_file.clone());
        }
        if let Some(output_directory) = &self.output_directory {
            settings.output_directory = Some(output_directory.clone());
        }
        if let Some(aggregate) = self.aggregate {
            settings.aggregate = aggregate;
        }
        if let Some(skip) = self.skip {
            settings.skip = skip;
        }
        if let Some(skipped_modules) = &self.skipped_modules {
            settings.skipped_modules = skipped_modules.clone();
        }
        if let Some(pattern) = &self.class_directory_pattern {
            settings.class_directory_pattern = Some(pattern.clone());
        }
        if let Some(includes) = &self.includes {
            settings.includes = includes.clone();
        }
        if let Some(excludes) = &self.excludes {
            settings.excludes = excludes.clone();
        }
        if let Some(modules) = &self.modules {
            settings.modules = modules.clone();
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = Some(max_depth);
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }

        settings
    }
}
