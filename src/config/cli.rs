//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::{Args, OutputFormat as CliOutputFormat};
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Command-line arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub aggregate: bool,
    pub skip: bool,
    pub skip_modules: Option<Vec<String>>,
    pub class_directory_pattern: Option<String>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub data_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub output_format: Option<OutputFormat>,
    pub project_name: Option<String>,
    pub max_depth: Option<usize>,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub config: Option<PathBuf>,
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        Self {
            path: args.path.clone(),
            aggregate: args.aggregate,
            skip: args.skip,
            skip_modules: non_empty(&args.skip_modules),
            class_directory_pattern: args.class_directory_pattern.clone(),
            include: non_empty(&args.include),
            exclude: non_empty(&args.exclude),
            data_file: args.data_file.clone(),
            output_dir: args.output_dir.clone(),
            output_format: args.output.map(|format| match format {
                CliOutputFormat::Text => OutputFormat::Text,
                CliOutputFormat::Json => OutputFormat::Json,
                CliOutputFormat::Csv => OutputFormat::Csv,
            }),
            project_name: args.project_name.clone(),
            max_depth: args.max_depth,
            quiet: args.quiet,
            verbose: args.verbose,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30,
        }
    }

    /// Create a CLI configuration source from Args
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;
        let mut settings = PartialSettings {
            base_dir: args.path.clone(),
            skipped_modules: args.skip_modules.clone(),
            class_directory_pattern: args.class_directory_pattern.clone(),
            includes: args.include.clone(),
            excludes: args.exclude.clone(),
            data_file: args.data_file.clone(),
            output_directory: args.output_dir.clone(),
            output_format: args.output_format,
            project_name: args.project_name.clone(),
            max_depth: args.max_depth,
            ..Default::default()
        };

        // Absent flags leave lower-priority sources alone
        if args.aggregate {
            settings.aggregate = Some(true);
        }
        if args.skip {
            settings.skip = Some(true);
        }
        if args.quiet {
            settings.quiet = Some(true);
        }
        if args.verbose {
            settings.verbose = Some(true);
        }
        if args.no_colors {
            settings.use_colors = Some(false);
        }
        if args.no_progress {
            settings.show_progress = Some(false);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
