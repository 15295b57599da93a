//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// covagg - multi-module JaCoCo execution data merge and coverage reporting
#[derive(Parser, Debug, Default)]
#[command(name = "covagg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Merge per-module JaCoCo execution data and report coverage across a multi-module build")]
#[command(long_about = "covagg merges the jacoco.exec files of the modules of a multi-module build into one \
execution data file, analyzes the compiled classes of every included module against it and writes a \
coverage summary into the report directory.")]
#[command(after_help = "EXAMPLES:

Single project:
    # Report on the project in the current directory
    covagg

    # Report on another project
    covagg --path ./my-project

Aggregate report:
    # Merge and report all modules found below the project
    covagg --aggregate

    # Leave integration test modules out
    covagg --aggregate --skip-module it-tests --skip-module e2e

    # Pick class directories by pattern instead of module output directories
    covagg --aggregate --class-directory-pattern 'modules/*/target/classes'

Filtering:
    # Only analyze class files, leaving out test classes
    covagg --include '**/*.class' --exclude '**/*Test.class'

Output:
    # JSON summary in a custom report directory
    covagg --output json --output-dir build/coverage

Configuration:
    # Use a specific configuration file
    covagg --config ./covagg.toml

    # Create a default configuration file
    covagg --init
")]
pub struct Args {
    /// Project base directory
    #[arg(short, long, value_name = "PATH", help = "Project base directory (defaults to the current directory)")]
    pub path: Option<PathBuf>,

    /// Merge and report all reactor modules
    #[arg(short, long, help = "Merge the execution data of all included modules and report on their classes together")]
    pub aggregate: bool,

    /// Skip the report
    #[arg(long, help = "Skip the report entirely")]
    pub skip: bool,

    /// Modules left out of the aggregate report
    #[arg(long = "skip-module", value_name = "ARTIFACT_ID", help = "Artifact id of a module to leave out (can be specified multiple times)")]
    pub skip_modules: Vec<String>,

    /// Glob selecting class directories
    #[arg(long, value_name = "PATTERN", help = "Glob selecting class directories relative to the base directory, e.g. 'modules/*/target/classes'")]
    pub class_directory_pattern: Option<String>,

    /// Artifact files to include
    #[arg(short, long, value_name = "PATTERN", help = "Artifact files to include (can be specified multiple times, defaults to all class and archive files)")]
    pub include: Vec<String>,

    /// Artifact files to exclude
    #[arg(short, long, value_name = "PATTERN", help = "Artifact files to exclude (can be specified multiple times)")]
    pub exclude: Vec<String>,

    /// Merged execution data file
    #[arg(long, value_name = "FILE", help = "Merged execution data file (defaults to target/jacoco.exec)")]
    pub data_file: Option<PathBuf>,

    /// Report directory
    #[arg(long = "output-dir", value_name = "DIR", help = "Report directory; 'jacoco' is appended unless the path already ends with it")]
    pub output_dir: Option<PathBuf>,

    /// Output format (text, json, csv)
    #[arg(short, long, value_enum, help = "Format of the summary written to the report directory: 'text', 'json' or 'csv'")]
    pub output: Option<OutputFormat>,

    /// Name of the coverage bundle
    #[arg(long, value_name = "NAME", help = "Name of the coverage bundle (defaults to the base directory name)")]
    pub project_name: Option<String>,

    /// Maximum depth for module discovery
    #[arg(long, value_name = "DEPTH", help = "Maximum directory depth searched for modules")]
    pub max_depth: Option<usize>,

    /// Suppress non-essential output
    #[arg(short, long, help = "Suppress non-essential output (only a one-line summary and warnings)")]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long, help = "Show detailed progress, skipped directories and the per-class listing")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output")]
    pub no_colors: bool,

    /// Disable the progress spinner
    #[arg(long, help = "Disable the progress spinner (useful for CI environments)")]
    pub no_progress: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .covagg.toml in the current directory)")]
    pub config: Option<PathBuf>,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.covagg.toml) in the current directory")]
    pub init: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
