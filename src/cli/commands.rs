//! Command implementations

use std::path::PathBuf;

use super::Args;
use crate::config::{self, file::DEFAULT_CONFIG_FILE, CliArgs};
use crate::core::discovery::{project_module, reactor_modules};
use crate::core::merger::MergeOutcome;
use crate::core::pipeline::{
    resolve_report_output_directory, Capabilities, ReportOutcome, ReportPipeline, ReportRequest,
};
use crate::error::Result;
use crate::models::config::Settings;
use crate::models::filter::FileFilter;
use crate::output::{ConsoleLog, Log, ProgressReporter, SummaryRenderer};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Merge execution data and generate the coverage report
    Report(Args),
    /// Initialize a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }
        Command::Report(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<Option<ReportOutcome>> {
        match self {
            Command::Report(args) => {
                let settings = config::load_config(CliArgs::from(args))?;
                report(&settings).map(Some)
            }
            Command::Init => {
                init(PathBuf::from(DEFAULT_CONFIG_FILE))?;
                Ok(None)
            }
        }
    }

    /// Run the command and map failures to an exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(_) => 0,
            Err(err) => {
                eprintln!("{}: {}", err.severity(), err.user_message());
                err.severity().exit_code()
            }
        }
    }
}

/// Run the report pipeline for fully resolved settings
pub fn report(settings: &Settings) -> Result<ReportOutcome> {
    let log = ConsoleLog::new(settings.quiet, settings.verbose, settings.use_colors);
    let progress =
        ProgressReporter::new(settings.show_progress && !settings.quiet, settings.verbose);

    log.verbose(&format!("Settings: {:#?}", settings));

    let project = project_module(settings);
    let reactor = if settings.aggregate {
        reactor_modules(settings, &log)?
    } else {
        vec![project.clone()]
    };

    let request = ReportRequest {
        project: &project,
        reactor: &reactor,
        excluded_ids: &settings.skipped_modules,
        data_file: settings.resolved_data_file(),
        output_directory: resolve_report_output_directory(&settings.resolved_output_directory()),
        filter: FileFilter::new(settings.includes.clone(), settings.excludes.clone()),
        skip: settings.skip,
    };

    let renderer = SummaryRenderer::new(
        settings.output_format,
        settings.use_colors,
        settings.verbose,
        settings.quiet,
    );

    let outcome = ReportPipeline::new(Capabilities::from_settings(settings), &log)
        .with_progress(&progress)
        .run(&request, &renderer)?;

    if let ReportOutcome::Generated {
        merge: Some(MergeOutcome::Written { path, sessions, .. }),
        ..
    } = &outcome
    {
        log.verbose(&format!(
            "Merged {} sessions into {}",
            sessions,
            path.display()
        ));
    }

    Ok(outcome)
}

/// Write the default configuration file unless one is already there
pub fn init(config_path: PathBuf) -> Result<bool> {
    if config_path.exists() {
        println!("Configuration file already exists at: {}", config_path.display());
        println!("To overwrite it, delete the file first and run this command again.");
        return Ok(false);
    }

    config::create_default_config(&config_path)?;

    println!("Created default configuration file at: {}", config_path.display());
    println!("\nExample configuration options:");
    println!("  - aggregate: Merge and report all reactor modules");
    println!("  - skipped_modules: Artifact ids left out of the aggregate report");
    println!("  - class_directory_pattern: Glob selecting class directories");
    println!("  - includes / excludes: Artifact file filters");
    println!("  - output_format: Output format (text, json, csv)");

    Ok(true)
}
