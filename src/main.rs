use std::process;
use std::time::Instant;

use covagg::{
    cli::{Args, Command},
    core::pipeline::ReportOutcome,
    error::CovaggError,
    NAME, VERSION,
};

fn main() {
    let args = Args::parse_args();
    let quiet = args.quiet;
    let verbose = args.verbose;

    let command = Command::from_args(args);

    let start_time = Instant::now();
    let exit_code = match command.execute() {
        Ok(outcome) => {
            if verbose {
                if let Some(ReportOutcome::Generated { classes, .. }) = outcome {
                    println!(
                        "{} v{}: analyzed {} classes in {:.2?}",
                        NAME,
                        VERSION,
                        classes,
                        start_time.elapsed()
                    );
                }
            }
            0
        }
        Err(err) => report_error(&err, quiet),
    };

    process::exit(exit_code);
}

/// Print an error with a suggestion and return the exit code for it
fn report_error(err: &CovaggError, quiet: bool) -> i32 {
    eprintln!("\nError: {}", err.user_message());

    if !quiet {
        if let Some(suggestion) = suggestion_for(err) {
            eprintln!("Suggestion: {}", suggestion);
        } else if err.is_critical() {
            eprintln!("Suggestion: Run '{} --help' to review the available options", NAME);
        }
    }

    let exit_code = err.severity().exit_code();

    if exit_code > 0 && !quiet {
        eprintln!("\nExiting with code {} due to {}", exit_code, err.severity());
    }

    exit_code
}

fn suggestion_for(err: &CovaggError) -> Option<&'static str> {
    match err {
        CovaggError::InvalidPath { .. } => Some("Check that the path exists and is a directory"),
        CovaggError::ConfigNotFound { .. } => {
            Some("Create a .covagg.toml file with --init or specify a config file with --config")
        }
        CovaggError::ConfigParse { .. } => {
            Some("Check the configuration file for unknown or misspelled keys")
        }
        CovaggError::IncompatibleExecData { .. } => {
            Some("Regenerate the execution data with a current JaCoCo agent")
        }
        CovaggError::ExecWrite { .. } | CovaggError::ReportWrite { .. } => {
            Some("Check that the target directory is writable")
        }
        _ => None,
    }
}
