use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tempfile::tempdir;

use covagg::cli::args::{Args, OutputFormat as CliOutputFormat};
use covagg::cli::commands::{report, Command};
use covagg::config::{load_config_with_env_prefix, CliArgs};
use covagg::core::merger::MergeOutcome;
use covagg::core::pipeline::ReportOutcome;
use covagg::models::config::{OutputFormat, Settings};

use super::common::{covered_module, module, write_class, classes_dir};

#[test]
fn test_cli_args_parsing() {
    let args = Args::parse_from(["covagg"]);
    assert_eq!(args.path, None);
    assert!(!args.aggregate);
    assert!(args.skip_modules.is_empty());
    assert_eq!(args.output, None);

    let args = Args::parse_from([
        "covagg",
        "-p",
        "/work/app",
        "-a",
        "--class-directory-pattern",
        "modules/*/target/classes",
        "-i",
        "**/*.class",
        "-e",
        "**/*Test.class",
        "--data-file",
        "target/all.exec",
        "--max-depth",
        "4",
        "-o",
        "csv",
        "-q",
        "--no-colors",
        "--no-progress",
    ]);

    assert_eq!(args.path, Some(PathBuf::from("/work/app")));
    assert!(args.aggregate);
    assert_eq!(
        args.class_directory_pattern.as_deref(),
        Some("modules/*/target/classes")
    );
    assert_eq!(args.include, vec!["**/*.class"]);
    assert_eq!(args.exclude, vec!["**/*Test.class"]);
    assert_eq!(args.data_file, Some(PathBuf::from("target/all.exec")));
    assert_eq!(args.max_depth, Some(4));
    assert_eq!(args.output, Some(CliOutputFormat::Csv));
    assert!(args.quiet);
    assert!(args.no_colors);
    assert!(args.no_progress);
}

#[test]
fn test_config_file_and_cli_are_layered() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("covagg.toml");
    fs::write(
        &config_path,
        r#"
            aggregate = true
            skipped_modules = ["it"]
            output_format = "csv"
            max_depth = 3
        "#,
    )
    .unwrap();

    let args = Args::parse_from([
        "covagg".to_string(),
        "--path".to_string(),
        dir.path().display().to_string(),
        "--config".to_string(),
        config_path.display().to_string(),
        "--output".to_string(),
        "json".to_string(),
    ]);
    let settings = load_config_with_env_prefix(CliArgs::from(&args), "COVAGG_CLI_TEST").unwrap();

    assert!(settings.aggregate);
    assert_eq!(settings.skipped_modules, vec!["it".to_string()]);
    assert_eq!(settings.max_depth, Some(3));
    assert_eq!(settings.output_format, OutputFormat::Json);
    assert_eq!(settings.base_dir, dir.path());
}

#[test]
fn test_aggregate_report_end_to_end() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("pom.xml"), "<project/>").unwrap();
    covered_module(dir.path(), "core", "com/acme/core/Engine", 2);
    covered_module(dir.path(), "web", "com/acme/web/Controller", 4);
    let it = module(dir.path(), "it");
    write_class(&classes_dir(&it), "com/acme/it/Smoke");

    let settings = Settings {
        base_dir: dir.path().to_path_buf(),
        aggregate: true,
        skipped_modules: vec!["it".to_string()],
        output_format: OutputFormat::Json,
        quiet: true,
        show_progress: false,
        use_colors: false,
        ..Default::default()
    };

    let outcome = report(&settings).unwrap();
    let merged = dir.path().join("target").join("jacoco.exec");
    assert_eq!(
        outcome,
        ReportOutcome::Generated {
            classes: 2,
            merge: Some(MergeOutcome::Written {
                path: merged.clone(),
                classes: 2,
                sessions: 2,
            }),
        }
    );

    let index = dir.path().join("target/site/jacoco/index.json");
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(index).unwrap()).unwrap();
    assert_eq!(json["summary"]["total_classes"], 2);
    assert_eq!(json["summary"]["hit_probes"], 6);
    assert_eq!(json["sessions"].as_array().unwrap().len(), 2);

    // A second run reuses the merged file as is
    let before = fs::read(&merged).unwrap();
    let outcome = report(&settings).unwrap();
    assert!(matches!(outcome, ReportOutcome::Generated { merge: None, .. }));
    assert_eq!(fs::read(&merged).unwrap(), before);
}

#[test]
fn test_output_directory_gets_jacoco_appended() {
    let dir = tempdir().unwrap();
    let settings = Settings {
        base_dir: dir.path().to_path_buf(),
        output_directory: Some(PathBuf::from("reports")),
        output_format: OutputFormat::Csv,
        quiet: true,
        show_progress: false,
        ..Default::default()
    };

    report(&settings).unwrap();
    assert!(dir.path().join("reports/jacoco/index.csv").is_file());
}

#[test]
fn test_exit_code_for_invalid_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("broken.toml");
    fs::write(&config_path, "no_such_key = 1").unwrap();

    let args = Args {
        path: Some(dir.path().to_path_buf()),
        config: Some(config_path),
        quiet: true,
        ..Default::default()
    };
    assert_eq!(Command::from_args(args).run(), 2);
}
