//! Report files written by the summary renderer

use std::fs;
use std::io::Write;

use tempfile::tempdir;

use covagg::core::pipeline::{Capabilities, ModuleSource, ReportPipeline, ReportRequest};
use covagg::core::ArtifactResolution;
use covagg::models::config::OutputFormat;
use covagg::models::execution_data::ExecutionData;
use covagg::models::filter::FileFilter;
use covagg::models::module::BuildModule;
use covagg::output::{MemoryLog, SummaryRenderer};
use covagg::parsers::class_file::minimal_class_bytes;

use super::common::{classes_dir, write_class, write_exec};

fn single_project() -> Capabilities {
    Capabilities {
        artifact_resolution: ArtifactResolution::SingleDir,
        module_source: ModuleSource::SelfOnly,
    }
}

/// A project whose classes directory holds a loose class, a jar and a class
/// whose execution data was recorded for other bytecode
fn project(root: &std::path::Path) -> BuildModule {
    let project = BuildModule::conventional("shop", root);
    let classes = classes_dir(&project);
    let cart = write_class(&classes, "com/shop/Cart");
    write_class(&classes, "com/shop/Checkout");

    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    let mut jar = zip::ZipWriter::new(fs::File::create(classes.join("vendor.jar")).unwrap());
    jar.start_file("com/vendor/Tax.class", options).unwrap();
    jar.write_all(&minimal_class_bytes("com/vendor/Tax")).unwrap();
    jar.finish().unwrap();

    write_exec(
        &root.join("target/jacoco.exec"),
        "shop-session",
        1_700_000_000_000,
        &[
            ExecutionData::new(cart, "com/shop/Cart", vec![true, true, false, false]),
            ExecutionData::new(0xDEAD, "com/shop/Checkout", vec![true]),
        ],
    );
    project
}

fn render(format: OutputFormat) -> (tempfile::TempDir, String, MemoryLog) {
    let dir = tempdir().unwrap();
    let project = project(dir.path());
    let reactor = vec![project.clone()];
    let log = MemoryLog::new();
    let output_directory = dir.path().join("target/site/jacoco");

    let request = ReportRequest {
        project: &project,
        reactor: &reactor,
        excluded_ids: &[],
        data_file: dir.path().join("target/jacoco.exec"),
        output_directory: output_directory.clone(),
        filter: FileFilter::default(),
        skip: false,
    };
    let renderer = SummaryRenderer::new(format, false, false, true);
    ReportPipeline::new(single_project(), &log)
        .run(&request, &renderer)
        .unwrap();

    let index = output_directory.join(format!("index.{}", format.extension()));
    let content = fs::read_to_string(index).unwrap();
    (dir, content, log)
}

#[test]
fn test_text_index() {
    let (_dir, content, log) = render(OutputFormat::Text);

    assert!(content.contains("Coverage Report: shop"));
    assert!(content.contains("Classes: 3"));
    assert!(content.contains("Mismatched: 1"));
    assert!(content.contains("Probes: 2/4 (50.0%)"));
    assert!(content.contains("com/vendor/Tax"));
    assert!(!content.contains('\u{1b}'));
    assert!(log.contains("com/shop/Checkout"));
}

#[test]
fn test_json_index() {
    let (_dir, content, _log) = render(OutputFormat::Json);
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(json["name"], "shop");
    assert_eq!(json["summary"]["covered_classes"], 1);
    assert_eq!(json["summary"]["not_executed_classes"], 1);
    assert_eq!(json["summary"]["mismatched_classes"], 1);
    assert_eq!(json["sessions"][0]["id"], "shop-session");
    let tax = json["classes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "com/vendor/Tax")
        .unwrap();
    assert!(tax["location"].as_str().unwrap().contains("vendor.jar@com/vendor/Tax.class"));
}

#[test]
fn test_csv_index() {
    let (_dir, content, _log) = render(OutputFormat::Csv);
    let mut reader = csv::Reader::from_reader(content.as_bytes());

    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "Class");
    assert_eq!(&headers[6], "Status");

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    let cart = rows.iter().find(|r| &r[0] == "com/shop/Cart").unwrap();
    assert_eq!(&cart[1], "com/shop");
    assert_eq!(&cart[3], "4");
    assert_eq!(&cart[4], "2");
    assert_eq!(&rows.last().unwrap()[0], "SUMMARY");
}
