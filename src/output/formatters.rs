//! Output formatting functionality
//!
//! This module renders a report context as text, JSON or CSV.

use crate::core::pipeline::ReportContext;
use crate::error::{CovaggError, Result};
use crate::models::coverage::{BundleSummary, ClassCoverage, CoverageStatus};
use crate::models::execution_data::SessionInfo;
use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;
use serde::Serialize;
use std::path::PathBuf;

/// Paint `text` with `style` when colors are enabled
fn paint(text: &str, style: Style, use_colors: bool) -> String {
    if use_colors {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

fn status_label(status: CoverageStatus, use_colors: bool) -> String {
    let style = match status {
        CoverageStatus::Covered => Green.normal(),
        CoverageStatus::NotExecuted => Style::new().dimmed(),
        CoverageStatus::Mismatch => Yellow.bold(),
    };
    paint(&status.to_string(), style, use_colors)
}

fn format_timestamp(millis: Option<chrono::DateTime<chrono::Utc>>) -> String {
    millis
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// One-line summary used in quiet mode
pub fn format_summary_line(name: &str, summary: &BundleSummary) -> String {
    format!(
        "{}: {} classes, {}/{} probes ({:.1}%)\n",
        name,
        summary.total_classes,
        summary.hit_probes,
        summary.total_probes,
        summary.probe_percentage()
    )
}

/// Format the bundle summary as text
pub fn format_summary_text(context: &ReportContext, use_colors: bool) -> String {
    let mut output = String::new();
    let summary = context.bundle.summary();

    output.push_str(&format!(
        "{}\n\n",
        paint(
            &format!("Coverage Report: {}", context.bundle.name),
            Blue.bold(),
            use_colors
        )
    ));

    output.push_str(&format!("Classes: {}\n", summary.total_classes));
    output.push_str(&format!("  Covered: {}\n", summary.covered_classes));
    output.push_str(&format!("  Not executed: {}\n", summary.not_executed_classes));
    if summary.mismatched_classes > 0 {
        output.push_str(&format!(
            "  {}\n",
            paint(
                &format!("Mismatched: {}", summary.mismatched_classes),
                Red.bold(),
                use_colors
            )
        ));
    }
    output.push_str(&format!(
        "Probes: {}/{} ({:.1}%)\n",
        summary.hit_probes,
        summary.total_probes,
        summary.probe_percentage()
    ));
    output.push_str(&format!("Sessions: {}\n", context.sessions.len()));
    output.push_str(&format!("Source roots: {}\n", context.source_roots.len()));
    output.push_str(&format!("Report directory: {}\n", context.output_directory.display()));

    output
}

/// Format the full report as text: summary, sessions and one row per class
pub fn format_report_text(context: &ReportContext, use_colors: bool) -> String {
    let mut output = format_summary_text(context, use_colors);

    if !context.sessions.is_empty() {
        output.push_str("\nSessions:\n");
        for info in context.sessions.infos() {
            output.push_str(&format!(
                "  {}  started {}  dumped {}\n",
                info.id,
                format_timestamp(info.start_time()),
                format_timestamp(info.dump_time())
            ));
        }
    }

    if !context.source_roots.is_empty() {
        output.push_str("\nSource roots:\n");
        for root in &context.source_roots {
            output.push_str(&format!("  {}\n", root.display()));
        }
    }

    output.push_str("\nClasses:\n");
    for class in context.bundle.classes() {
        output.push_str(&format!(
            "  {:<60} {:016x} {:>5}/{:<5} {}\n",
            class.name,
            class.id,
            class.probes_hit,
            class.probes_total,
            status_label(class.status, use_colors)
        ));
    }

    output
}

#[derive(Serialize)]
struct JsonReport<'a> {
    name: &'a str,
    summary: BundleSummary,
    probe_percentage: f64,
    sessions: Vec<&'a SessionInfo>,
    source_roots: &'a [PathBuf],
    classes: Vec<&'a ClassCoverage>,
}

/// Format the report as pretty-printed JSON
pub fn format_report_json(context: &ReportContext) -> Result<String> {
    let summary = context.bundle.summary();
    let report = JsonReport {
        name: &context.bundle.name,
        probe_percentage: summary.probe_percentage(),
        summary,
        sessions: context.sessions.infos(),
        source_roots: &context.source_roots,
        classes: context.bundle.classes().collect(),
    };
    serde_json::to_string_pretty(&report).map_err(|e| CovaggError::JsonSerialize { source: e })
}

/// Format the report as CSV, one row per class plus a summary row
pub fn format_report_csv(context: &ReportContext) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record([
        "Class",
        "Package",
        "Id",
        "Probes",
        "Hit Probes",
        "Coverage (%)",
        "Status",
        "Location",
    ])?;

    for class in context.bundle.classes() {
        writer.write_record([
            class.name.as_str(),
            class.package_name(),
            &format!("{:016x}", class.id),
            &class.probes_total.to_string(),
            &class.probes_hit.to_string(),
            &format!("{:.1}", class.percentage()),
            &class.status.to_string(),
            &class.location.display().to_string(),
        ])?;
    }

    let summary = context.bundle.summary();
    writer.write_record([
        "SUMMARY",
        "",
        "",
        &summary.total_probes.to_string(),
        &summary.hit_probes.to_string(),
        &format!("{:.1}", summary.probe_percentage()),
        "",
        "",
    ])?;

    let bytes = writer
        .into_inner()
        .map_err(|e| CovaggError::io_error(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| CovaggError::CsvSerialize { source: e })
}
