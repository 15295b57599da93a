//! End-to-end runs of the report pipeline over multi-module builds on disk

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use covagg::core::merger::MergeOutcome;
use covagg::core::pipeline::{
    Capabilities, ModuleSource, ReportOutcome, ReportPipeline, ReportRequest,
};
use covagg::core::ArtifactResolution;
use covagg::models::coverage::CoverageStatus;
use covagg::models::filter::FileFilter;
use covagg::models::module::BuildModule;
use covagg::output::{LogLevel, MemoryLog, ProgressReporter};

use super::common::{
    classes_dir, covered_module, exec_file, module, write_class, RecordingRenderer,
};

fn aggregate() -> Capabilities {
    Capabilities {
        artifact_resolution: ArtifactResolution::SingleDir,
        module_source: ModuleSource::ReactorSiblings,
    }
}

fn request<'a>(
    root: &'a BuildModule,
    reactor: &'a [BuildModule],
    excluded_ids: &'a [String],
    filter: FileFilter,
) -> ReportRequest<'a, BuildModule> {
    ReportRequest {
        project: root,
        reactor,
        excluded_ids,
        data_file: root.base_dir.join("target").join("jacoco.exec"),
        output_directory: root.base_dir.join("target").join("site").join("jacoco"),
        filter,
        skip: false,
    }
}

fn reactor(root_dir: &Path) -> Vec<BuildModule> {
    let root = BuildModule::conventional("parent", root_dir);
    let (core, _) = covered_module(root_dir, "core", "com/acme/core/Engine", 3);
    let (web, _) = covered_module(root_dir, "web", "com/acme/web/Controller", 1);
    vec![root, core, web]
}

#[test]
fn test_aggregate_report_merges_and_analyzes_all_modules() {
    let dir = tempdir().unwrap();
    let modules = reactor(dir.path());
    let log = MemoryLog::new();
    let renderer = RecordingRenderer::default();
    let progress = ProgressReporter::hidden();

    let outcome = ReportPipeline::new(aggregate(), &log)
        .with_progress(&progress)
        .run(&request(&modules[0], &modules, &[], FileFilter::default()), &renderer)
        .unwrap();

    assert_eq!(progress.processed(), 2);
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
    assert!(merged.is_file());

    let context = renderer.last();
    assert_eq!(context.sessions.len(), 2);
    let engine = context.bundle.class("com/acme/core/Engine").unwrap();
    assert_eq!(engine.status, CoverageStatus::Covered);
    assert_eq!((engine.probes_hit, engine.probes_total), (3, 4));
    let controller = context.bundle.class("com/acme/web/Controller").unwrap();
    assert_eq!((controller.probes_hit, controller.probes_total), (1, 4));

    assert!(log.contains(&format!(
        "Loading execution data file {}",
        exec_file(&modules[1]).display()
    )));
    assert!(log.contains(&format!("Writing merged execution data to {}", merged.display())));
}

#[test]
fn test_existing_data_file_is_used_unchanged() {
    let dir = tempdir().unwrap();
    let modules = reactor(dir.path());
    let log = MemoryLog::new();
    let renderer = RecordingRenderer::default();
    let pipeline = ReportPipeline::new(aggregate(), &log);
    let request = request(&modules[0], &modules, &[], FileFilter::default());

    pipeline.run(&request, &renderer).unwrap();
    let first = fs::read(&request.data_file).unwrap();

    // New module data appearing after the first run must not be merged in
    let (late, _) = covered_module(dir.path(), "late", "com/acme/late/Job", 4);
    let mut grown = modules.clone();
    grown.push(late);
    let second_request = ReportRequest {
        reactor: &grown,
        ..request
    };
    let outcome = pipeline.run(&second_request, &renderer).unwrap();

    assert!(matches!(outcome, ReportOutcome::Generated { merge: None, .. }));
    assert_eq!(fs::read(&second_request.data_file).unwrap(), first);

    let job = renderer.last();
    let job = job.bundle.class("com/acme/late/Job").unwrap();
    assert_eq!(job.status, CoverageStatus::NotExecuted);
}

#[test]
fn test_report_without_any_execution_data() {
    let dir = tempdir().unwrap();
    let root = BuildModule::conventional("parent", dir.path());
    let core = module(dir.path(), "core");
    write_class(&classes_dir(&core), "com/acme/core/Engine");
    let modules = vec![root, core];
    let log = MemoryLog::new();
    let renderer = RecordingRenderer::default();

    let request = request(&modules[0], &modules, &[], FileFilter::default());
    let outcome = ReportPipeline::new(aggregate(), &log)
        .run(&request, &renderer)
        .unwrap();

    assert_eq!(
        outcome,
        ReportOutcome::Generated {
            classes: 1,
            merge: Some(MergeOutcome::Skipped),
        }
    );
    assert!(!request.data_file.exists());
    assert!(log.contains("Skipping JaCoCo merge execution due to missing execution data files"));

    let context = renderer.last();
    assert!(context.sessions.is_empty());
    assert_eq!(
        context.bundle.class("com/acme/core/Engine").unwrap().status,
        CoverageStatus::NotExecuted
    );
}

#[test]
fn test_excluded_module_contributes_nothing() {
    let dir = tempdir().unwrap();
    let modules = reactor(dir.path());
    let log = MemoryLog::new();
    let renderer = RecordingRenderer::default();
    let excluded = vec!["web".to_string()];

    let outcome = ReportPipeline::new(aggregate(), &log)
        .run(
            &request(&modules[0], &modules, &excluded, FileFilter::default()),
            &renderer,
        )
        .unwrap();

    assert!(matches!(
        outcome,
        ReportOutcome::Generated {
            classes: 1,
            merge: Some(MergeOutcome::Written { classes: 1, sessions: 1, .. }),
        }
    ));
    let context = renderer.last();
    assert!(context.bundle.class("com/acme/web/Controller").is_none());
    assert!(!log.contains(&exec_file(&modules[2]).display().to_string()));
}

#[test]
fn test_excludes_remove_matching_class_files() {
    let dir = tempdir().unwrap();
    let modules = reactor(dir.path());
    write_class(&classes_dir(&modules[1]), "com/acme/core/EngineTest");
    let log = MemoryLog::new();
    let renderer = RecordingRenderer::default();

    let filter = FileFilter::new(Vec::new(), vec!["**/*Test.class".to_string()]);
    ReportPipeline::new(aggregate(), &log)
        .run(&request(&modules[0], &modules, &[], filter), &renderer)
        .unwrap();

    let context = renderer.last();
    assert!(context.bundle.class("com/acme/core/EngineTest").is_none());
    assert!(context.bundle.class("com/acme/core/Engine").is_some());
}

#[test]
fn test_module_without_classes_is_skipped() {
    let dir = tempdir().unwrap();
    let mut modules = reactor(dir.path());
    modules.push(module(dir.path(), "docs"));
    let log = MemoryLog::new();
    let renderer = RecordingRenderer::default();

    let outcome = ReportPipeline::new(aggregate(), &log)
        .run(&request(&modules[0], &modules, &[], FileFilter::default()), &renderer)
        .unwrap();

    assert!(matches!(outcome, ReportOutcome::Generated { classes: 2, .. }));
    assert!(log.lines().iter().all(|(level, _)| *level != LogLevel::Warn));
}

#[test]
fn test_pattern_selects_only_matching_directories() {
    let dir = tempdir().unwrap();
    let root = BuildModule::conventional("parent", dir.path());
    let alpha = dir.path().join("modules/alpha/target/classes");
    let beta = dir.path().join("modules/beta/target/classes");
    let stray = dir.path().join("modules/beta/target/test-classes");
    write_class(&alpha, "com/acme/Alpha");
    write_class(&beta, "com/acme/Beta");
    write_class(&stray, "com/acme/BetaTest");
    let modules = vec![root];
    let log = MemoryLog::new();
    let renderer = RecordingRenderer::default();

    let capabilities = Capabilities {
        artifact_resolution: ArtifactResolution::PatternScan(
            "modules/*/target/classes".to_string(),
        ),
        module_source: ModuleSource::SelfOnly,
    };
    ReportPipeline::new(capabilities, &log)
        .run(&request(&modules[0], &modules, &[], FileFilter::default()), &renderer)
        .unwrap();

    let context = renderer.last();
    let names: Vec<&str> = context.bundle.classes().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["com/acme/Alpha", "com/acme/Beta"]);
    assert!(log.contains("Found 2 class directories matching 'modules/*/target/classes'"));
    assert!(log.contains(&alpha.display().to_string()));
}

#[test]
fn test_pattern_in_aggregate_mode_honours_excluded_modules() {
    let dir = tempdir().unwrap();
    let root = BuildModule::conventional("parent", dir.path());
    let alpha = BuildModule::conventional("alpha", dir.path().join("modules/alpha"));
    let beta = BuildModule::conventional("beta", dir.path().join("modules/beta"));
    write_class(&classes_dir(&alpha), "com/acme/Alpha");
    write_class(&classes_dir(&beta), "com/acme/Beta");
    let modules = vec![root, alpha, beta];
    let excluded = vec!["beta".to_string()];
    let log = MemoryLog::new();
    let renderer = RecordingRenderer::default();

    let capabilities = Capabilities {
        artifact_resolution: ArtifactResolution::PatternScan(
            "modules/*/target/classes".to_string(),
        ),
        module_source: ModuleSource::ReactorSiblings,
    };
    let outcome = ReportPipeline::new(capabilities, &log)
        .run(
            &request(&modules[0], &modules, &excluded, FileFilter::default()),
            &renderer,
        )
        .unwrap();

    assert!(matches!(outcome, ReportOutcome::Generated { classes: 1, .. }));
    let context = renderer.last();
    let names: Vec<&str> = context.bundle.classes().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["com/acme/Alpha"]);
    assert!(log.contains(&format!(
        "Skipping {} of an excluded module",
        classes_dir(&modules[2]).display()
    )));
}

#[test]
fn test_pattern_without_matches_is_not_fatal() {
    let dir = tempdir().unwrap();
    let modules = vec![BuildModule::conventional("parent", dir.path())];
    let log = MemoryLog::new();
    let renderer = RecordingRenderer::default();

    let capabilities = Capabilities {
        artifact_resolution: ArtifactResolution::PatternScan("nowhere/*/classes".to_string()),
        module_source: ModuleSource::SelfOnly,
    };
    let outcome = ReportPipeline::new(capabilities, &log)
        .run(&request(&modules[0], &modules, &[], FileFilter::default()), &renderer)
        .unwrap();

    assert!(matches!(outcome, ReportOutcome::Generated { classes: 0, .. }));
    assert!(log.lines().iter().any(|(level, _)| *level == LogLevel::Warn));
}

#[test]
fn test_unwritable_merge_target_fails_the_run() {
    let dir = tempdir().unwrap();
    let modules = reactor(dir.path());
    // A regular file where the merged file's parent directory should be
    fs::write(dir.path().join("blocked"), "").unwrap();
    let log = MemoryLog::new();
    let renderer = RecordingRenderer::default();

    let request = ReportRequest {
        data_file: dir.path().join("blocked").join("jacoco.exec"),
        ..request(&modules[0], &modules, &[], FileFilter::default())
    };
    let result = ReportPipeline::new(aggregate(), &log).run(&request, &renderer);

    assert!(matches!(result, Err(covagg::CovaggError::ExecWrite { .. })));
    assert!(renderer.contexts.borrow().is_empty());
}

#[test]
fn test_skip_does_nothing() {
    let dir = tempdir().unwrap();
    let modules = reactor(dir.path());
    let log = MemoryLog::new();
    let renderer = RecordingRenderer::default();

    let request = ReportRequest {
        skip: true,
        ..request(&modules[0], &modules, &[], FileFilter::default())
    };
    let outcome = ReportPipeline::new(aggregate(), &log)
        .run(&request, &renderer)
        .unwrap();

    assert_eq!(outcome, ReportOutcome::Skipped);
    assert!(!request.data_file.exists());
    assert!(renderer.contexts.borrow().is_empty());
    assert!(log.contains("Skipping JaCoCo execution because property jacoco.skip is set."));
}
