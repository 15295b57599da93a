//! Merging execution data files from several modules

use std::fs;

use tempfile::tempdir;

use covagg::core::loader::ExecFileLoader;
use covagg::core::merger::{ExecutionDataMerger, MergeOutcome};
use covagg::models::execution_data::ExecutionData;
use covagg::output::MemoryLog;
use covagg::CovaggError;

use super::common::write_exec;

#[test]
fn test_merge_order_does_not_matter() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a/jacoco.exec");
    let b = dir.path().join("b/jacoco.exec");
    let c = dir.path().join("c/jacoco.exec");
    write_exec(
        &a,
        "a",
        1_000,
        &[
            ExecutionData::new(0x11, "com/acme/Shared", vec![true, false, false]),
            ExecutionData::new(0x22, "com/acme/OnlyA", vec![true]),
        ],
    );
    write_exec(
        &b,
        "b",
        2_000,
        &[ExecutionData::new(0x11, "com/acme/Shared", vec![false, false, true])],
    );
    write_exec(
        &c,
        "c",
        3_000,
        &[ExecutionData::new(0x33, "com/acme/OnlyC", vec![false, true])],
    );

    let log = MemoryLog::new();
    let merger = ExecutionDataMerger::new(&log);
    let forward = dir.path().join("forward.exec");
    let backward = dir.path().join("backward.exec");
    merger.merge(&[a.clone(), b.clone(), c.clone()], &forward).unwrap();
    merger.merge(&[c, b, a], &backward).unwrap();

    assert_eq!(fs::read(&forward).unwrap(), fs::read(&backward).unwrap());

    let mut loader = ExecFileLoader::new();
    loader.load(&forward).unwrap();
    assert_eq!(loader.sessions().len(), 3);
    assert_eq!(loader.execution_data().len(), 3);
    assert_eq!(
        loader.execution_data().get(0x11).unwrap().probes,
        vec![true, false, true]
    );
}

#[test]
fn test_missing_candidates_are_ignored() {
    let dir = tempdir().unwrap();
    let present = dir.path().join("core/target/jacoco.exec");
    let absent = dir.path().join("web/target/jacoco.exec");
    write_exec(
        &present,
        "core",
        1_000,
        &[ExecutionData::new(0x11, "com/acme/Engine", vec![true])],
    );

    let log = MemoryLog::new();
    let merged = dir.path().join("target/jacoco.exec");
    let outcome = ExecutionDataMerger::new(&log)
        .merge(&[absent.clone(), present.clone()], &merged)
        .unwrap();

    assert_eq!(
        outcome,
        MergeOutcome::Written {
            path: merged.clone(),
            classes: 1,
            sessions: 1,
        }
    );
    assert!(log.contains(&present.display().to_string()));
    assert!(!log.contains(&absent.display().to_string()));
}

#[test]
fn test_incompatible_probe_counts_fail_the_merge() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.exec");
    let b = dir.path().join("b.exec");
    write_exec(&a, "a", 1_000, &[ExecutionData::new(0x11, "com/acme/Engine", vec![true])]);
    write_exec(
        &b,
        "b",
        2_000,
        &[ExecutionData::new(0x11, "com/acme/Engine", vec![true, false])],
    );

    let log = MemoryLog::new();
    let merged = dir.path().join("merged.exec");
    let result = ExecutionDataMerger::new(&log).merge(&[a, b], &merged);

    assert!(matches!(result, Err(CovaggError::IncompatibleExecData { id: 0x11, .. })));
    assert!(!merged.exists());
}

#[test]
fn test_truncated_candidate_is_reported_with_its_path() {
    let dir = tempdir().unwrap();
    let broken = dir.path().join("broken.exec");
    fs::write(&broken, [0x01, 0xC0]).unwrap();

    let log = MemoryLog::new();
    let result =
        ExecutionDataMerger::new(&log).merge(&[broken.clone()], &dir.path().join("out.exec"));

    match result {
        Err(CovaggError::ExecRead { path, .. }) => assert_eq!(path, broken),
        other => panic!("expected a read error, got {:?}", other),
    }
}
