//! Shared fixtures: a small multi-module build with class files and
//! execution data on disk

use std::cell::RefCell;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use covagg::core::pipeline::{ReportContext, ReportRenderer};
use covagg::error::Result;
use covagg::models::execution_data::{ExecutionData, SessionInfo};
use covagg::models::module::BuildModule;
use covagg::parsers::class_file::minimal_class_bytes;
use covagg::parsers::exec_data::ExecutionDataWriter;
use covagg::utils::crc64;

/// Renderer that keeps every context it was given
#[derive(Default)]
pub struct RecordingRenderer {
    pub contexts: RefCell<Vec<ReportContext>>,
}

impl RecordingRenderer {
    pub fn last(&self) -> ReportContext {
        self.contexts
            .borrow()
            .last()
            .cloned()
            .expect("renderer was not called")
    }
}

impl ReportRenderer for RecordingRenderer {
    fn render(&self, context: &ReportContext) -> Result<()> {
        self.contexts.borrow_mut().push(context.clone());
        Ok(())
    }
}

/// Write a class file for `name` below `classes_dir` and return its id
pub fn write_class(classes_dir: &Path, name: &str) -> u64 {
    let bytes = minimal_class_bytes(name);
    let path = classes_dir.join(format!("{}.class", name));
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, &bytes).unwrap();
    crc64::checksum(&bytes)
}

/// Write an execution data file with one session and the given records
pub fn write_exec(path: &Path, session: &str, start: i64, records: &[ExecutionData]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut writer = ExecutionDataWriter::new(File::create(path).unwrap()).unwrap();
    writer
        .write_session_info(&SessionInfo::new(session, start, start + 1_000))
        .unwrap();
    for record in records {
        writer.write_execution_data(record).unwrap();
    }
    writer.flush().unwrap();
}

/// A conventional module at `<root>/<dir>` with a `pom.xml`
pub fn module(root: &Path, dir: &str) -> BuildModule {
    let base_dir = root.join(dir);
    fs::create_dir_all(&base_dir).unwrap();
    fs::write(base_dir.join("pom.xml"), "<project/>").unwrap();
    BuildModule::conventional(dir, base_dir)
}

pub fn classes_dir(module: &BuildModule) -> PathBuf {
    module.base_dir.join("target").join("classes")
}

pub fn exec_file(module: &BuildModule) -> PathBuf {
    module.base_dir.join("target").join("jacoco.exec")
}

/// A module with one class and execution data hitting `hits` of four probes
pub fn covered_module(root: &Path, dir: &str, class: &str, hits: usize) -> (BuildModule, u64) {
    let module = module(root, dir);
    let id = write_class(&classes_dir(&module), class);
    let probes = (0..4).map(|i| i < hits).collect();
    write_exec(
        &exec_file(&module),
        &format!("{}-session", dir),
        1_700_000_000_000,
        &[ExecutionData::new(id, class, probes)],
    );
    (module, id)
}
