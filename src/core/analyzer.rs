//! Class analysis against execution data
//!
//! The analyzer identifies each class by the CRC-64 of its bytes and looks the
//! id up in the execution data store. Results are collected by a
//! [`CoverageBuilder`], which owns the duplicate-class policy.

use crate::error::{CovaggError, Result};
use crate::models::coverage::{ClassCoverage, CoverageBundle, CoverageStatus};
use crate::models::execution_data::ExecutionDataStore;
use crate::parsers::class_file::{is_class_file, parse_class_info};
use crate::utils::crc64;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Analysis engine fed with artifact files one at a time
pub trait Analyzer {
    /// Analyze a class file, an archive, or every file below a directory.
    /// Returns the number of classes found; unknown content counts as zero.
    fn analyze_all(&mut self, path: &Path) -> Result<usize>;
}

/// Collects class coverage into a bundle
#[derive(Debug, Default)]
pub struct CoverageBuilder {
    classes: BTreeMap<String, ClassCoverage>,
}

impl CoverageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one analyzed class.
    ///
    /// The same class seen twice (same name, same id) is kept once. A class
    /// with the same name but different bytecode is an error.
    pub fn visit(&mut self, coverage: ClassCoverage) -> Result<()> {
        if let Some(existing) = self.classes.get(&coverage.name) {
            if existing.id != coverage.id {
                return Err(CovaggError::DuplicateClass {
                    name: coverage.name,
                });
            }
            return Ok(());
        }
        self.classes.insert(coverage.name.clone(), coverage);
        Ok(())
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn bundle(&self, name: &str) -> CoverageBundle {
        CoverageBundle::new(name, self.classes.clone())
    }
}

/// Analyzer for class files, directories and jar/war/zip archives
pub struct ClassAnalyzer<'a> {
    execution_data: &'a ExecutionDataStore,
    builder: &'a mut CoverageBuilder,
}

impl<'a> ClassAnalyzer<'a> {
    pub fn new(execution_data: &'a ExecutionDataStore, builder: &'a mut CoverageBuilder) -> Self {
        Self {
            execution_data,
            builder,
        }
    }

    /// Analyze in-memory content, dispatching on its magic number
    pub fn analyze_bytes(&mut self, bytes: &[u8], location: &Path) -> Result<usize> {
        if is_class_file(bytes) {
            self.analyze_class(bytes, location)?;
            Ok(1)
        } else if bytes.starts_with(&ZIP_MAGIC) {
            self.analyze_zip(bytes, location)
        } else {
            Ok(0)
        }
    }

    fn analyze_class(&mut self, bytes: &[u8], location: &Path) -> Result<()> {
        let info = parse_class_info(bytes)
            .map_err(|e| CovaggError::class_format(location, e.to_string()))?;
        let id = crc64::checksum(bytes);

        let (status, probes_total, probes_hit) = match self.execution_data.get(id) {
            Some(data) => (CoverageStatus::Covered, data.probes.len(), data.hit_count()),
            None if self.execution_data.contains_name(&info.name) => {
                (CoverageStatus::Mismatch, 0, 0)
            }
            None => (CoverageStatus::NotExecuted, 0, 0),
        };

        self.builder.visit(ClassCoverage {
            id,
            name: info.name,
            location: location.to_path_buf(),
            probes_total,
            probes_hit,
            status,
        })
    }

    fn analyze_zip(&mut self, bytes: &[u8], location: &Path) -> Result<usize> {
        let zip_error = |e: zip::result::ZipError| {
            CovaggError::artifact_read(location, io::Error::new(io::ErrorKind::InvalidData, e))
        };

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(zip_error)?;
        let mut count = 0;
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index).map_err(zip_error)?;
            if entry.is_dir() {
                continue;
            }
            let entry_location = PathBuf::from(format!("{}@{}", location.display(), entry.name()));
            let mut content = Vec::new();
            entry
                .read_to_end(&mut content)
                .map_err(|e| CovaggError::artifact_read(&entry_location, e))?;
            drop(entry);
            count += self.analyze_bytes(&content, &entry_location)?;
        }
        Ok(count)
    }
}

impl Analyzer for ClassAnalyzer<'_> {
    fn analyze_all(&mut self, path: &Path) -> Result<usize> {
        if path.is_dir() {
            let mut entries = fs::read_dir(path)
                .map_err(|e| CovaggError::artifact_read(path, e))?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<io::Result<Vec<_>>>()
                .map_err(|e| CovaggError::artifact_read(path, e))?;
            entries.sort();

            let mut count = 0;
            for entry in entries {
                count += self.analyze_all(&entry)?;
            }
            return Ok(count);
        }

        let bytes = fs::read(path).map_err(|e| CovaggError::artifact_read(path, e))?;
        self.analyze_bytes(&bytes, path)
    }
}
