//! Output writing functionality
//!
//! This module provides writers for the console and for report files.

use crate::error::{CovaggError, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Trait for output writers
pub trait OutputWriter {
    /// Write content to the output destination
    fn write(&self, content: &str) -> Result<()>;
}

/// Writer for stdout output
#[derive(Debug)]
pub struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write(&self, content: &str) -> Result<()> {
        print!("{}", content);
        io::stdout()
            .flush()
            .map_err(|e| CovaggError::StdoutWrite { source: e })
    }
}

/// Writer for a report file, creating missing parent directories
#[derive(Debug)]
pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    /// Create a new file writer
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn report_error(&self, source: io::Error) -> CovaggError {
        CovaggError::ReportWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl OutputWriter for FileWriter {
    fn write(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.report_error(e))?;
            }
        }

        let mut file = File::create(&self.path).map_err(|e| self.report_error(e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| self.report_error(e))
    }
}
