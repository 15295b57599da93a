//! Loading and saving execution data files

use crate::error::{CovaggError, Result};
use crate::models::execution_data::{ExecutionDataStore, SessionInfoStore};
use crate::parsers::exec_data::{ExecBlock, ExecutionDataReader, ExecutionDataWriter};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Accumulates the sessions and execution data of any number of files
#[derive(Debug, Default)]
pub struct ExecFileLoader {
    sessions: SessionInfoStore,
    store: ExecutionDataStore,
}

impl ExecFileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read all blocks of `path` into this loader. Records for classes that are
    /// already present are merged.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|e| CovaggError::exec_read(path, e))?;
        let mut reader = ExecutionDataReader::new(BufReader::new(file));

        while let Some(block) = reader
            .next_block()
            .map_err(|e| CovaggError::exec_read(path, e))?
        {
            match block {
                ExecBlock::Header { .. } => {}
                ExecBlock::SessionInfo(info) => self.sessions.put(info),
                ExecBlock::ExecutionData(data) => {
                    self.store.put(data).map_err(|err| err.in_exec_file(path))?
                }
            }
        }
        Ok(())
    }

    /// Write all sessions and execution data to `path`.
    ///
    /// In overwrite mode the data is written to a temporary file next to
    /// `path` and renamed into place, so a failed write never leaves a partial
    /// file behind. In append mode the encoded bytes go out in a single write.
    pub fn save(&self, path: &Path, append: bool) -> Result<()> {
        let bytes = self.encode().map_err(|e| CovaggError::exec_write(path, e))?;

        let folder = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(folder).map_err(|e| CovaggError::exec_write(path, e))?;

        if append {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| CovaggError::exec_write(path, e))?;
            file.write_all(&bytes)
                .and_then(|_| file.flush())
                .map_err(|e| CovaggError::exec_write(path, e))?;
            return Ok(());
        }

        let mut temp =
            NamedTempFile::new_in(folder).map_err(|e| CovaggError::exec_write(path, e))?;
        temp.write_all(&bytes)
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| CovaggError::exec_write(path, e))?;
        temp.persist(path)
            .map_err(|e| CovaggError::exec_write(path, e.error))?;
        Ok(())
    }

    fn encode(&self) -> std::io::Result<Vec<u8>> {
        let mut writer = ExecutionDataWriter::new(Vec::new())?;
        for info in self.sessions.infos() {
            writer.write_session_info(info)?;
        }
        for data in self.store.contents() {
            writer.write_execution_data(data)?;
        }
        Ok(writer.into_inner())
    }

    pub fn execution_data(&self) -> &ExecutionDataStore {
        &self.store
    }

    pub fn sessions(&self) -> &SessionInfoStore {
        &self.sessions
    }

    pub fn into_parts(self) -> (SessionInfoStore, ExecutionDataStore) {
        (self.sessions, self.store)
    }
}
