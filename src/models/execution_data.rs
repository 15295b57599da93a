//! In-memory execution data
//!
//! An [`ExecutionDataStore`] holds at most one record per class id. Records for
//! the same id are merged by OR-ing their probe arrays, which makes loading
//! associative, commutative and idempotent.

use crate::error::{CovaggError, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Probe data recorded for a single class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionData {
    /// CRC-64 of the class file bytes
    pub id: u64,
    /// VM name of the class, e.g. `com/acme/Foo`
    pub name: String,
    pub probes: Vec<bool>,
}

impl ExecutionData {
    pub fn new(id: u64, name: impl Into<String>, probes: Vec<bool>) -> Self {
        Self {
            id,
            name: name.into(),
            probes,
        }
    }

    /// Number of probes that were hit
    pub fn hit_count(&self) -> usize {
        self.probes.iter().filter(|p| **p).count()
    }

    /// Check that `other` describes the same class as `self`
    pub fn assert_compatible(&self, other: &ExecutionData) -> Result<()> {
        if self.id != other.id {
            return Err(self.incompatible(format!("different class id {:016x}", other.id)));
        }
        if self.name != other.name {
            return Err(self.incompatible(format!("different class name {}", other.name)));
        }
        if self.probes.len() != other.probes.len() {
            return Err(self.incompatible(format!(
                "probe count {} does not match {}",
                other.probes.len(),
                self.probes.len()
            )));
        }
        Ok(())
    }

    /// OR the probes of `other` into this record
    pub fn merge(&mut self, other: &ExecutionData) -> Result<()> {
        self.assert_compatible(other)?;
        for (mine, theirs) in self.probes.iter_mut().zip(&other.probes) {
            *mine |= *theirs;
        }
        Ok(())
    }

    fn incompatible(&self, message: String) -> CovaggError {
        CovaggError::IncompatibleExecData {
            id: self.id,
            name: self.name.clone(),
            message,
        }
    }
}

/// Execution data keyed by class id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionDataStore {
    entries: BTreeMap<u64, ExecutionData>,
}

impl ExecutionDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, merging it into an existing record with the same id
    pub fn put(&mut self, data: ExecutionData) -> Result<()> {
        match self.entries.get_mut(&data.id) {
            Some(existing) => existing.merge(&data),
            None => {
                self.entries.insert(data.id, data);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: u64) -> Option<&ExecutionData> {
        self.entries.get(&id)
    }

    /// Whether any record with the given class name exists, under any id
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.values().any(|data| data.name == name)
    }

    /// All records ordered by class id
    pub fn contents(&self) -> impl Iterator<Item = &ExecutionData> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single recording session of the coverage agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub id: String,
    /// Epoch millis when the session started
    pub start: i64,
    /// Epoch millis when the data was dumped
    pub dump: i64,
}

impl SessionInfo {
    pub fn new(id: impl Into<String>, start: i64, dump: i64) -> Self {
        Self {
            id: id.into(),
            start,
            dump,
        }
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.start).single()
    }

    pub fn dump_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.dump).single()
    }
}

/// All sessions read from one or more execution data files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInfoStore {
    infos: Vec<SessionInfo>,
}

impl SessionInfoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, info: SessionInfo) {
        self.infos.push(info);
    }

    /// Sessions ordered by start time
    pub fn infos(&self) -> Vec<&SessionInfo> {
        let mut infos: Vec<&SessionInfo> = self.infos.iter().collect();
        infos.sort_by_key(|info| (info.start, info.dump));
        infos
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }
}
