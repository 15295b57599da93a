//! Coverage bundle structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// How a class relates to the execution data it was analyzed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    /// Execution data with a matching id was found
    Covered,
    /// No execution data at all for this class
    NotExecuted,
    /// Execution data exists for the class name, but for different bytecode
    Mismatch,
}

impl std::fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoverageStatus::Covered => write!(f, "covered"),
            CoverageStatus::NotExecuted => write!(f, "not executed"),
            CoverageStatus::Mismatch => write!(f, "mismatch"),
        }
    }
}

/// Coverage of one analyzed class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCoverage {
    pub id: u64,
    pub name: String,
    /// File the class was read from (for archives, the archive path)
    pub location: PathBuf,
    pub probes_total: usize,
    pub probes_hit: usize,
    pub status: CoverageStatus,
}

impl ClassCoverage {
    /// Package part of the VM name, `""` for the default package
    pub fn package_name(&self) -> &str {
        self.name.rsplit_once('/').map(|(pkg, _)| pkg).unwrap_or("")
    }

    pub fn percentage(&self) -> f64 {
        percentage(self.probes_hit, self.probes_total)
    }
}

/// Aggregated analysis result for one report scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageBundle {
    pub name: String,
    classes: BTreeMap<String, ClassCoverage>,
}

impl CoverageBundle {
    pub fn new(name: impl Into<String>, classes: BTreeMap<String, ClassCoverage>) -> Self {
        Self {
            name: name.into(),
            classes,
        }
    }

    /// Classes ordered by name
    pub fn classes(&self) -> impl Iterator<Item = &ClassCoverage> {
        self.classes.values()
    }

    pub fn class(&self, name: &str) -> Option<&ClassCoverage> {
        self.classes.get(name)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Classes whose execution data belongs to different bytecode
    pub fn mismatched_classes(&self) -> Vec<&ClassCoverage> {
        self.classes()
            .filter(|c| c.status == CoverageStatus::Mismatch)
            .collect()
    }

    pub fn summary(&self) -> BundleSummary {
        let mut summary = BundleSummary {
            total_classes: self.classes.len(),
            ..Default::default()
        };
        for class in self.classes.values() {
            summary.total_probes += class.probes_total;
            summary.hit_probes += class.probes_hit;
            match class.status {
                CoverageStatus::Covered => summary.covered_classes += 1,
                CoverageStatus::NotExecuted => summary.not_executed_classes += 1,
                CoverageStatus::Mismatch => summary.mismatched_classes += 1,
            }
        }
        summary
    }
}

/// Totals across a bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleSummary {
    pub total_classes: usize,
    pub covered_classes: usize,
    pub not_executed_classes: usize,
    pub mismatched_classes: usize,
    pub total_probes: usize,
    pub hit_probes: usize,
}

impl BundleSummary {
    pub fn probe_percentage(&self) -> f64 {
        percentage(self.hit_probes, self.total_probes)
    }
}

fn percentage(hit: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (hit as f64 / total as f64) * 100.0
    }
}
