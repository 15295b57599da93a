//! Artifact directory resolution
//!
//! A module contributes either its single declared output directory or, when a
//! class directory pattern is configured, every directory under the project
//! base directory that matches the pattern. Pattern matches inside an excluded
//! module are dropped before anything below them is read.

use crate::core::scanner::matching_directories;
use crate::error::Result;
use crate::models::module::Module;
use crate::output::log::Log;
use std::path::{Path, PathBuf};

/// How artifact directories are found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactResolution {
    /// Each module's declared output directory
    SingleDir,
    /// Directories matching a glob, relative to the project base directory
    PatternScan(String),
}

impl ArtifactResolution {
    /// Pick the mode from an optional configured pattern
    pub fn from_pattern(pattern: Option<&str>) -> Self {
        match pattern {
            Some(pattern) if !pattern.trim().is_empty() => {
                ArtifactResolution::PatternScan(pattern.trim().to_string())
            }
            _ => ArtifactResolution::SingleDir,
        }
    }
}

/// The module's output directory if it currently exists
pub fn output_directory_of<M: Module + ?Sized>(module: &M) -> Vec<PathBuf> {
    let dir = module.output_directory();
    if dir.is_dir() {
        vec![dir.to_path_buf()]
    } else {
        Vec::new()
    }
}

/// Every directory below `base_dir` matching `pattern`
pub fn directories_matching(
    base_dir: &Path,
    pattern: &str,
    log: &dyn Log,
) -> Result<Vec<PathBuf>> {
    let dirs = matching_directories(base_dir, pattern)?;

    log.info(&format!(
        "Found {} class director{} matching '{}'",
        dirs.len(),
        if dirs.len() == 1 { "y" } else { "ies" },
        pattern
    ));
    for dir in &dirs {
        log.info(&format!("  {}", dir.display()));
    }
    if dirs.is_empty() {
        log.warn(&format!(
            "Class directory pattern '{}' matched nothing under {}",
            pattern,
            base_dir.display()
        ));
    }

    Ok(dirs)
}

/// Depth of the deepest module base directory containing `dir`
fn deepest_owner<M: Module + ?Sized>(dir: &Path, modules: &[&M]) -> Option<usize> {
    modules
        .iter()
        .filter(|module| dir.starts_with(module.base_dir()))
        .map(|module| module.base_dir().components().count())
        .max()
}

/// Keep the directories whose closest enclosing module is not excluded
pub fn without_excluded<M: Module + ?Sized>(
    dirs: Vec<PathBuf>,
    included: &[&M],
    excluded: &[&M],
    log: &dyn Log,
) -> Vec<PathBuf> {
    dirs.into_iter()
        .filter(|dir| {
            let owners = (deepest_owner(dir, excluded), deepest_owner(dir, included));
            let owned_by_excluded = match owners {
                (Some(excluded_depth), Some(included_depth)) => excluded_depth > included_depth,
                (Some(_), None) => true,
                (None, _) => false,
            };
            if owned_by_excluded {
                log.verbose(&format!("Skipping {} of an excluded module", dir.display()));
            }
            !owned_by_excluded
        })
        .collect()
}

/// Resolve the artifact directories of `modules` under the given mode.
///
/// Pattern mode scans `base_dir` once and then drops matches that lie inside
/// one of the `excluded` modules.
pub fn locate_artifact_directories<M: Module + ?Sized>(
    resolution: &ArtifactResolution,
    base_dir: &Path,
    modules: &[&M],
    excluded: &[&M],
    log: &dyn Log,
) -> Result<Vec<PathBuf>> {
    match resolution {
        ArtifactResolution::SingleDir => Ok(modules
            .iter()
            .flat_map(|module| output_directory_of(*module))
            .collect()),
        ArtifactResolution::PatternScan(pattern) => {
            let dirs = directories_matching(base_dir, pattern, log)?;
            Ok(without_excluded(dirs, modules, excluded, log))
        }
    }
}
