//! Pattern-based directory scanning
//!
//! Paths are matched relative to the scanned base directory, with components
//! joined by `/` on every platform so that patterns are portable.

use crate::error::{CovaggError, Result};
use crate::models::filter::{compile_pattern, CompiledFilter, MATCH_OPTIONS};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Unreadable entries below an artifact directory fail the bundle
fn walk_error(dir: &Path, err: walkdir::Error) -> CovaggError {
    let path = err.path().unwrap_or(dir).to_path_buf();
    CovaggError::artifact_read(path, err.into())
}

/// All files below `dir` accepted by `filter`, in sorted order
pub fn matching_files(dir: &Path, filter: &CompiledFilter) -> Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(relative) = relative_path(dir, entry.path()) {
            if filter.matches(&relative) {
                result.push(entry.into_path());
            }
        }
    }
    Ok(result)
}

/// All directories below `base` whose relative path matches `pattern`, in
/// sorted order
pub fn matching_directories(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = compile_pattern(pattern.trim_end_matches(['/', '\\']))?;
    let mut result = Vec::new();
    if !base.is_dir() {
        return Ok(result);
    }
    for entry in WalkDir::new(base).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(base, e))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Some(relative) = relative_path(base, entry.path()) {
            if pattern.matches_with(&relative, MATCH_OPTIONS) {
                result.push(entry.into_path());
            }
        }
    }
    Ok(result)
}

/// `/`-joined path of `path` relative to `base`
pub fn relative_path(base: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}
