//! Reactor module discovery
//!
//! Modules are taken from configuration when listed there. Otherwise every
//! directory under the project base directory holding a `pom.xml` becomes a
//! conventionally laid out module.

use crate::error::{CovaggError, ErrorSeverity, Result};
use crate::models::config::Settings;
use crate::models::module::{BuildModule, DEFAULT_CLASSES_DIRECTORY};
use crate::output::log::Log;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// File marking a directory as a build module
pub const MODULE_MARKER: &str = "pom.xml";

/// Directory names never descended into
pub const IGNORED_DIRECTORIES: &[&str] = &["target", ".git", "node_modules"];

fn is_ignored(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| IGNORED_DIRECTORIES.contains(&name))
            .unwrap_or(false)
}

fn directory_name(path: &Path) -> String {
    path.canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

/// Find the modules below `base_dir`. The project itself comes first, sub
/// modules follow in sorted path order. Directories that cannot be read are
/// reported and left out.
pub fn discover_modules(
    base_dir: &Path,
    max_depth: Option<usize>,
    log: &dyn Log,
) -> Result<Vec<BuildModule>> {
    let mut modules = vec![BuildModule::conventional(directory_name(base_dir), base_dir)];

    let mut walker = WalkDir::new(base_dir).min_depth(1).sort_by_file_name();
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }

    for entry in walker.into_iter().filter_entry(|e| !is_ignored(e)) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let err = CovaggError::from(err);
                if err.severity() == ErrorSeverity::Warning {
                    log.warn(&err.user_message());
                    continue;
                }
                return Err(err);
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.path().join(MODULE_MARKER).is_file() {
            modules.push(BuildModule::conventional(
                directory_name(entry.path()),
                entry.path(),
            ));
        }
    }

    Ok(modules)
}

/// Reactor modules for the given settings
pub fn reactor_modules(settings: &Settings, log: &dyn Log) -> Result<Vec<BuildModule>> {
    if settings.modules.is_empty() {
        return discover_modules(&settings.base_dir, settings.max_depth, log);
    }
    Ok(settings
        .modules
        .iter()
        .cloned()
        .map(|module| module.resolved(&settings.base_dir))
        .collect())
}

/// The module describing the project the report is generated for
pub fn project_module(settings: &Settings) -> BuildModule {
    let build_directory = settings.resolved_build_directory();
    BuildModule {
        artifact_id: settings.resolved_project_name(),
        name: settings.project_name.clone(),
        base_dir: settings.base_dir.clone(),
        output_directory: Some(build_directory.join(DEFAULT_CLASSES_DIRECTORY)),
        build_directory: Some(build_directory),
        source_roots: Vec::new(),
    }
    .resolved(&settings.base_dir)
}
