//! Include/exclude filter for artifact files

use crate::error::Result;
use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};

/// Patterns used when no include pattern is configured
pub const DEFAULT_INCLUDES: &[&str] = &["**/*.class", "**/*.jar", "**/*.war", "**/*.zip"];

/// Match options giving Ant-style semantics: `*` stays within one path segment
/// and `**` spans directories.
pub const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Selects which artifact files inside a directory take part in the analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

impl FileFilter {
    pub fn new(includes: Vec<String>, excludes: Vec<String>) -> Self {
        Self { includes, excludes }
    }

    /// Include patterns in effect, falling back to [`DEFAULT_INCLUDES`]
    pub fn effective_includes(&self) -> Vec<String> {
        if self.includes.is_empty() {
            DEFAULT_INCLUDES.iter().map(|p| p.to_string()).collect()
        } else {
            self.includes.clone()
        }
    }

    /// Compile the filter, failing on the first invalid pattern
    pub fn compile(&self) -> Result<CompiledFilter> {
        let includes = compile_patterns(&self.effective_includes())?;
        let excludes = compile_patterns(&self.excludes)?;
        Ok(CompiledFilter { includes, excludes })
    }
}

/// A [`FileFilter`] with its patterns compiled
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
}

impl CompiledFilter {
    /// Test a `/`-separated path relative to the scanned directory
    pub fn matches(&self, relative: &str) -> bool {
        self.includes.iter().any(|p| p.matches_with(relative, MATCH_OPTIONS))
            && !self.excludes.iter().any(|p| p.matches_with(relative, MATCH_OPTIONS))
    }
}

/// Compile a single Ant-style pattern. A trailing `/` selects everything
/// beneath the directory.
pub fn compile_pattern(pattern: &str) -> Result<Pattern> {
    let normalized = pattern.replace('\\', "/");
    let normalized = if normalized.ends_with('/') {
        format!("{}**", normalized)
    } else {
        normalized
    };
    Ok(Pattern::new(&normalized)?)
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .flat_map(|p| p.split(','))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(compile_pattern)
        .collect()
}
