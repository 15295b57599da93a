//! Build module model
//!
//! The report pipeline only needs a handful of facts about a module, so it works
//! against the narrow [`Module`] trait instead of a full build-tool project model.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the build directory inside a module, relative to its base directory
pub const DEFAULT_BUILD_DIRECTORY: &str = "target";

/// Name of the compiled classes directory, relative to the build directory
pub const DEFAULT_CLASSES_DIRECTORY: &str = "classes";

/// Default source root, relative to the module base directory
pub const DEFAULT_SOURCE_ROOT: &str = "src/main/java";

/// Read-only view of a build module
pub trait Module {
    /// Identifier that is unique within the build
    fn artifact_id(&self) -> &str;

    /// Human-readable name, used to label the coverage bundle
    fn name(&self) -> &str;

    fn base_dir(&self) -> &Path;

    /// Directory that holds the module's execution data file
    fn build_directory(&self) -> &Path;

    /// Directory with the module's compiled classes
    fn output_directory(&self) -> &Path;

    fn source_roots(&self) -> &[PathBuf];
}

/// Plain in-memory module, built from configuration or discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildModule {
    pub artifact_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub base_dir: PathBuf,
    #[serde(default)]
    pub build_directory: Option<PathBuf>,
    #[serde(default)]
    pub output_directory: Option<PathBuf>,
    #[serde(default)]
    pub source_roots: Vec<PathBuf>,
}

impl BuildModule {
    /// Create a module laid out with the conventional directories under `base_dir`
    pub fn conventional(artifact_id: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let build_directory = base_dir.join(DEFAULT_BUILD_DIRECTORY);
        Self {
            artifact_id: artifact_id.into(),
            name: None,
            output_directory: Some(build_directory.join(DEFAULT_CLASSES_DIRECTORY)),
            build_directory: Some(build_directory),
            source_roots: vec![base_dir.join(DEFAULT_SOURCE_ROOT)],
            base_dir,
        }
    }

    /// Resolve every relative path against `root` and fill in conventional
    /// defaults for directories that were left out
    pub fn resolved(mut self, root: &Path) -> Self {
        self.base_dir = resolve_path(root, &self.base_dir);
        let build_directory = match self.build_directory.take() {
            Some(dir) => resolve_path(&self.base_dir, &dir),
            None => self.base_dir.join(DEFAULT_BUILD_DIRECTORY),
        };
        let output_directory = match self.output_directory.take() {
            Some(dir) => resolve_path(&self.base_dir, &dir),
            None => build_directory.join(DEFAULT_CLASSES_DIRECTORY),
        };
        self.source_roots = if self.source_roots.is_empty() {
            vec![self.base_dir.join(DEFAULT_SOURCE_ROOT)]
        } else {
            self.source_roots
                .iter()
                .map(|root| resolve_path(&self.base_dir, root))
                .collect()
        };
        self.build_directory = Some(build_directory);
        self.output_directory = Some(output_directory);
        self
    }
}

impl Module for BuildModule {
    fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.artifact_id)
    }

    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn build_directory(&self) -> &Path {
        self.build_directory.as_deref().unwrap_or(&self.base_dir)
    }

    fn output_directory(&self) -> &Path {
        self.output_directory.as_deref().unwrap_or(&self.base_dir)
    }

    fn source_roots(&self) -> &[PathBuf] {
        &self.source_roots
    }
}

/// Join `path` onto `base` unless it is already absolute
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
