//! Configuration file and environment handling

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{CovaggError, Result};
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".covagg.toml";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
            priority: 20,
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 20,
        }
    }

    /// Get the path of this configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(CovaggError::ConfigNotFound {
                path: self.path.clone(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Suffixes of the environment variables understood by [`EnvConfig`]
const ENV_KEYS: &[&str] = &[
    "BASE_DIR",
    "PROJECT_NAME",
    "BUILD_DIRECTORY",
    "DATA_FILE",
    "OUTPUT_DIRECTORY",
    "AGGREGATE",
    "SKIP",
    "SKIPPED_MODULES",
    "CLASS_DIRECTORY_PATTERN",
    "INCLUDES",
    "EXCLUDES",
    "MAX_DEPTH",
    "OUTPUT_FORMAT",
];

/// Environment variable configuration source
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

impl EnvConfig {
    /// Create a new environment variable configuration source
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 10,
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, key))
            .ok()
            .filter(|value| !value.trim().is_empty())
    }

    fn list(&self, key: &str) -> Option<Vec<String>> {
        self.var(key).map(|value| {
            value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
    }

    fn flag(&self, key: &str) -> Option<bool> {
        match self.var(key)?.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        }
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings {
            base_dir: self.var("BASE_DIR").map(PathBuf::from),
            project_name: self.var("PROJECT_NAME"),
            build_directory: self.var("BUILD_DIRECTORY").map(PathBuf::from),
            data_file: self.var("DATA_FILE").map(PathBuf::from),
            output_directory: self.var("OUTPUT_DIRECTORY").map(PathBuf::from),
            aggregate: self.flag("AGGREGATE"),
            skip: self.flag("SKIP"),
            skipped_modules: self.list("SKIPPED_MODULES"),
            class_directory_pattern: self.var("CLASS_DIRECTORY_PATTERN"),
            includes: self.list("INCLUDES"),
            excludes: self.list("EXCLUDES"),
            ..Default::default()
        };

        if let Some(max_depth) = self.var("MAX_DEPTH") {
            if let Ok(depth) = max_depth.trim().parse() {
                settings.max_depth = Some(depth);
            }
        }

        if let Some(format) = self.var("OUTPUT_FORMAT") {
            if let Ok(output_format) = format.parse() {
                settings.output_format = Some(output_format);
            }
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
