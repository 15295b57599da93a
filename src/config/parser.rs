//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CovaggError, Result};
use crate::models::config::PartialSettings;

use super::file::DEFAULT_CONFIG_FILE;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CovaggError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| CovaggError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|e| CovaggError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

fn check_patterns(patterns: &[String], kind: &str, path: &Path) -> Result<()> {
    for pattern in patterns {
        if pattern.trim().is_empty() {
            return Err(CovaggError::config_error(format!(
                "Empty {} pattern in config file: {}",
                kind,
                path.display()
            )));
        }

        glob::Pattern::new(pattern).map_err(|e| {
            CovaggError::config_error(format!(
                "Invalid {} pattern '{}' in config file: {}: {}",
                kind,
                pattern,
                path.display(),
                e
            ))
        })?;
    }
    Ok(())
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(
    settings: &PartialSettings,
    path: P,
) -> Result<()> {
    let path = path.as_ref();

    if let Some(base_dir) = &settings.base_dir {
        if base_dir.as_os_str().is_empty() {
            return Err(CovaggError::config_error(format!(
                "Invalid empty base_dir in config file: {}",
                path.display()
            )));
        }
    }

    if let Some(includes) = &settings.includes {
        check_patterns(includes, "include", path)?;
    }
    if let Some(excludes) = &settings.excludes {
        check_patterns(excludes, "exclude", path)?;
    }
    if let Some(pattern) = &settings.class_directory_pattern {
        check_patterns(std::slice::from_ref(pattern), "class directory", path)?;
    }

    if let Some(depth) = settings.max_depth {
        if depth == 0 {
            return Err(CovaggError::config_error(format!(
                "Invalid max_depth 0 in config file: {}. Must be at least 1.",
                path.display()
            )));
        }
    }

    if let Some(modules) = &settings.modules {
        for module in modules {
            if module.artifact_id.trim().is_empty() {
                return Err(CovaggError::config_error(format!(
                    "Module without artifact_id in config file: {}",
                    path.display()
                )));
            }
        }
    }

    Ok(())
}

/// Default locations of the configuration file, in lookup order
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(home_dir) = dirs::home_dir() {
        locations.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("covagg").join("config.toml"));
    }
    locations
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    for location in default_config_locations() {
        if location.is_file() {
            return Ok(Some(parse_config_file(location)?));
        }
    }
    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(CovaggError::io_error)?;
        }
    }

    let default_config = include_str!("default_config.toml");
    fs::write(path, default_config).map_err(CovaggError::io_error)?;

    Ok(())
}
