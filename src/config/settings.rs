//! Settings validation

use crate::error::{CovaggError, Result, ResultExt};
use crate::models::config::Settings;
use crate::models::filter::FileFilter;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.base_dir.is_dir() {
            return Err(CovaggError::InvalidPath {
                path: settings.base_dir.clone(),
            });
        }

        FileFilter::new(settings.includes.clone(), settings.excludes.clone())
            .compile()
            .map_err(|e| CovaggError::config_error(format!("Invalid file filter: {}", e)))?;

        if let Some(pattern) = &settings.class_directory_pattern {
            glob::Pattern::new(pattern)
                .with_context(|| format!("Invalid class directory pattern: {}", pattern))?;
        }

        if let Some(depth) = settings.max_depth {
            if depth == 0 {
                return Err(CovaggError::config_error("Max depth must be at least 1"));
            }
        }

        if settings.quiet && settings.verbose {
            return Err(CovaggError::config_error(
                "Quiet and verbose output cannot be enabled together",
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for module in &settings.modules {
            if !seen.insert(module.artifact_id.as_str()) {
                return Err(CovaggError::config_error(format!(
                    "Module '{}' is configured more than once",
                    module.artifact_id
                )));
            }
        }

        Ok(())
    }
}
