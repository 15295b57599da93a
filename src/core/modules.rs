//! Module selection

use crate::models::module::Module;

/// Modules whose artifact id is not listed in `excluded_ids`, in input order
pub fn included_modules<'a, M: Module>(all: &'a [M], excluded_ids: &[String]) -> Vec<&'a M> {
    all.iter()
        .filter(|module| !excluded_ids.iter().any(|id| id == module.artifact_id()))
        .collect()
}

/// Modules whose artifact id is listed in `excluded_ids`, in input order
pub fn excluded_modules<'a, M: Module>(all: &'a [M], excluded_ids: &[String]) -> Vec<&'a M> {
    all.iter()
        .filter(|module| excluded_ids.iter().any(|id| id == module.artifact_id()))
        .collect()
}
