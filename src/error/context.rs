//! Error context utilities for covagg

use crate::error::{CovaggError, Result};

/// Extension trait for Result to add context to errors
pub trait ResultExt<T, E> {
    /// Turn any error into a configuration error prefixed with `context`
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| CovaggError::Config {
            message: format!("{}: {}", context(), err),
        })
    }
}
