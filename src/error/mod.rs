//! Error handling for covagg
//!
//! This module provides the error enum, result alias and the context helper
//! used to turn third-party errors into configuration errors.

pub mod context;
pub mod types;

pub use context::ResultExt;
pub use types::{CovaggError, ErrorSeverity, Result};
