//! Parsers for the binary formats covagg reads
//!
//! This module provides the execution data codec and a minimal class file
//! reader used to identify analyzed classes.

pub mod class_file;
pub mod exec_data;

pub use class_file::{is_class_file, parse_class_info, ClassInfo};
pub use exec_data::{ExecBlock, ExecutionDataReader, ExecutionDataWriter};
