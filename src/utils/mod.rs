//! Small shared helpers

pub mod crc64;
