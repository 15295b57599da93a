//! Error types and definitions for covagg
//!
//! Every failure that touches the filesystem carries the offending path so the
//! report step can tell the user which file or directory broke the build.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - the report invocation fails
    Error,
    /// Critical level - the tool cannot start at all (bad configuration)
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl ErrorSeverity {
    /// Process exit code for an error of this severity
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Warning => 0,
            ErrorSeverity::Error => 1,
            ErrorSeverity::Critical => 2,
        }
    }
}

/// Main error type for covagg operations
#[derive(Debug, Error)]
pub enum CovaggError {
    /// Standard IO errors without further context
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// An execution data file exists but could not be read or parsed
    #[error("Unable to read {path}: {source}")]
    ExecRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The merged execution data file could not be written
    #[error("Unable to write merged file {path}: {source}")]
    ExecWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two execution data records share an id but disagree on name or probes
    #[error("Incompatible execution data for class {name} with id {id:016x}: {message}")]
    IncompatibleExecData {
        id: u64,
        name: String,
        message: String,
    },

    /// An artifact (class file or archive) could not be read
    #[error("Error while analyzing {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A class file is truncated or otherwise malformed
    #[error("Invalid class file {path}: {message}")]
    ClassFormat { path: PathBuf, message: String },

    /// Two different classes with the same name were fed into one bundle
    #[error("Can't add different class with same name: {name}")]
    DuplicateClass { name: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Report file write errors
    #[error("Error writing report file {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal errors
    #[error("Directory traversal error for {path}: {message}")]
    DirectoryTraversal { path: PathBuf, message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV serialization error
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl CovaggError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CovaggError::PermissionDenied { .. } => ErrorSeverity::Warning,

            CovaggError::Config { .. } => ErrorSeverity::Critical,
            CovaggError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            CovaggError::ConfigRead { .. } => ErrorSeverity::Critical,
            CovaggError::ConfigParse { .. } => ErrorSeverity::Critical,
            CovaggError::GlobPattern { .. } => ErrorSeverity::Critical,
            CovaggError::InvalidPath { .. } => ErrorSeverity::Critical,
            CovaggError::StdoutWrite { .. } => ErrorSeverity::Critical,

            // Everything else aborts the current report invocation
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            CovaggError::PermissionDenied { path } => {
                format!(
                    "Cannot access '{}' due to permission denied. Check file permissions.",
                    path.display()
                )
            }
            CovaggError::ExecRead { path, source } => {
                format!(
                    "Unable to read execution data file '{}': {}. The file may be truncated or written by an incompatible agent.",
                    path.display(),
                    source
                )
            }
            CovaggError::ExecWrite { path, source } => {
                format!(
                    "Unable to write merged execution data to '{}': {}. Check that the directory exists and is writable.",
                    path.display(),
                    source
                )
            }
            CovaggError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            CovaggError::InvalidPath { path } => {
                format!(
                    "Invalid path: '{}'. Please provide a valid directory path.",
                    path.display()
                )
            }
            CovaggError::ConfigNotFound { path } => {
                format!(
                    "Configuration file not found at '{}'. Create a config file with --init or use command line options.",
                    path.display()
                )
            }
            CovaggError::DuplicateClass { name } => {
                format!(
                    "Class '{}' was found twice with different bytecode. Exclude one of the copies with --exclude or --skip-module.",
                    name
                )
            }
            _ => self.to_string(),
        }
    }

    /// Create an IO error without path context
    pub fn io_error(source: std::io::Error) -> Self {
        CovaggError::Io { source }
    }

    /// Create an execution data read error
    pub fn exec_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CovaggError::ExecRead { path: path.into(), source }
    }

    /// Name the execution data file an incompatible record came from
    pub fn in_exec_file(self, path: &Path) -> Self {
        match self {
            CovaggError::IncompatibleExecData { id, name, message } => {
                CovaggError::IncompatibleExecData {
                    id,
                    name,
                    message: format!("{} (in {})", message, path.display()),
                }
            }
            other => other,
        }
    }

    /// Create an execution data write error
    pub fn exec_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CovaggError::ExecWrite { path: path.into(), source }
    }

    /// Create an artifact read error
    pub fn artifact_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CovaggError::ArtifactRead { path: path.into(), source }
    }

    /// Create a class format error
    pub fn class_format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CovaggError::ClassFormat {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        CovaggError::Config {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        CovaggError::PermissionDenied { path: path.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CovaggError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CovaggError {
    fn from(err: std::io::Error) -> Self {
        CovaggError::io_error(err)
    }
}

impl From<csv::Error> for CovaggError {
    fn from(err: csv::Error) -> Self {
        CovaggError::Csv { source: err }
    }
}

impl From<glob::PatternError> for CovaggError {
    fn from(err: glob::PatternError) -> Self {
        CovaggError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for CovaggError {
    fn from(err: serde_json::Error) -> Self {
        CovaggError::JsonSerialize { source: err }
    }
}

impl From<walkdir::Error> for CovaggError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
        if let Some(io_err) = err.io_error() {
            if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                return CovaggError::permission_denied(path);
            }
        }
        CovaggError::directory_traversal_error(path, err.to_string())
    }
}

/// Result type alias for covagg operations
pub type Result<T> = std::result::Result<T, CovaggError>;
