//! Error types for the date sorter

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for date sorter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the date sorter
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to list directory {path}: {source}")]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Failed to open {path} for metadata reading: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move {from} to {to}: {source}")]
    MoveFile {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid source filename: {path}")]
    InvalidFilename { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Whether this error terminates the run under the fail-fast policy.
    ///
    /// Move failures are absorbed per file; everything else aborts.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::MoveFile { .. } | Error::InvalidFilename { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_move_errors_are_recoverable() {
        let err = Error::MoveFile {
            from: PathBuf::from("a.jpg"),
            to: PathBuf::from("2020/1/1/a.jpg"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("a.jpg"));
    }

    #[test]
    fn test_io_errors_are_fatal() {
        let open = Error::OpenFile {
            path: PathBuf::from("a.jpg"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let mkdir = Error::CreateDirectory {
            path: PathBuf::from("2020"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(open.is_fatal());
        assert!(mkdir.is_fatal());
    }
}
