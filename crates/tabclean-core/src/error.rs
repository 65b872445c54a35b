//! Error types for tabclean-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tabclean-core
#[derive(Debug, Error)]
pub enum Error {
    /// Input path does not exist
    #[error("file not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Input path exists but is not a regular file
    #[error("not a regular file: '{path}'")]
    NotAFile { path: PathBuf },

    /// Path could not be opened or created for lack of permission
    #[error("permission denied: '{path}'")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input has the wrong file extension
    #[error("'{path}' must be a .{expected} file")]
    WrongExtension { path: PathBuf, expected: String },

    /// Input file has no content
    #[error("file is empty: '{path}'")]
    EmptyInput { path: PathBuf },

    /// A filter was asked to work on a table with no rows
    #[error("cannot filter an empty table")]
    EmptyTable,

    /// A named column is not in the header row
    #[error("column '{column}' not found in header")]
    MissingColumn { column: String },

    /// Failed to create an output directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Config file could not be parsed
    #[error("invalid config '{path}': {message}")]
    Config { path: PathBuf, message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification used to pick a process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    PermissionDenied,
    IoFailure,
}

impl ErrorKind {
    /// Exit status for this kind, taken from BSD `sysexits.h`
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::InvalidInput => 65,
            ErrorKind::NotFound => 66,
            ErrorKind::IoFailure => 74,
            ErrorKind::PermissionDenied => 77,
        }
    }
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::NotAFile { .. }
            | Error::WrongExtension { .. }
            | Error::EmptyInput { .. }
            | Error::EmptyTable
            | Error::MissingColumn { .. }
            | Error::Config { .. }
            | Error::Csv { .. } => ErrorKind::InvalidInput,
            Error::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Error::CreateDir { source, .. } => match source.kind() {
                std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
                _ => ErrorKind::IoFailure,
            },
            Error::FileRead { source, .. }
            | Error::FileWrite { source, .. } => io_kind(source),
            Error::Json(_) => ErrorKind::IoFailure,
        }
    }

    /// Wrap an IO error on `path`, promoting permission failures
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Error::PermissionDenied { path, source },
            _ => Error::FileRead { path, source },
        }
    }
}

fn io_kind(err: &std::io::Error) -> ErrorKind {
    match err.kind() {
        std::io::ErrorKind::NotFound => ErrorKind::NotFound,
        std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
        std::io::ErrorKind::InvalidData => ErrorKind::InvalidInput,
        _ => ErrorKind::IoFailure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_kind_mapping() {
        let err = Error::NotFound {
            path: PathBuf::from("a.csv"),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(Error::EmptyTable.kind(), ErrorKind::InvalidInput);

        let err = Error::CreateDir {
            path: PathBuf::from("out"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        };
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);

        let err = Error::CreateDir {
            path: PathBuf::from("missing/out"),
            source: io::Error::new(io::ErrorKind::NotFound, "no parent"),
        };
        assert_eq!(err.kind(), ErrorKind::IoFailure);

        let err = Error::FileWrite {
            path: PathBuf::from("out/a.csv"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            ErrorKind::NotFound.exit_code(),
            ErrorKind::InvalidInput.exit_code(),
            ErrorKind::PermissionDenied.exit_code(),
            ErrorKind::IoFailure.exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, 0);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_read_promotes_permission_denied() {
        let err = Error::read(
            "secret.csv",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, Error::PermissionDenied { .. }));
        assert!(err.to_string().contains("secret.csv"));
    }
}
