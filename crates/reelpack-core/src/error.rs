use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during reelpack core operations.
///
/// Unparseable filenames, unreadable subtrees and unavailable host metrics
/// degrade to defaults and never surface here; these variants are reserved
/// for invalid caller input at the scan and plan boundaries.
#[derive(Debug, Error)]
pub enum PackerError {
    /// No root directories were supplied to the scanner.
    #[error("no root directories to scan")]
    EmptyRoots,

    /// A batch plan was requested for an empty selection.
    #[error("no content selected for packaging")]
    EmptySelection,

    /// The content path does not exist.
    #[error("path not found: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A single-file plan was requested for something that is not a file.
    #[error("not a regular file: {}", path.display())]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },

    /// Reading filesystem metadata for a selected path failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A manual chunk size is zero, not a power of two, or out of range.
    #[error("invalid chunk size override: {0} bytes")]
    InvalidChunkSize(u64),

    /// A manual worker count is outside `[1, 20]`.
    #[error("invalid worker count override: {0}")]
    InvalidWorkerCount(usize),

    /// A configuration document could not be decoded.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),
}

/// Result type alias for reelpack operations.
pub type Result<T> = std::result::Result<T, PackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = PackerError::EmptyRoots;
        assert_eq!(err.to_string(), "no root directories to scan");

        let err = PackerError::NotFound {
            path: PathBuf::from("/media/missing.mkv"),
        };
        assert!(err.to_string().contains("/media/missing.mkv"));

        let err = PackerError::InvalidChunkSize(0);
        assert_eq!(err.to_string(), "invalid chunk size override: 0 bytes");
    }

    #[test]
    fn io_error_keeps_source() {
        use std::error::Error as _;

        let err = PackerError::Io {
            path: PathBuf::from("/locked"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PackerError>();
    }
}
