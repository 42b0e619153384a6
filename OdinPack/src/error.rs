//! Error types for `OdinPack`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `OdinPack` operations.
///
/// Variants fall in two groups. Fatal ones abort a repackaging job and are
/// returned as `Err`. Per-file ones ([`Error::FileAddFailure`],
/// [`Error::FileDeleteFailure`], [`Error::ArchiveWriteFailure`]) are collected
/// into the build and cleanup reports and only logged.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Naming Errors ====================
    /// The firmware file name does not split into `<product>_<carrier>`.
    #[error("malformed firmware file name (expected <product>_<carrier>[_...].zip): {path}")]
    MalformedFilename {
        /// The offending source path.
        path: PathBuf,
    },

    // ==================== Extraction Errors ====================
    /// The outer container could not be read as a zip archive.
    #[error("invalid firmware container {path}: {source}")]
    InvalidContainer {
        /// Path to the container.
        path: PathBuf,
        /// The underlying zip error.
        source: zip::result::ZipError,
    },

    /// The expected inner archive is not present in the container.
    #[error("container {container} has no entry named {entry}")]
    ContainerEntryMissing {
        /// Path to the container.
        container: PathBuf,
        /// The inner archive name that was looked up.
        entry: String,
    },

    /// An inner archive member resolves outside the working directory.
    #[error("path traversal detected: member '{entry}' resolves to '{resolved}'")]
    PathTraversalDetected {
        /// The member name as stored in the archive.
        entry: PathBuf,
        /// Where the member would have been written.
        resolved: PathBuf,
    },

    /// Writing an extracted file failed.
    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed {
        /// The file being written.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The fixed-size build worker pool could not be started.
    #[error("failed to start build workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    // ==================== Per-file Errors ====================
    /// A source file could not be added to a derivative archive.
    #[error("{file} not added to {archive}: {source}")]
    FileAddFailure {
        /// Name of the derivative archive.
        archive: String,
        /// Name of the source file.
        file: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A derivative archive could not be created or finalized.
    #[error("failed to write archive {archive}: {source}")]
    ArchiveWriteFailure {
        /// Path to the derivative archive.
        archive: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A file could not be removed during cleanup.
    #[error("{path} not deleted: {source}")]
    FileDeleteFailure {
        /// Path of the file.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },
}

impl Error {
    /// Whether this error aborts a repackaging job.
    ///
    /// Per-file failures during building and cleanup are recovered locally;
    /// everything else is fatal.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::FileAddFailure { .. }
                | Error::FileDeleteFailure { .. }
                | Error::ArchiveWriteFailure { .. }
        )
    }
}

/// A specialized Result type for `OdinPack` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_file_errors_are_not_fatal() {
        let add = Error::FileAddFailure {
            archive: "G960_MODEM.tar".to_string(),
            file: "modem.bin".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let delete = Error::FileDeleteFailure {
            path: PathBuf::from("sbl1.mbn"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(!add.is_fatal());
        assert!(!delete.is_fatal());
    }

    #[test]
    fn test_pipeline_errors_are_fatal() {
        let missing = Error::ContainerEntryMissing {
            container: PathBuf::from("G960_XYZ.zip"),
            entry: "G960_XYZ_G960_HOME.tar.md5".to_string(),
        };
        let traversal = Error::PathTraversalDetected {
            entry: PathBuf::from("../../etc/passwd"),
            resolved: PathBuf::from("/etc/passwd"),
        };
        assert!(missing.is_fatal());
        assert!(traversal.is_fatal());
        assert!(Error::MalformedFilename { path: PathBuf::from("G960.zip") }.is_fatal());
    }

    #[test]
    fn test_messages_name_the_offending_path() {
        let err = Error::MalformedFilename { path: PathBuf::from("/tmp/firmware.zip") };
        assert!(err.to_string().contains("/tmp/firmware.zip"));

        let err = Error::PathTraversalDetected {
            entry: PathBuf::from("../evil"),
            resolved: PathBuf::from("/evil"),
        };
        let msg = err.to_string();
        assert!(msg.contains("../evil"));
        assert!(msg.contains("/evil"));
    }
}
