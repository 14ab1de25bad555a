// src/error.rs

//! Error types for repo2module

use crate::checksum::ChecksumError;
use crate::compression::CompressionError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for repository metadata that could not be opened or parsed
pub const EXIT_REPOSITORY: u8 = 2;

/// Exit code for failures writing the output document
pub const EXIT_OUTPUT: u8 = 3;

/// Exit code for every other fatal error
pub const EXIT_FAILURE: u8 = 1;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read repository metadata {}: {source}", path.display())]
    RepositoryRead { path: PathBuf, source: io::Error },

    #[error("No primary catalog listed in {}", path.display())]
    MissingPrimary { path: PathBuf },

    #[error("Malformed metadata in {}: {message}", path.display())]
    MalformedMetadata { path: PathBuf, message: String },

    #[error("Checksum mismatch for {}: expected {expected}, got {actual}", path.display())]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Size mismatch for {}: expected {expected} bytes, got {actual}", path.display())]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error(transparent)]
    Compression(#[from] CompressionError),

    #[error(transparent)]
    Checksum(#[from] ChecksumError),

    #[error("Invalid module {field}: must not be empty")]
    InvalidIdentity { field: &'static str },

    #[error("Failed to serialize module document: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Could not write YAML to file {}: {source}", path.display())]
    OutputWrite { path: PathBuf, source: io::Error },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::RepositoryRead { .. }
            | Self::MissingPrimary { .. }
            | Self::MalformedMetadata { .. }
            | Self::ChecksumMismatch { .. }
            | Self::SizeMismatch { .. }
            | Self::Compression(_) => EXIT_REPOSITORY,
            Self::OutputWrite { .. } => EXIT_OUTPUT,
            Self::Checksum(_)
            | Self::InvalidIdentity { .. }
            | Self::Serialize(_)
            | Self::Config(_) => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let read = Error::RepositoryRead {
            path: PathBuf::from("/repo/repodata/repomd.xml"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(read.exit_code(), EXIT_REPOSITORY);

        let write = Error::OutputWrite {
            path: PathBuf::from("/modules.yaml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(write.exit_code(), EXIT_OUTPUT);

        let identity = Error::InvalidIdentity { field: "context" };
        assert_eq!(identity.exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn test_error_display_includes_path() {
        let err = Error::MissingPrimary {
            path: PathBuf::from("/repo/repodata/repomd.xml"),
        };
        assert_eq!(
            err.to_string(),
            "No primary catalog listed in /repo/repodata/repomd.xml"
        );
    }
}
