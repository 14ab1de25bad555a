// src/compression/mod.rs
//! Transparent decompression for repodata files
//!
//! `repomd.xml` is always plain, but the primary catalog it points at is
//! usually published compressed (`primary.xml.gz`, `.xz` or `.zst`).

use std::io::{self, BufRead, BufReader, Read};
use thiserror::Error;

/// Compression-related errors
#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("Failed to create {format} decoder: {source}")]
    DecoderCreation {
        format: &'static str,
        source: io::Error,
    },

    #[error("Failed to inspect {path} for compression: {source}")]
    Detection { path: String, source: io::Error },

    #[error("Unsupported compression format: {0}")]
    UnsupportedFormat(String),
}

/// Supported compression formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// No compression (raw XML)
    None,
    /// Gzip compression (.gz)
    Gzip,
    /// XZ/LZMA compression (.xz)
    Xz,
    /// Zstandard compression (.zst)
    Zstd,
}

impl CompressionFormat {
    /// Detect compression format from a repodata location
    ///
    /// Returns `Ok(None)` when the extension says nothing about compression,
    /// so the caller can fall back to sniffing magic bytes.
    pub fn from_extension(path: &str) -> Result<Option<Self>, CompressionError> {
        if path.ends_with(".gz") {
            Ok(Some(Self::Gzip))
        } else if path.ends_with(".xz") {
            Ok(Some(Self::Xz))
        } else if path.ends_with(".zst") || path.ends_with(".zstd") {
            Ok(Some(Self::Zstd))
        } else if path.ends_with(".bz2") {
            Err(CompressionError::UnsupportedFormat("bzip2".to_string()))
        } else if path.ends_with(".xml") {
            Ok(Some(Self::None))
        } else {
            Ok(None)
        }
    }

    /// Detect compression format from magic bytes
    ///
    /// Magic bytes:
    /// - Gzip: `1f 8b`
    /// - XZ: `fd 37 7a 58 5a 00`
    /// - Zstd: `28 b5 2f fd`
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.starts_with(&[0x1f, 0x8b]) {
            Self::Gzip
        } else if data.starts_with(&[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00]) {
            Self::Xz
        } else if data.starts_with(&[0x28, 0xb5, 0x2f, 0xfd]) {
            Self::Zstd
        } else {
            Self::None
        }
    }

    /// Get a human-readable name for this format
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }
}

impl std::fmt::Display for CompressionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Create a decompressing reader for the given format
///
/// For `CompressionFormat::None` the reader is returned unchanged.
pub fn create_decoder<'a, R: BufRead + 'a>(
    reader: R,
    format: CompressionFormat,
) -> Result<Box<dyn BufRead + 'a>, CompressionError> {
    match format {
        CompressionFormat::None => Ok(Box::new(reader)),
        CompressionFormat::Gzip => Ok(Box::new(BufReader::new(flate2::bufread::MultiGzDecoder::new(
            reader,
        )))),
        CompressionFormat::Xz => Ok(Box::new(BufReader::new(xz2::bufread::XzDecoder::new(reader)))),
        CompressionFormat::Zstd => {
            let decoder =
                zstd::Decoder::with_buffer(reader).map_err(|e| CompressionError::DecoderCreation {
                    format: "zstd",
                    source: e,
                })?;
            Ok(Box::new(BufReader::new(decoder)))
        }
    }
}

/// Wrap a metadata reader in the decoder its location or content calls for
///
/// The extension of `location` wins; unknown extensions are resolved by
/// peeking at the first bytes of the stream without consuming them.
pub fn open_decoded<'a, R: Read + 'a>(
    reader: R,
    location: &str,
) -> Result<(CompressionFormat, Box<dyn BufRead + 'a>), CompressionError> {
    let mut reader = BufReader::new(reader);
    let format = match CompressionFormat::from_extension(location)? {
        Some(format) => format,
        None => {
            let head = reader.fill_buf().map_err(|e| CompressionError::Detection {
                path: location.to_string(),
                source: e,
            })?;
            CompressionFormat::from_magic_bytes(head)
        }
    };
    Ok((format, create_decoder(reader, format)?))
}
