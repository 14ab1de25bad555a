// src/checksum.rs

//! Checksums declared for repodata files
//!
//! `repomd.xml` records a `<checksum type="...">` for every metadata file it
//! lists. The algorithms here cover what createrepo-style tools publish in
//! practice (the SHA-2 family).

use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use std::fmt;
use std::io::{self, Read};
use std::str::FromStr;
use thiserror::Error;

/// Checksum algorithm named by a repomd `type` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChecksumType {
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl ChecksumType {
    /// Digest length as a hex string
    #[inline]
    pub const fn hex_len(&self) -> usize {
        match self {
            Self::Sha224 => 56,
            Self::Sha256 => 64,
            Self::Sha384 => 96,
            Self::Sha512 => 128,
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for ChecksumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ChecksumType {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(ChecksumError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

#[derive(Error, Debug)]
pub enum ChecksumError {
    #[error("unsupported checksum algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("invalid {algorithm} checksum length: expected {expected}, got {got}")]
    InvalidLength {
        algorithm: ChecksumType,
        expected: usize,
        got: usize,
    },

    #[error("invalid hex in checksum: {0}")]
    InvalidHex(String),

    #[error("failed to read data for checksum: {0}")]
    Io(#[from] io::Error),
}

/// A declared checksum value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum {
    pub algorithm: ChecksumType,
    /// Lowercase hex digest
    pub value: String,
}

impl Checksum {
    /// Validate and normalise a hex digest for `algorithm`
    pub fn new(algorithm: ChecksumType, value: impl Into<String>) -> Result<Self, ChecksumError> {
        let value = value.into().trim().to_lowercase();
        let expected = algorithm.hex_len();

        if value.len() != expected {
            return Err(ChecksumError::InvalidLength {
                algorithm,
                expected,
                got: value.len(),
            });
        }
        if !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChecksumError::InvalidHex(value));
        }

        Ok(Self { algorithm, value })
    }

    /// Parse the `type` attribute and text of a repomd `<checksum>` element
    pub fn parse(algorithm: &str, value: &str) -> Result<Self, ChecksumError> {
        Self::new(algorithm.parse()?, value)
    }

    /// Digest `reader` with this checksum's algorithm
    pub fn compute<R: Read>(algorithm: ChecksumType, reader: R) -> Result<Self, ChecksumError> {
        let value = match algorithm {
            ChecksumType::Sha224 => digest_reader::<Sha224, _>(reader)?,
            ChecksumType::Sha256 => digest_reader::<Sha256, _>(reader)?,
            ChecksumType::Sha384 => digest_reader::<Sha384, _>(reader)?,
            ChecksumType::Sha512 => digest_reader::<Sha512, _>(reader)?,
        };
        Ok(Self { algorithm, value })
    }

    /// Check that `reader` produces this digest
    ///
    /// Returns the digest actually computed so a caller can report it.
    pub fn verify<R: Read>(&self, reader: R) -> Result<(bool, Checksum), ChecksumError> {
        let actual = Self::compute(self.algorithm, reader)?;
        Ok((actual == *self, actual))
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.value)
    }
}

fn digest_reader<D: Digest, R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = D::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
