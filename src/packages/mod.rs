// src/packages/mod.rs

//! Package records read from a repository catalog
//!
//! A `PackageRecord` holds the package-level facts of one `<package>` entry
//! of a primary catalog. Records are immutable once the reader has built
//! them; later stages only borrow them.

pub mod nevra;

pub use nevra::{Nevra, NevraForm, NevraResolver, SubjectResolver};

use std::fmt;

/// Suffix carried by every binary and source package file name
pub const RPM_SUFFIX: &str = ".rpm";

/// One package entry of the primary catalog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageRecord {
    pub name: String,
    /// Epoch as written in the catalog; may be empty
    pub epoch: String,
    pub version: String,
    pub release: String,
    pub arch: String,
    /// Source RPM file name, e.g. `foo-1.0-1.src.rpm`
    pub source_rpm: String,
    /// File listing, only collected when the parser is asked for it
    pub files: Vec<String>,
}

impl PackageRecord {
    /// Create a record from its identifying fields
    pub fn new(
        name: impl Into<String>,
        epoch: impl Into<String>,
        version: impl Into<String>,
        release: impl Into<String>,
        arch: impl Into<String>,
        source_rpm: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            epoch: epoch.into(),
            version: version.into(),
            release: release.into(),
            arch: arch.into(),
            source_rpm: source_rpm.into(),
            files: Vec::new(),
        }
    }

    /// Epoch, with an empty value read as `0`
    pub fn epoch_or_zero(&self) -> &str {
        if self.epoch.is_empty() { "0" } else { &self.epoch }
    }

    /// Canonical `name-epoch:version-release.arch` identifier
    pub fn nevra(&self) -> String {
        format!(
            "{}-{}:{}-{}.{}",
            self.name,
            self.epoch_or_zero(),
            self.version,
            self.release,
            self.arch
        )
    }

    /// The source RPM reference with its `.rpm` suffix removed
    ///
    /// `None` when the file name is shorter than the suffix. The suffix is
    /// cut by length, the file name is not checked for it.
    pub fn source_rpm_stem(&self) -> Option<&str> {
        let cut = self.source_rpm.len().checked_sub(RPM_SUFFIX.len())?;
        self.source_rpm.get(..cut)
    }
}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nevra())
    }
}
