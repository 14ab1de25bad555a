// src/repository/catalog.rs

//! Catalog Reader: repository root to ordered package records

use super::primary::{self, ParseWarning, PrimaryOptions};
use super::repomd::{self, DeclaredChecksum, Repomd, RepomdRecord};
use crate::checksum::{Checksum, ChecksumError};
use crate::compression;
use crate::error::{Error, Result};
use crate::packages::PackageRecord;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Location of the metadata index below a repository root
pub const REPOMD_PATH: &str = "repodata/repomd.xml";

/// Capability to read repository metadata files
///
/// The reader only decides which files to read and in what order; the
/// parsing itself goes through this trait so the pipeline can run against
/// an in-memory catalog.
pub trait CatalogParser {
    /// Read the metadata index at `path`
    fn read_index(&self, path: &Path) -> Result<Repomd>;

    /// Walk the primary catalog at `path`, described in the index by `record`
    fn parse_primary(
        &self,
        path: &Path,
        record: &RepomdRecord,
        options: &PrimaryOptions,
        on_package: &mut dyn FnMut(PackageRecord),
        on_warning: &mut dyn FnMut(&ParseWarning),
    ) -> Result<()>;
}

/// On-disk repodata parser built on quick-xml
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCatalogParser {
    verify_checksums: bool,
}

impl XmlCatalogParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the primary catalog against the checksum declared in the index
    /// before parsing it
    pub fn with_checksum_verification(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    fn verify(&self, path: &Path, declared: &DeclaredChecksum, size: Option<u64>) -> Result<()> {
        let expected = match Checksum::parse(&declared.kind, &declared.value) {
            Ok(expected) => expected,
            Err(ChecksumError::UnsupportedAlgorithm(kind)) => {
                warn!(
                    "Cannot verify {}: unsupported checksum type {}",
                    path.display(),
                    kind
                );
                return Ok(());
            }
            Err(e) => {
                return Err(Error::MalformedMetadata {
                    path: path.to_path_buf(),
                    message: format!("declared checksum is unusable: {}", e),
                });
            }
        };

        let file = open(path)?;

        // Declared size first, then the digest
        if let Some(expected_size) = size {
            let actual_size = file
                .metadata()
                .map_err(|e| Error::RepositoryRead {
                    path: path.to_path_buf(),
                    source: e,
                })?
                .len();
            if actual_size != expected_size {
                return Err(Error::SizeMismatch {
                    path: path.to_path_buf(),
                    expected: expected_size,
                    actual: actual_size,
                });
            }
        }

        let (matches, actual) = expected.verify(BufReader::new(file)).map_err(|e| match e {
            ChecksumError::Io(source) => Error::RepositoryRead {
                path: path.to_path_buf(),
                source,
            },
            other => other.into(),
        })?;

        if !matches {
            return Err(Error::ChecksumMismatch {
                path: path.to_path_buf(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
        debug!("Verified {} ({})", path.display(), expected);
        Ok(())
    }
}

impl CatalogParser for XmlCatalogParser {
    fn read_index(&self, path: &Path) -> Result<Repomd> {
        repomd::read_repomd(path)
    }

    fn parse_primary(
        &self,
        path: &Path,
        record: &RepomdRecord,
        options: &PrimaryOptions,
        on_package: &mut dyn FnMut(PackageRecord),
        on_warning: &mut dyn FnMut(&ParseWarning),
    ) -> Result<()> {
        if self.verify_checksums {
            match &record.checksum {
                Some(declared) => self.verify(path, declared, record.size)?,
                None => warn!("No checksum declared for {}, skipping verification", path.display()),
            }
        }

        let file = open(path)?;
        let (format, decoded) = compression::open_decoded(file, &record.location_href)?;
        debug!("Parsing {} (compression: {})", path.display(), format);

        primary::parse_primary(decoded, path, options, on_package, on_warning)?;
        Ok(())
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::RepositoryRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read every package record of the repository rooted at `repo_root`
///
/// Records come back in catalog order. Parser warnings are logged and never
/// stop the scan. Per-file listings are not requested.
pub fn read_catalog(repo_root: &Path, parser: &dyn CatalogParser) -> Result<Vec<PackageRecord>> {
    let index_path = repo_root.join(REPOMD_PATH);
    let index = parser.read_index(&index_path)?;
    if let Some(revision) = &index.revision {
        debug!("Repository revision {}", revision);
    }

    let record = index
        .primary()
        .ok_or_else(|| Error::MissingPrimary {
            path: index_path.clone(),
        })?;
    let primary_path: PathBuf = repo_root.join(&record.location_href);
    debug!("Primary catalog: {}", primary_path.display());

    let mut packages = Vec::new();
    parser.parse_primary(
        &primary_path,
        record,
        &PrimaryOptions { do_files: false },
        &mut |pkg| packages.push(pkg),
        &mut |warning| warn!("PARSER WARNING: {}", warning),
    )?;

    info!(
        "Read {} packages from {}",
        packages.len(),
        repo_root.display()
    );
    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::primary::WarningKind;
    use std::cell::RefCell;

    /// In-memory parser that records the options it was called with
    struct FakeParser {
        index: Repomd,
        packages: Vec<PackageRecord>,
        warnings: Vec<ParseWarning>,
        seen: RefCell<Vec<(PathBuf, bool)>>,
    }

    impl CatalogParser for FakeParser {
        fn read_index(&self, _path: &Path) -> Result<Repomd> {
            Ok(self.index.clone())
        }

        fn parse_primary(
            &self,
            path: &Path,
            _record: &RepomdRecord,
            options: &PrimaryOptions,
            on_package: &mut dyn FnMut(PackageRecord),
            on_warning: &mut dyn FnMut(&ParseWarning),
        ) -> Result<()> {
            self.seen
                .borrow_mut()
                .push((path.to_path_buf(), options.do_files));
            for warning in &self.warnings {
                on_warning(warning);
            }
            for pkg in &self.packages {
                on_package(pkg.clone());
            }
            Ok(())
        }
    }

    fn index_with(data_type: &str, href: &str) -> Repomd {
        Repomd {
            revision: None,
            records: vec![RepomdRecord {
                data_type: data_type.to_string(),
                location_href: href.to_string(),
                ..RepomdRecord::default()
            }],
        }
    }

    #[test]
    fn test_read_catalog_resolves_primary_and_keeps_order() {
        let parser = FakeParser {
            index: index_with("primary", "repodata/primary.xml.gz"),
            packages: vec![
                PackageRecord::new("b", "0", "1", "1", "noarch", "b-1-1.src.rpm"),
                PackageRecord::new("a", "0", "1", "1", "noarch", "a-1-1.src.rpm"),
            ],
            warnings: vec![ParseWarning {
                kind: WarningKind::BadValue,
                message: "odd".to_string(),
            }],
            seen: RefCell::new(Vec::new()),
        };

        let packages = read_catalog(Path::new("/srv/repo"), &parser).unwrap();
        let names: Vec<&str> = packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);

        let seen = parser.seen.borrow();
        assert_eq!(
            seen.as_slice(),
            &[(PathBuf::from("/srv/repo/repodata/primary.xml.gz"), false)]
        );
    }

    #[test]
    fn test_read_catalog_without_primary() {
        let parser = FakeParser {
            index: index_with("filelists", "repodata/filelists.xml.gz"),
            packages: Vec::new(),
            warnings: Vec::new(),
            seen: RefCell::new(Vec::new()),
        };

        let result = read_catalog(Path::new("/srv/repo"), &parser);
        assert!(matches!(result, Err(Error::MissingPrimary { .. })));
        assert!(parser.seen.borrow().is_empty());
    }
}
