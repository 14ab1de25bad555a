// src/pipeline.rs

//! Reader → Deriver → Assembler → Writer
//!
//! Each stage only sees the output of the one before it. Nothing is written
//! to disk until the document has been assembled and serialized in memory.

use crate::error::{Error, Result};
use crate::module::{
    DocumentSerializer, ModuleDocument, ModuleIdentity, assemble, derive_source_packages,
};
use crate::repository::{CatalogParser, read_catalog};
use std::path::Path;
use tracing::{debug, info};

/// Read the repository at `repo_root` and assemble its module document
pub fn build_document(
    repo_root: &Path,
    identity: ModuleIdentity,
    parser: &dyn CatalogParser,
) -> Result<ModuleDocument> {
    let packages = read_catalog(repo_root, parser)?;
    let source_packages = derive_source_packages(&packages);
    info!(
        "Found {} source packages for {} packages",
        source_packages.len(),
        packages.len()
    );
    assemble(identity, &packages, &source_packages)
}

/// Serialize `document` and write it to `path`
///
/// The file is created only once serialization has succeeded.
pub fn write_document(
    path: &Path,
    document: &ModuleDocument,
    serializer: &dyn DocumentSerializer,
) -> Result<()> {
    let text = serializer.serialize(document)?;

    debug!("Writing YAML to {}", path.display());
    std::fs::write(path, text).map_err(|e| Error::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
