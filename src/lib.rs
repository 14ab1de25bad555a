// src/lib.rs

//! repo2module
//!
//! Turns the package metadata of an RPM repository into a modulemd module
//! stream document: one stream whose components are the repository's
//! source packages, whose artifacts and API are its binary packages, and
//! whose single default profile installs everything.
//!
//! # Pipeline
//!
//! - Catalog Reader (`repository`): repomd.xml → primary catalog → records
//! - Source-Package Deriver (`module::source`): records → source names
//! - Module Assembler (`module::document`): records + names → document
//! - Writer (`module::serialize`): document → modulemd YAML

pub mod checksum;
pub mod compression;
pub mod config;
mod error;
pub mod module;
pub mod packages;
pub mod pipeline;
pub mod repository;

pub use error::{EXIT_FAILURE, EXIT_OUTPUT, EXIT_REPOSITORY, Error, Result};
pub use module::{
    DEFAULT_PROFILE, DocumentSerializer, ModuleDocument, ModuleIdentity, SourcePackageSet,
    YamlSerializer, assemble, derive_source_packages,
};
pub use packages::PackageRecord;
pub use pipeline::{build_document, write_document};
pub use repository::{CatalogParser, ParseWarning, XmlCatalogParser, read_catalog};
