// src/repository/mod.rs

//! Repository metadata reading
//!
//! This module provides:
//! - The metadata index reader (`repodata/repomd.xml`)
//! - A streaming primary catalog parser with warning callbacks
//! - The `CatalogParser` capability and `read_catalog`, which turns a
//!   repository root into an ordered list of package records

mod catalog;
pub mod primary;
pub mod repomd;

pub use catalog::{CatalogParser, REPOMD_PATH, XmlCatalogParser, read_catalog};
pub use primary::{ParseWarning, PrimaryOptions, WarningKind, parse_primary};
pub use repomd::{DeclaredChecksum, PRIMARY_TYPE, Repomd, RepomdRecord, read_repomd};
