// src/module/mod.rs

//! Module stream generation
//!
//! - `source`: derive the unique source package names of a catalog
//! - `document`: assemble the module stream and its defaults
//! - `serialize`: write the assembled document as modulemd YAML

pub mod document;
pub mod serialize;
pub mod source;

pub use document::{
    COMPONENT_RATIONALE, Component, DEFAULT_PROFILE, Defaults, ModuleDocument, ModuleIdentity,
    Profile, assemble,
};
pub use serialize::{DocumentSerializer, YamlSerializer};
pub use source::{SourcePackageSet, derive_source_packages, derive_source_packages_with};
