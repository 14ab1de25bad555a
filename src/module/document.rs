// src/module/document.rs

//! Module Assembler
//!
//! Builds one module stream document, plus the defaults that select it,
//! from the package catalog and the derived source packages. The document
//! is a draft: summary, description and content license are placeholders
//! meant to be edited by hand.

use super::source::SourcePackageSet;
use crate::error::{Error, Result};
use crate::packages::PackageRecord;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Name of the single profile every generated stream carries
pub const DEFAULT_PROFILE: &str = "everything";

/// Rationale recorded on every component
pub const COMPONENT_RATIONALE: &str = "Present in the repository";

pub const SUMMARY_PLACEHOLDER: &str = "<auto-generated module summary>";
pub const DESCRIPTION_PLACEHOLDER: &str = "<auto-generated module description>";
pub const MODULE_LICENSE: &str = "MIT";
pub const CONTENT_LICENSE_PLACEHOLDER: &str = "<FILL THIS IN>";

/// Name, stream, version and context of a module stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleIdentity {
    pub name: String,
    pub stream: String,
    pub version: u64,
    /// Opaque tag telling builds of the same stream apart
    pub context: String,
}

impl ModuleIdentity {
    pub fn new(
        name: impl Into<String>,
        stream: impl Into<String>,
        version: u64,
        context: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            stream: stream.into(),
            version,
            context: context.into(),
        }
    }

    /// Reject empty name, stream or context
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("stream", &self.stream),
            ("context", &self.context),
        ] {
            if value.is_empty() {
                return Err(Error::InvalidIdentity { field });
            }
        }
        Ok(())
    }
}

/// A source package recorded in the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub rationale: String,
}

/// A named group of packages installed together
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    pub rpms: BTreeSet<String>,
}

/// Which stream and profiles are used when none are named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub module: String,
    pub default_stream: String,
    /// Stream name to its default profiles
    pub profiles: BTreeMap<String, BTreeSet<String>>,
}

/// The assembled module stream plus its defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDocument {
    pub identity: ModuleIdentity,
    pub summary: String,
    pub description: String,
    pub module_licenses: BTreeSet<String>,
    pub content_licenses: BTreeSet<String>,
    /// Source package name to component
    pub components: BTreeMap<String, Component>,
    /// Package NEVRAs
    pub artifacts: BTreeSet<String>,
    /// Package names exposed as the module API
    pub api: BTreeSet<String>,
    pub profiles: BTreeMap<String, Profile>,
    pub defaults: Defaults,
}

/// Assemble the module document for `identity`
///
/// Fails only on an invalid identity; an empty catalog gives a document
/// with no components, artifacts or API and an empty default profile.
pub fn assemble(
    identity: ModuleIdentity,
    packages: &[PackageRecord],
    source_packages: &SourcePackageSet,
) -> Result<ModuleDocument> {
    identity.validate()?;

    let components = source_packages
        .iter()
        .map(|name| {
            (
                name.clone(),
                Component {
                    rationale: COMPONENT_RATIONALE.to_string(),
                },
            )
        })
        .collect();

    let mut artifacts = BTreeSet::new();
    let mut api = BTreeSet::new();
    let mut profile = Profile::default();
    for pkg in packages {
        artifacts.insert(pkg.nevra());
        api.insert(pkg.name.clone());
        profile.rpms.insert(pkg.name.clone());
    }

    let defaults = Defaults {
        module: identity.name.clone(),
        default_stream: identity.stream.clone(),
        profiles: BTreeMap::from([(
            identity.stream.clone(),
            BTreeSet::from([DEFAULT_PROFILE.to_string()]),
        )]),
    };

    debug!(
        "Assembled {}:{}: {} components, {} artifacts",
        identity.name,
        identity.stream,
        source_packages.len(),
        artifacts.len()
    );

    Ok(ModuleDocument {
        identity,
        summary: SUMMARY_PLACEHOLDER.to_string(),
        description: DESCRIPTION_PLACEHOLDER.to_string(),
        module_licenses: BTreeSet::from([MODULE_LICENSE.to_string()]),
        content_licenses: BTreeSet::from([CONTENT_LICENSE_PLACEHOLDER.to_string()]),
        components,
        artifacts,
        api,
        profiles: BTreeMap::from([(DEFAULT_PROFILE.to_string(), profile)]),
        defaults,
    })
}
