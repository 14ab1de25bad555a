// src/module/source.rs

//! Source-Package Deriver
//!
//! Every binary package records the source RPM it was built from. Cutting
//! the `.rpm` suffix off that file name and reading the rest as a strict
//! NEVRA yields the source package name. When the resolver offers more than
//! one reading, every candidate name is kept.

use crate::packages::{NevraForm, NevraResolver, PackageRecord, SubjectResolver};
use std::collections::BTreeSet;
use tracing::debug;

/// Unique source package names
pub type SourcePackageSet = BTreeSet<String>;

/// Derive source package names with the default resolver
pub fn derive_source_packages(packages: &[PackageRecord]) -> SourcePackageSet {
    derive_source_packages_with(packages, &SubjectResolver)
}

/// Derive source package names through `resolver`
///
/// Records whose source RPM cannot be resolved contribute nothing. That gap
/// is only visible at debug level.
pub fn derive_source_packages_with(
    packages: &[PackageRecord],
    resolver: &dyn NevraResolver,
) -> SourcePackageSet {
    let mut source_packages = SourcePackageSet::new();

    for pkg in packages {
        let Some(subject) = pkg.source_rpm_stem() else {
            debug!(
                "No source package for {}: source RPM \"{}\" is too short",
                pkg.nevra(),
                pkg.source_rpm
            );
            continue;
        };

        let candidates = resolver.possibilities(subject, &[NevraForm::Nevra]);
        if candidates.is_empty() {
            debug!(
                "No source package for {}: \"{}\" is not a NEVRA",
                pkg.nevra(),
                subject
            );
        }
        for nevra in candidates {
            source_packages.insert(nevra.name);
        }
    }

    source_packages
}
