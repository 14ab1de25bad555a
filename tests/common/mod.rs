// tests/common/mod.rs

//! Shared test utilities: throwaway repositories on disk.

#![allow(dead_code)]

use flate2::Compression;
use flate2::write::GzEncoder;
use repo2module::checksum::{Checksum, ChecksumType};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One `<package>` entry of a fake primary catalog
pub struct FakePackage {
    pub name: &'static str,
    pub epoch: &'static str,
    pub version: &'static str,
    pub release: &'static str,
    pub arch: &'static str,
    pub source_rpm: &'static str,
}

impl FakePackage {
    pub fn new(name: &'static str, arch: &'static str, source_rpm: &'static str) -> Self {
        Self {
            name,
            epoch: "0",
            version: "1.0",
            release: "1",
            arch,
            source_rpm,
        }
    }

    pub fn with_evr(
        mut self,
        epoch: &'static str,
        version: &'static str,
        release: &'static str,
    ) -> Self {
        self.epoch = epoch;
        self.version = version;
        self.release = release;
        self
    }
}

/// How the primary catalog is stored and described
#[derive(Debug, Clone, Copy, Default)]
pub struct RepoLayout {
    pub gzip: bool,
    pub checksum: bool,
    pub corrupt_checksum: bool,
    /// Checksum text written verbatim instead of the computed digest
    pub checksum_text: Option<&'static str>,
    /// Size written instead of the real file size
    pub declared_size: Option<u64>,
}

/// The standard two-package fixture: foo and foo-devel from one source RPM
pub fn foo_packages() -> Vec<FakePackage> {
    vec![
        FakePackage::new("foo", "x86_64", "foo-1.0-1.src.rpm"),
        FakePackage::new("foo-devel", "x86_64", "foo-1.0-1.src.rpm"),
    ]
}

pub fn primary_xml(packages: &[FakePackage]) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<metadata xmlns="http://linux.duke.edu/metadata/common" xmlns:rpm="http://linux.duke.edu/metadata/rpm" packages="{}">"#,
        packages.len()
    ));
    xml.push('\n');

    for pkg in packages {
        xml.push_str(&format!(
            r#"<package type="rpm">
  <name>{}</name>
  <arch>{}</arch>
  <version epoch="{}" ver="{}" rel="{}"/>
  <format>
    <rpm:sourcerpm>{}</rpm:sourcerpm>
    <file>/usr/share/doc/{}/README</file>
  </format>
</package>
"#,
            pkg.name, pkg.arch, pkg.epoch, pkg.version, pkg.release, pkg.source_rpm, pkg.name
        ));
    }

    xml.push_str("</metadata>\n");
    xml
}

/// Write repodata/ for `packages` into a fresh temporary directory
///
/// Returns the TempDir; keep it alive for the duration of the test.
pub fn create_repo(packages: &[FakePackage], layout: RepoLayout) -> TempDir {
    let temp_dir = tempfile::tempdir().unwrap();
    write_repo(temp_dir.path(), packages, layout);
    temp_dir
}

pub fn write_repo(root: &Path, packages: &[FakePackage], layout: RepoLayout) -> PathBuf {
    let repodata = root.join("repodata");
    fs::create_dir_all(&repodata).unwrap();

    let xml = primary_xml(packages);
    let (href, bytes) = if layout.gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(xml.as_bytes()).unwrap();
        ("repodata/primary.xml.gz", encoder.finish().unwrap())
    } else {
        ("repodata/primary.xml", xml.into_bytes())
    };
    fs::write(root.join(href), &bytes).unwrap();

    let checksum = if layout.checksum {
        let value = if let Some(text) = layout.checksum_text {
            text.to_string()
        } else if layout.corrupt_checksum {
            "0".repeat(ChecksumType::Sha256.hex_len())
        } else {
            Checksum::compute(ChecksumType::Sha256, bytes.as_slice())
                .unwrap()
                .value
        };
        format!(r#"    <checksum type="sha256">{}</checksum>"#, value)
    } else {
        String::new()
    };

    let repomd = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<repomd xmlns="http://linux.duke.edu/metadata/repo">
  <revision>1700000000</revision>
  <data type="primary">
{}
    <location href="{}"/>
    <size>{}</size>
  </data>
</repomd>
"#,
        checksum,
        href,
        layout.declared_size.unwrap_or(bytes.len() as u64)
    );
    let repomd_path = repodata.join("repomd.xml");
    fs::write(&repomd_path, repomd).unwrap();
    repomd_path
}
