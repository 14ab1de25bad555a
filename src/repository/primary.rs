// src/repository/primary.rs

//! Streaming parser for the primary package catalog (`primary.xml`)
//!
//! The catalog is walked event by event; each completed `<package>` element
//! is handed to a package callback as a [`PackageRecord`]. Content that is
//! odd but recoverable is reported to a warning callback and the walk goes
//! on. Only malformed XML stops the parse.

use super::repomd::attribute;
use crate::error::{Error, Result};
use crate::packages::PackageRecord;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fmt;
use std::io::BufRead;
use std::path::Path;

/// Options for a primary catalog walk
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimaryOptions {
    /// Collect `<file>` entries into `PackageRecord::files`
    pub do_files: bool,
}

/// Category of a non-fatal parser diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// `<package>` with a `type` other than `rpm`
    UnknownPackageType,
    /// A required element or attribute is absent or empty
    MissingValue,
    /// An attribute value could not be interpreted
    BadValue,
    /// The `packages` count on `<metadata>` disagrees with the entries found
    PackageCountMismatch,
}

/// Non-fatal diagnostic emitted while walking a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub kind: WarningKind,
    pub message: String,
}

impl ParseWarning {
    fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    None,
    Name,
    Arch,
    SourceRpm,
    File,
}

/// Walk a primary catalog, calling `on_package` for every package entry
///
/// Returns the number of packages handed to `on_package`. `path` is only
/// used in diagnostics.
pub fn parse_primary<R: BufRead>(
    reader: R,
    path: &Path,
    options: &PrimaryOptions,
    on_package: &mut dyn FnMut(PackageRecord),
    on_warning: &mut dyn FnMut(&ParseWarning),
) -> Result<usize> {
    let mut reader = Reader::from_reader(reader);
    reader.trim_text(true);

    let mut expected: Option<usize> = None;
    let mut seen = 0usize;
    let mut emitted = 0usize;
    let mut current: Option<PackageRecord> = None;
    let mut field = Field::None;
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| Error::MalformedMetadata {
            path: path.to_path_buf(),
            message: format!("{} at byte {}", e, reader.buffer_position()),
        })?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                text.clear();
                field = Field::None;

                match e.local_name().as_ref() {
                    b"metadata" => {
                        if let Some(count) = attribute(e, b"packages", path)? {
                            match count.trim().parse::<usize>() {
                                Ok(count) => expected = Some(count),
                                Err(_) => on_warning(&ParseWarning::new(
                                    WarningKind::BadValue,
                                    format!("Invalid packages count \"{}\" on <metadata>", count),
                                )),
                            }
                        }
                    }
                    b"package" => {
                        seen += 1;
                        match attribute(e, b"type", path)?.as_deref() {
                            Some("rpm") => {}
                            Some(other) => on_warning(&ParseWarning::new(
                                WarningKind::UnknownPackageType,
                                format!("Unknown package type \"{}\"", other),
                            )),
                            None => on_warning(&ParseWarning::new(
                                WarningKind::MissingValue,
                                "Missing attribute \"type\" of a package element",
                            )),
                        }
                        current = Some(PackageRecord::default());
                    }
                    b"version" => {
                        if let Some(pkg) = current.as_mut() {
                            pkg.epoch = attribute(e, b"epoch", path)?.unwrap_or_default();
                            pkg.version = attribute(e, b"ver", path)?.unwrap_or_default();
                            pkg.release = attribute(e, b"rel", path)?.unwrap_or_default();
                            if pkg.version.is_empty() {
                                on_warning(&ParseWarning::new(
                                    WarningKind::MissingValue,
                                    "Missing attribute \"ver\" of a version element",
                                ));
                            }
                        }
                    }
                    b"name" if current.is_some() => field = Field::Name,
                    b"arch" if current.is_some() => field = Field::Arch,
                    b"sourcerpm" if current.is_some() => field = Field::SourceRpm,
                    b"file" if current.is_some() && options.do_files => field = Field::File,
                    _ => {}
                }

                // Self-closing fields carry an empty value
                if is_empty && field != Field::None {
                    commit(&mut current, field, "");
                    field = Field::None;
                }
            }
            Event::Text(ref t) if field != Field::None => {
                let value = t.unescape().map_err(|e| Error::MalformedMetadata {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                text.push_str(&value);
            }
            Event::CData(ref c) if field != Field::None => {
                text.push_str(&String::from_utf8_lossy(c));
            }
            Event::End(ref e) => {
                if e.local_name().as_ref() == b"package" {
                    if let Some(pkg) = current.take() {
                        if pkg.name.is_empty() {
                            on_warning(&ParseWarning::new(
                                WarningKind::MissingValue,
                                format!("Skipping package entry #{} without a name", seen),
                            ));
                        } else {
                            emitted += 1;
                            on_package(pkg);
                        }
                    }
                } else if field != Field::None {
                    commit(&mut current, field, text.trim());
                }
                field = Field::None;
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(expected) = expected {
        if expected != seen {
            on_warning(&ParseWarning::new(
                WarningKind::PackageCountMismatch,
                format!(
                    "The metadata declares {} packages but {} were found",
                    expected, seen
                ),
            ));
        }
    }

    Ok(emitted)
}

fn commit(current: &mut Option<PackageRecord>, field: Field, value: &str) {
    let Some(pkg) = current.as_mut() else {
        return;
    };
    match field {
        Field::Name => pkg.name = value.to_string(),
        Field::Arch => pkg.arch = value.to_string(),
        Field::SourceRpm => pkg.source_rpm = value.to_string(),
        Field::File => pkg.files.push(value.to_string()),
        Field::None => {}
    }
}
