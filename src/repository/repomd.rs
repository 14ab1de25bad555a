// src/repository/repomd.rs

//! Metadata index (`repodata/repomd.xml`) reader
//!
//! The index lists every metadata file of the repository as a `<data>`
//! record carrying a type tag, a location relative to the repository root
//! and the checksum of the file as published.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Record type of the primary package catalog
pub const PRIMARY_TYPE: &str = "primary";

/// Checksum as declared in the index, not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredChecksum {
    /// Value of the `type` attribute, e.g. `sha256`
    pub kind: String,
    pub value: String,
}

/// One `<data>` record of the index
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepomdRecord {
    pub data_type: String,
    pub location_href: String,
    pub checksum: Option<DeclaredChecksum>,
    /// Size in bytes of the file as stored
    pub size: Option<u64>,
}

/// Parsed metadata index
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Repomd {
    pub revision: Option<String>,
    pub records: Vec<RepomdRecord>,
}

impl Repomd {
    /// Find the record of the given type. When a type is listed more than
    /// once the last record wins.
    pub fn record(&self, data_type: &str) -> Option<&RepomdRecord> {
        self.records.iter().rev().find(|r| r.data_type == data_type)
    }

    /// The primary package catalog record
    pub fn primary(&self) -> Option<&RepomdRecord> {
        self.record(PRIMARY_TYPE)
    }
}

/// Element whose text is being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    None,
    Revision,
    Checksum,
    Size,
}

/// Open and parse the index file at `path`
pub fn read_repomd(path: &Path) -> Result<Repomd> {
    let file = File::open(path).map_err(|e| Error::RepositoryRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_repomd(BufReader::new(file), path)
}

/// Parse an index document; `path` is only used in error messages
pub fn parse_repomd<R: BufRead>(reader: R, path: &Path) -> Result<Repomd> {
    let mut reader = Reader::from_reader(reader);
    reader.trim_text(true);

    let mut repomd = Repomd::default();
    let mut current: Option<RepomdRecord> = None;
    let mut field = Field::None;
    let mut checksum_kind = String::new();
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| Error::MalformedMetadata {
            path: path.to_path_buf(),
            message: format!("{} at byte {}", e, reader.buffer_position()),
        })?;

        match event {
            Event::Start(ref e) => {
                text.clear();
                field = Field::None;
                match e.local_name().as_ref() {
                    b"data" => {
                        current = Some(RepomdRecord {
                            data_type: attribute(e, b"type", path)?.unwrap_or_default(),
                            ..RepomdRecord::default()
                        });
                    }
                    b"revision" if current.is_none() => field = Field::Revision,
                    b"checksum" if current.is_some() => {
                        checksum_kind = attribute(e, b"type", path)?.unwrap_or_default();
                        field = Field::Checksum;
                    }
                    b"size" if current.is_some() => field = Field::Size,
                    b"location" => set_location(&mut current, e, path)?,
                    _ => {}
                }
            }
            Event::Empty(ref e) => {
                if e.local_name().as_ref() == b"location" {
                    set_location(&mut current, e, path)?;
                }
            }
            Event::Text(ref t) if field != Field::None => {
                let value = t.unescape().map_err(|e| Error::MalformedMetadata {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                text.push_str(&value);
            }
            Event::End(ref e) => {
                let value = text.trim().to_string();
                if e.local_name().as_ref() == b"data" {
                    if let Some(record) = current.take() {
                        repomd.records.push(record);
                    }
                } else {
                    match (field, current.as_mut()) {
                        (Field::Revision, _) => repomd.revision = Some(value),
                        (Field::Checksum, Some(record)) => {
                            record.checksum = Some(DeclaredChecksum {
                                kind: std::mem::take(&mut checksum_kind),
                                value,
                            });
                        }
                        (Field::Size, Some(record)) => record.size = value.parse().ok(),
                        _ => {}
                    }
                }
                field = Field::None;
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(repomd)
}

fn set_location(current: &mut Option<RepomdRecord>, e: &BytesStart<'_>, path: &Path) -> Result<()> {
    if let Some(record) = current.as_mut() {
        record.location_href = attribute(e, b"href", path)?.unwrap_or_default();
    }
    Ok(())
}

/// Unescaped value of the attribute with local name `key`
pub(crate) fn attribute(e: &BytesStart<'_>, key: &[u8], path: &Path) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::MalformedMetadata {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        if attr.key.local_name().as_ref() == key {
            let value = attr.unescape_value().map_err(|err| Error::MalformedMetadata {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
