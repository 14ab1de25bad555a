// src/module/serialize.rs

//! Module document serialization
//!
//! The YAML writer emits a modulemd index: a `modulemd` v2 stream document
//! followed by a `modulemd-defaults` v1 document. Collections are written in
//! sorted order so the same input always produces the same bytes.

use super::document::{ModuleDocument, Profile};
use crate::error::Result;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub const MODULEMD_DOCUMENT: &str = "modulemd";
pub const MODULEMD_VERSION: u32 = 2;
pub const DEFAULTS_DOCUMENT: &str = "modulemd-defaults";
pub const DEFAULTS_VERSION: u32 = 1;

/// Capability to turn an assembled document into its textual form
pub trait DocumentSerializer {
    fn serialize(&self, document: &ModuleDocument) -> Result<String>;
}

/// modulemd YAML writer
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlSerializer;

#[derive(Serialize)]
struct Envelope<T> {
    document: &'static str,
    version: u32,
    data: T,
}

#[derive(Serialize)]
struct Rpms<'a> {
    rpms: &'a BTreeSet<String>,
}

#[derive(Serialize)]
struct License<'a> {
    module: &'a BTreeSet<String>,
    content: &'a BTreeSet<String>,
}

#[derive(Serialize)]
struct ComponentData<'a> {
    rationale: &'a str,
}

#[derive(Serialize)]
struct Components<'a> {
    rpms: BTreeMap<&'a str, ComponentData<'a>>,
}

#[derive(Serialize)]
struct StreamData<'a> {
    name: &'a str,
    stream: &'a str,
    version: u64,
    context: &'a str,
    summary: &'a str,
    description: &'a str,
    license: License<'a>,
    profiles: BTreeMap<&'a str, Rpms<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api: Option<Rpms<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<Components<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    artifacts: Option<Rpms<'a>>,
}

#[derive(Serialize)]
struct DefaultsData<'a> {
    module: &'a str,
    stream: &'a str,
    profiles: &'a BTreeMap<String, BTreeSet<String>>,
}

fn rpms(set: &BTreeSet<String>) -> Option<Rpms<'_>> {
    (!set.is_empty()).then_some(Rpms { rpms: set })
}

fn profile_rpms(profile: &Profile) -> Rpms<'_> {
    Rpms { rpms: &profile.rpms }
}

impl DocumentSerializer for YamlSerializer {
    fn serialize(&self, document: &ModuleDocument) -> Result<String> {
        let identity = &document.identity;

        let stream = Envelope {
            document: MODULEMD_DOCUMENT,
            version: MODULEMD_VERSION,
            data: StreamData {
                name: &identity.name,
                stream: &identity.stream,
                version: identity.version,
                context: &identity.context,
                summary: &document.summary,
                description: &document.description,
                license: License {
                    module: &document.module_licenses,
                    content: &document.content_licenses,
                },
                profiles: document
                    .profiles
                    .iter()
                    .map(|(name, profile)| (name.as_str(), profile_rpms(profile)))
                    .collect(),
                api: rpms(&document.api),
                components: (!document.components.is_empty()).then(|| Components {
                    rpms: document
                        .components
                        .iter()
                        .map(|(name, component)| {
                            (
                                name.as_str(),
                                ComponentData {
                                    rationale: &component.rationale,
                                },
                            )
                        })
                        .collect(),
                }),
                artifacts: rpms(&document.artifacts),
            },
        };

        let defaults = Envelope {
            document: DEFAULTS_DOCUMENT,
            version: DEFAULTS_VERSION,
            data: DefaultsData {
                module: &document.defaults.module,
                stream: &document.defaults.default_stream,
                profiles: &document.defaults.profiles,
            },
        };

        let mut out = String::new();
        for body in [serde_yaml::to_string(&stream)?, serde_yaml::to_string(&defaults)?] {
            out.push_str("---\n");
            out.push_str(&body);
            out.push_str("...\n");
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::document::{ModuleIdentity, assemble};
    use crate::module::source::derive_source_packages;
    use crate::packages::PackageRecord;
    use serde::Deserialize;
    use serde_yaml::Value;

    fn documents(yaml: &str) -> Vec<Value> {
        serde_yaml::Deserializer::from_str(yaml)
            .map(|doc| Value::deserialize(doc).unwrap())
            .collect()
    }

    fn sample() -> ModuleDocument {
        let packages = vec![
            PackageRecord::new("foo-devel", "0", "1.0", "1", "x86_64", "foo-1.0-1.src.rpm"),
            PackageRecord::new("foo", "0", "1.0", "1", "x86_64", "foo-1.0-1.src.rpm"),
        ];
        let sources = derive_source_packages(&packages);
        assemble(ModuleIdentity::new("foo", "rolling", 1, "abcdef12"), &packages, &sources).unwrap()
    }

    #[test]
    fn test_yaml_layout() {
        let yaml = YamlSerializer.serialize(&sample()).unwrap();
        assert!(yaml.starts_with("---\ndocument: modulemd\nversion: 2\n"));
        assert!(yaml.ends_with("...\n"));

        let docs = documents(&yaml);
        assert_eq!(docs.len(), 2);

        let data = &docs[0]["data"];
        assert_eq!(data["name"].as_str(), Some("foo"));
        assert_eq!(data["stream"].as_str(), Some("rolling"));
        assert_eq!(data["version"].as_u64(), Some(1));
        assert_eq!(data["context"].as_str(), Some("abcdef12"));
        assert_eq!(data["summary"].as_str(), Some("<auto-generated module summary>"));
        assert_eq!(data["license"]["module"][0].as_str(), Some("MIT"));
        assert_eq!(data["license"]["content"][0].as_str(), Some("<FILL THIS IN>"));
        assert_eq!(
            data["components"]["rpms"]["foo"]["rationale"].as_str(),
            Some("Present in the repository")
        );

        let api: Vec<&str> = data["api"]["rpms"]
            .as_sequence()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(api, vec!["foo", "foo-devel"]);
        assert_eq!(data["profiles"]["everything"]["rpms"][1].as_str(), Some("foo-devel"));
        assert_eq!(data["artifacts"]["rpms"][0].as_str(), Some("foo-0:1.0-1.x86_64"));

        let defaults = &docs[1];
        assert_eq!(defaults["document"].as_str(), Some("modulemd-defaults"));
        assert_eq!(defaults["version"].as_u64(), Some(1));
        assert_eq!(defaults["data"]["module"].as_str(), Some("foo"));
        assert_eq!(defaults["data"]["stream"].as_str(), Some("rolling"));
        assert_eq!(
            defaults["data"]["profiles"]["rolling"][0].as_str(),
            Some("everything")
        );
    }

    #[test]
    fn test_yaml_is_byte_stable() {
        let first = YamlSerializer.serialize(&sample()).unwrap();
        let second = YamlSerializer.serialize(&sample()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_document_omits_empty_sections() {
        let doc = assemble(
            ModuleIdentity::new("empty", "rolling", 1, "abcdef12"),
            &[],
            &Default::default(),
        )
        .unwrap();
        let docs = documents(&YamlSerializer.serialize(&doc).unwrap());
        let data = &docs[0]["data"];

        assert!(data.get("components").is_none());
        assert!(data.get("artifacts").is_none());
        assert!(data.get("api").is_none());
        assert_eq!(
            data["profiles"]["everything"]["rpms"].as_sequence().map(Vec::len),
            Some(0)
        );
    }

    #[test]
    fn test_numeric_looking_stream_stays_a_string() {
        let identity = ModuleIdentity::new("foo", "1.10", 1, "abcdef12");
        let doc = assemble(identity, &[], &Default::default()).unwrap();
        let docs = documents(&YamlSerializer.serialize(&doc).unwrap());
        assert_eq!(docs[0]["data"]["stream"].as_str(), Some("1.10"));
        assert_eq!(docs[1]["data"]["stream"].as_str(), Some("1.10"));
    }
}
