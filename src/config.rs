// src/config.rs

//! Run configuration
//!
//! Everything a run needs is gathered into one `RunConfig` value before any
//! work starts: paths, module identity, repository options and the log
//! level. Values come from the command line, then an optional TOML file,
//! then built-in defaults.
//!
//! # Example repo2module.toml
//!
//! ```toml
//! [module]
//! name = "mytools"
//! stream = "stable"
//! version = 20240101
//! context = "deadbeef"
//!
//! [repository]
//! verify_checksums = true
//! ```

use crate::error::{Error, Result};
use crate::module::ModuleIdentity;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_STREAM: &str = "rolling";
pub const DEFAULT_VERSION: u64 = 1;
pub const DEFAULT_CONTEXT: &str = "abcdef12";
pub const DEFAULT_OUTPUT: &str = "modules.yaml";

/// Verbosity of the log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Warnings and errors only
    #[default]
    Warn,
    /// Everything, including derivation gaps
    Debug,
}

impl LogLevel {
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug { Self::Debug } else { Self::Warn }
    }

    /// `EnvFilter` directive for this level
    pub fn directive(&self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Debug => "debug",
        }
    }
}

/// `[module]` table of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSection {
    pub name: Option<String>,
    pub stream: Option<String>,
    pub version: Option<u64>,
    pub context: Option<String>,
}

/// `[repository]` table of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositorySection {
    pub verify_checksums: Option<bool>,
}

/// Contents of a `--config` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub module: ModuleSection,
    #[serde(default)]
    pub repository: RepositorySection,
}

impl FileConfig {
    /// Load and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Values given on the command line; `None` defers to the file or default
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub module_name: Option<String>,
    pub module_stream: Option<String>,
    pub module_version: Option<u64>,
    pub module_context: Option<String>,
    pub verify_checksums: bool,
}

/// Fully resolved configuration of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub repo_path: PathBuf,
    pub output: PathBuf,
    pub identity: ModuleIdentity,
    pub verify_checksums: bool,
    pub log_level: LogLevel,
}

impl RunConfig {
    /// Merge command line values over file values over defaults
    pub fn resolve(
        repo_path: PathBuf,
        output: PathBuf,
        overrides: Overrides,
        file: FileConfig,
        log_level: LogLevel,
    ) -> Result<Self> {
        let name = match overrides.module_name.or(file.module.name) {
            Some(name) => name,
            None => default_module_name()?,
        };

        let identity = ModuleIdentity {
            name,
            stream: overrides
                .module_stream
                .or(file.module.stream)
                .unwrap_or_else(|| DEFAULT_STREAM.to_string()),
            version: overrides
                .module_version
                .or(file.module.version)
                .unwrap_or(DEFAULT_VERSION),
            context: overrides
                .module_context
                .or(file.module.context)
                .unwrap_or_else(|| DEFAULT_CONTEXT.to_string()),
        };

        Ok(Self {
            repo_path,
            output,
            identity,
            verify_checksums: overrides.verify_checksums
                || file.repository.verify_checksums.unwrap_or(false),
            log_level,
        })
    }
}

/// Base name of the current working directory
///
/// `$PWD` is preferred so a directory reached through a symlink keeps the
/// name the user sees.
pub fn default_module_name() -> Result<String> {
    let cwd = std::env::var_os("PWD")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| std::env::current_dir().ok())
        .ok_or_else(|| Error::Config("cannot determine the current directory".to_string()))?;

    cwd.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            Error::Config(format!(
                "cannot derive a module name from {}; pass --module-name",
                cwd.display()
            ))
        })
}
