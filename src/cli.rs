// src/cli.rs
//! CLI definitions for repo2module
//!
//! The command implementation lives in the `commands` module.

use clap::Parser;
use repo2module::config::{DEFAULT_OUTPUT, LogLevel, Overrides};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "repo2module")]
#[command(version)]
#[command(about = "Generate a modulemd document describing an RPM repository", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, overrides_with = "nodebug")]
    pub debug: bool,

    /// Disable debug logging (default)
    #[arg(long, overrides_with = "debug")]
    pub nodebug: bool,

    /// Module name [default: current directory name]
    #[arg(short = 'n', long)]
    pub module_name: Option<String>,

    /// Module stream [default: rolling]
    #[arg(short = 's', long)]
    pub module_stream: Option<String>,

    /// Module version [default: 1]
    #[arg(short = 'v', long)]
    pub module_version: Option<u64>,

    /// Module context [default: abcdef12]
    #[arg(short = 'c', long)]
    pub module_context: Option<String>,

    /// Verify the primary catalog against the checksum in repomd.xml
    #[arg(long)]
    pub verify_checksums: bool,

    /// Read defaults from a TOML config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the repository (the directory containing repodata/)
    #[arg(value_parser = existing_path)]
    pub repo_path: PathBuf,

    /// Where to write the module document
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub modules_yaml: PathBuf,
}

impl Cli {
    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_debug_flag(self.debug && !self.nodebug)
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            module_name: self.module_name.clone(),
            module_stream: self.module_stream.clone(),
            module_version: self.module_version,
            module_context: self.module_context.clone(),
            verify_checksums: self.verify_checksums,
        }
    }
}

fn existing_path(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("path '{}' does not exist", s))
    }
}
