// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Mirrors the derive definition in src/cli.rs for man page generation
fn build_cli() -> Command {
    Command::new("repo2module")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate a modulemd document describing an RPM repository")
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .arg(
            Arg::new("nodebug")
                .long("nodebug")
                .action(ArgAction::SetTrue)
                .help("Disable debug logging (default)"),
        )
        .arg(
            Arg::new("module_name")
                .short('n')
                .long("module-name")
                .help("Module name [default: current directory name]"),
        )
        .arg(
            Arg::new("module_stream")
                .short('s')
                .long("module-stream")
                .help("Module stream [default: rolling]"),
        )
        .arg(
            Arg::new("module_version")
                .short('v')
                .long("module-version")
                .help("Module version [default: 1]"),
        )
        .arg(
            Arg::new("module_context")
                .short('c')
                .long("module-context")
                .help("Module context [default: abcdef12]"),
        )
        .arg(
            Arg::new("verify_checksums")
                .long("verify-checksums")
                .action(ArgAction::SetTrue)
                .help("Verify the primary catalog against the checksum in repomd.xml"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Read defaults from a TOML config file"),
        )
        .arg(
            Arg::new("repo_path")
                .required(true)
                .help("Path to the repository (the directory containing repodata/)"),
        )
        .arg(
            Arg::new("modules_yaml")
                .default_value("modules.yaml")
                .help("Where to write the module document"),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let mut buffer = Vec::new();
    if let Err(e) = Man::new(build_cli()).render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("repo2module.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
