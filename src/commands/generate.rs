// src/commands/generate.rs
//! Generate a module document from a repository

use anyhow::{Context, Result};
use repo2module::config::RunConfig;
use repo2module::{XmlCatalogParser, YamlSerializer, build_document, write_document};
use tracing::info;

/// Run the whole pipeline for `config`
pub fn cmd_generate(config: &RunConfig) -> Result<()> {
    let repo_path = std::path::absolute(&config.repo_path)
        .with_context(|| format!("Invalid repository path {}", config.repo_path.display()))?;
    let output = std::path::absolute(&config.output)
        .with_context(|| format!("Invalid output path {}", config.output.display()))?;

    info!(
        "Generating {}:{} from {}",
        config.identity.name,
        config.identity.stream,
        repo_path.display()
    );

    let parser = XmlCatalogParser::new().with_checksum_verification(config.verify_checksums);
    let document = build_document(&repo_path, config.identity.clone(), &parser)?;

    write_document(&output, &document, &YamlSerializer)?;

    info!(
        "Wrote {} components and {} artifacts to {}",
        document.components.len(),
        document.artifacts.len(),
        output.display()
    );
    Ok(())
}
