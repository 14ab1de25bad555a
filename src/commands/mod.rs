// src/commands/mod.rs
//! Command handlers for the repo2module CLI

mod generate;

pub use generate::cmd_generate;
