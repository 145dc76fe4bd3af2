use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "arazzo-validate")]
#[command(about = "Validate Arazzo workflow descriptions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Validate documents; directories are searched for .json, .yaml and .yml files.
    Validate(ValidateCommand),
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ValidateCommand {
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Print the SHA-256 fingerprint of each valid document.
    #[arg(long, default_value_t = false)]
    pub fingerprint: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
