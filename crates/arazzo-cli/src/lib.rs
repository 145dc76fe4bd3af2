mod cli;
mod config;
mod io;
mod run;

pub use cli::{Cli, Commands, OutputFormat, ValidateCommand};
pub use config::{load_cli_config, validate_cli_config, CliConfig, CliConfigError, CLI_CONFIG_SCHEMA};
pub use io::{collect_document_paths, format_for_path, read_document, ReadDocumentError};
pub use run::{execute_validate, render_text, CliError, FileReport, ValidateOutcome, REPORT_SCHEMA};
