//! `tl2swift`: generate Swift TDLib client sources from a TL schema

mod logging;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tl2swift_codegen::generators::GeneratorConfig;
use tl2swift_codegen::{generate_swift_from_file, write_schema_ir};

#[derive(Parser, Debug)]
#[command(
    name = "tl2swift",
    version,
    about = "Generate Swift TDLib client sources from a TL schema (td_api.tl)"
)]
struct Cli {
    /// TL schema file, usually td_api.tl
    schema: Option<PathBuf>,

    /// Directory the Swift sources are written to
    #[arg(default_value = ".")]
    output_dir: PathBuf,

    /// Skip the async/await API class (AsyncTdApi.swift)
    #[arg(long)]
    no_async_api: bool,

    /// Skip the completion-handler API class (TdApi.swift)
    #[arg(long)]
    no_callback_api: bool,

    /// Omit documentation comments from the generated code
    #[arg(long)]
    no_docs: bool,

    /// Also write the parsed schema as schema.json
    #[arg(long)]
    emit_ir: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log as JSON lines instead of human readable text
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            generate_docs: !self.no_docs,
            callback_api: !self.no_callback_api,
            async_api: !self.no_async_api,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(schema_path) = cli.schema.as_deref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    logging::init_logging(cli.verbose, cli.log_json);

    let report = generate_swift_from_file(schema_path, &cli.output_dir, cli.generator_config())
        .with_context(|| format!("generating Swift sources from {}", schema_path.display()))?;

    if cli.emit_ir {
        write_schema_ir(&report.schema, &cli.output_dir).context("writing schema IR")?;
    }

    tracing::info!(
        files = report.files,
        output_dir = %cli.output_dir.display(),
        "generation finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_map_to_config() {
        let cli = Cli::parse_from(["tl2swift", "td_api.tl", "--no-async-api", "--no-docs"]);
        let config = cli.generator_config();
        assert!(!config.async_api);
        assert!(config.callback_api);
        assert!(!config.generate_docs);
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_repeated_verbose() {
        let cli = Cli::parse_from(["tl2swift", "-vvv", "td_api.tl", "Out"]);
        assert_eq!(cli.verbose, 3);
        assert_eq!(cli.output_dir, PathBuf::from("Out"));
    }
}
