//! template-catalog - scan built project templates and emit a JSON catalog.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use template_catalog::catalog::{CatalogPipeline, Vocabulary, DEFAULT_EXCLUDED_DIRS};
use template_catalog::{CatalogWriter, JsonFileWriter};

/// Generate the template catalog
#[derive(Debug, Parser)]
#[command(name = "template-catalog", version, about)]
struct Cli {
    /// Directory to scan for templates
    #[arg(short, long, env = "TEMPLATE_CATALOG_DIRECTORY", default_value = "./build")]
    directory: PathBuf,

    /// Output JSON file
    #[arg(
        short,
        long,
        env = "TEMPLATE_CATALOG_OUTPUT",
        default_value = "template_catalog.json"
    )]
    output: PathBuf,

    /// Directory holding <template>/metadata.json definitions
    #[arg(long, env = "TEMPLATE_CATALOG_DEFINITIONS", default_value = "definitions")]
    definitions: PathBuf,

    /// JSON file replacing the built-in framework vocabulary
    #[arg(long, env = "TEMPLATE_CATALOG_VOCABULARY")]
    vocabulary: Option<PathBuf>,

    /// Directory name to skip while scanning (repeatable)
    #[arg(long = "exclude", value_name = "NAME")]
    exclude: Vec<String>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Print the built-in framework vocabulary as JSON and exit
    #[arg(long)]
    dump_vocabulary: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.dump_vocabulary {
        let categories = Vocabulary::builtin_categories();
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    info!("Starting template catalog generation...");

    let scan_dir = std::path::absolute(&cli.directory)
        .with_context(|| format!("Invalid scan directory {}", cli.directory.display()))?;
    info!("Scanning directory: {}", scan_dir.display());

    let vocabulary = match &cli.vocabulary {
        Some(path) => Vocabulary::from_file(path)?,
        None => Vocabulary::builtin(),
    };
    let excluded = if cli.exclude.is_empty() {
        DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect()
    } else {
        cli.exclude
    };
    let pipeline = CatalogPipeline::new(cli.definitions)
        .with_vocabulary(vocabulary)
        .with_excluded_dirs(excluded);

    let result = tokio::task::spawn_blocking(move || pipeline.build(&scan_dir))
        .await
        .context("Catalog scan task failed")??;

    let writer = JsonFileWriter::new(&cli.output).with_pretty(cli.pretty);
    writer.write(&result.templates).await?;

    info!("Template catalog generation complete!");
    info!("Found {} valid templates", result.stats.accepted);
    info!("Skipped {} invalid directories", result.stats.rejected);
    if !result.warnings.is_empty() {
        warn!("{} warnings raised during generation:", result.warnings.len());
        for warning in &result.warnings {
            warn!("  {}", warning);
        }
    }
    info!("Output saved to: {}", writer.destination());
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the flag-derived level.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
