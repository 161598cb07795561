//! Syft Datasets CLI
//!
//! Command-line interface for browsing datasets in the SyftBox ecosystem.

use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;

use syft_datasets_core::{tags, DatasetCollection};
use syft_datasets_source::{source_from_kind, SourceKind, CONFIG_PATH_ENV};

#[derive(Parser)]
#[command(name = "syft-datasets")]
#[command(version, about = "Browse datasets in the SyftBox ecosystem", long_about = None)]
struct Cli {
    /// Where datasets come from: `live` (SyftBox) or `demo` (fixture data)
    #[arg(short, long, default_value = "live", global = true)]
    source: SourceKind,

    /// Path to the SyftBox client config
    #[arg(long, env = CONFIG_PATH_ENV, value_name = "FILE", global = true)]
    config_path: Option<PathBuf>,

    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all datasets
    List {
        /// Show detailed information
        #[arg(short = 'v', long)]
        verbose: bool,
    },

    /// Search datasets by keyword in name or owner email
    Search {
        /// Case-sensitive substring to look for
        keyword: String,
    },

    /// Filter datasets by owner email
    Filter {
        /// Case-sensitive substring of the owner email
        email_pattern: String,
    },

    /// List unique owner emails
    Emails,

    /// List unique dataset names
    Names,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let source = source_from_kind(cli.source, cli.config_path)?;
    if source.kind() == SourceKind::Demo {
        eprintln!("Note: showing demo fixture data");
    }
    let collection = source.load().await?;

    let output = match cli.command {
        Commands::List { verbose } => render_datasets(&collection, verbose, cli.json)?,
        Commands::Search { keyword } => {
            render_datasets(&collection.search(&keyword), false, cli.json)?
        }
        Commands::Filter { email_pattern } => {
            render_datasets(&collection.filter_by_email(&email_pattern), false, cli.json)?
        }
        Commands::Emails => render_values(&collection.list_unique_emails(), cli.json)?,
        Commands::Names => render_values(&collection.list_unique_names(), cli.json)?,
    };

    print!("{}", output);
    Ok(())
}

fn render_datasets(
    collection: &DatasetCollection,
    verbose: bool,
    json: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    if json {
        return Ok(serde_json::to_string_pretty(collection.records())? + "\n");
    }

    let mut out = String::new();
    writeln!(out, "Datasets ({}):", collection.len())?;
    writeln!(out)?;

    for dataset in collection {
        if verbose {
            writeln!(out, "  Name: {}", dataset.name)?;
            writeln!(out, "  Owner: {}", dataset.owner_email)?;
            writeln!(out, "  URL: {}", dataset.location())?;
            let tags = tags::dataset_tags(&dataset.owner_email, &dataset.name);
            if !tags.is_empty() {
                writeln!(out, "  Tags: {}", tags.join(", "))?;
            }
            writeln!(out)?;
        } else {
            writeln!(out, "  {} ({})", dataset.name, dataset.owner_email)?;
        }
    }

    if collection.is_empty() {
        writeln!(out, "  No datasets found")?;
    }

    Ok(out)
}

fn render_values(values: &[String], json: bool) -> Result<String, Box<dyn std::error::Error>> {
    if json {
        return Ok(serde_json::to_string_pretty(values)? + "\n");
    }
    Ok(values.iter().map(|v| format!("{}\n", v)).collect())
}
