//! Schema Export CLI
//!
//! Dumps record schemas as JSON Schema documents for the database viewer.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use storefront_schemas::{export, RecordKind, SchemaRegistry};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-export")]
#[command(about = "Export storefront record schemas as JSON Schema")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one kind's JSON Schema to stdout
    Show {
        /// Record kind (e.g. "user", "product", "order")
        kind: String,
    },

    /// Print the full schema manifest to stdout
    Manifest,

    /// Write every schema plus a manifest to a directory
    Dir {
        /// Output directory
        output: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();

    match cli.command {
        Commands::Show { kind } => {
            let kind = RecordKind::from_name(&kind)
                .with_context(|| format!("unknown record kind: {}", kind))?;
            let schema = registry.json_schema(kind);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }

        Commands::Manifest => {
            println!("{}", serde_json::to_string_pretty(&registry.describe())?);
            Ok(())
        }

        Commands::Dir { output } => {
            export::export_to_dir(&registry, &output)
                .with_context(|| format!("failed to export schemas to {:?}", output))?;
            println!("✅ Schemas exported to {:?}", output);
            Ok(())
        }
    }
}
