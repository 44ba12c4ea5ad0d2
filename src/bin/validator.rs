//! Record Validator CLI
//!
//! Validates JSON records against the registered schemas.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use storefront_schemas::{RecordKind, SchemaRegistry};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-validator")]
#[command(about = "Validate storefront records against their schemas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a record (or an array of records) from a JSON file
    Record {
        /// Record kind (e.g. "user", "product", "order")
        #[arg(short, long)]
        kind: String,

        /// Path to the JSON file
        file: PathBuf,

        /// Emit violations as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List all record kinds
    Kinds,
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
        Commands::Record { kind, file, json } => {
            let kind = RecordKind::from_name(&kind)
                .with_context(|| format!("unknown record kind: {}", kind))?;

            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {:?}", file))?;
            let raw: Value = serde_json::from_str(&content)
                .with_context(|| format!("{:?} is not valid JSON", file))?;

            // A top-level array is treated as a batch of records
            let records: Vec<Value> = match raw {
                Value::Array(items) => items,
                single => vec![single],
            };

            let mut reports = Vec::new();
            let mut invalid = 0usize;

            for (index, record) in records.iter().enumerate() {
                match registry.normalize(kind, record) {
                    Ok(_) => {
                        if !json {
                            println!("✅ record {} - valid {}", index, kind);
                        }
                        reports.push(json!({ "record": index, "valid": true }));
                    }
                    Err(err) => {
                        invalid += 1;
                        if !json {
                            println!("❌ record {} - {}", index, err);
                        }
                        reports.push(json!({
                            "record": index,
                            "valid": false,
                            "violations": err.violations,
                        }));
                    }
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                println!();
                if invalid == 0 {
                    println!("✅ {} record(s) valid", records.len());
                } else {
                    println!("❌ {} of {} record(s) invalid", invalid, records.len());
                }
            }

            if invalid > 0 {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Kinds => {
            for schema in registry.schemas() {
                let storage = match schema.kind.collection() {
                    Some(collection) => format!("collection \"{}\"", collection),
                    None => "embedded".to_string(),
                };
                println!(
                    "{:<14} {:<22} {} fields",
                    schema.kind.name(),
                    storage,
                    schema.fields.len()
                );
            }
            Ok(())
        }
    }
}
