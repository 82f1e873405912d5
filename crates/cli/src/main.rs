//! Souq CLI - Inspect datasets through the admin table engine.
//!
//! # Usage
//!
//! ```bash
//! # Render a dataset, sorted by price, highest first
//! souq-cli table products.yaml --sort price --desc
//!
//! # Search everywhere, then narrow one column
//! souq-cli table orders.json --search riyadh --filter status=paid
//!
//! # Exact match on a picked value, Arabic headers, second page of 10
//! souq-cli table products.yaml --pick status=active --locale ar --page 2 --per-page 10
//!
//! # Distinct values of a column
//! souq-cli values products.yaml category
//! ```
//!
//! # Commands
//!
//! - `table` - Search, filter, sort, and print a dataset
//! - `values` - List a column's distinct values

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod dataset;

#[derive(Parser)]
#[command(name = "souq-cli")]
#[command(author, version, about = "Souq CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a dataset as a table
    Table(commands::table::TableArgs),
    /// List the distinct values of a column
    Values {
        /// YAML or JSON file holding a list of rows
        file: PathBuf,

        /// Column key
        column: String,

        /// Name of the list to read when the file holds several
        #[arg(short, long)]
        table: Option<String>,
    },
}

fn main() {
    // Initialize tracing; output goes to stderr so tables stay pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "souq_cli=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Table(args) => commands::table::run(&args)?,
        Commands::Values {
            file,
            column,
            table,
        } => commands::values::run(&file, &column, table.as_deref())?,
    }
    Ok(())
}
