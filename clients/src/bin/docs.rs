//! `bods-docs` — Renders a vocabulary Turtle file as an HTML page.
//!
//! **Usage:**
//! ```text
//! bods-docs [--input <file>] [--out <file>] [-v]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use bods_vocab::config::DEFAULT_OUTPUT;
use clap::Parser;

/// Generate the BODS vocabulary documentation page.
#[derive(Parser)]
#[command(name = "bods-docs", about = "Render the BODS vocabulary as HTML")]
struct Args {
    /// Vocabulary Turtle file.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    input: PathBuf,

    /// HTML file to write.
    #[arg(long, default_value = bods_docs::DEFAULT_OUTPUT)]
    out: PathBuf,

    /// Log more detail (repeat for trace output).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    bods_clients::init_logging(args.verbose)?;

    let index = bods_docs::generate(&args.input, &args.out)
        .with_context(|| format!("Failed to document {}", args.input.display()))?;

    println!("Documentation generated successfully.");
    println!(
        "  {} classes, {} properties, {} individuals",
        index.classes.len(),
        index.properties.len(),
        index.individuals.len()
    );
    println!("  Page: {}", args.out.display());
    Ok(())
}
