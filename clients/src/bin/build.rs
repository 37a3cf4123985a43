//! `bods-build` — Derives the BODS vocabulary from the published schema and
//! codelists and writes the artifacts to the output directory.
//!
//! **Outputs:**
//! - `<out>/bods-vocabulary-0.4.0.ttl` — Turtle 1.1 (name configurable)
//! - `<out>/bods-vocabulary-0.4.0.nt` — N-Triples
//! - `<out>/bodsvocab.html` — documentation page, unless `--no-docs`
//!
//! **Usage:**
//! ```text
//! bods-build [--cache <dir>] [--overwrite] [--out <dir>] [--config <file>]
//!            [--step <name>]... [--docs <file>] [--no-docs] [-v]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bods_vocab::serializer::{ntriples, turtle};
use bods_vocab::{build_vocabulary, fetch_sources, BuildPlan, MappingStep, VocabConfig};
use clap::Parser;
use tracing::info;

/// Build the BODS RDF vocabulary.
#[derive(Parser)]
#[command(name = "bods-build", about = "Build the BODS RDF/OWL vocabulary")]
struct Args {
    /// Directory holding cached schema and codelist files.
    #[arg(long, default_value = "schemas")]
    cache: PathBuf,

    /// Re-download every source file even if it is cached.
    #[arg(long)]
    overwrite: bool,

    /// Output directory for generated artifacts.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// TOML file overriding the built-in mapping configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Build only this mapping step and its dependencies (repeatable).
    #[arg(long = "step", value_name = "NAME")]
    steps: Vec<String>,

    /// File name of the documentation page, relative to `--out`.
    #[arg(long, default_value = bods_docs::DEFAULT_OUTPUT)]
    docs: PathBuf,

    /// Skip rendering the documentation page.
    #[arg(long)]
    no_docs: bool,

    /// Log more detail (repeat for trace output).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    bods_clients::init_logging(args.verbose)?;

    let mut config = match &args.config {
        Some(path) => VocabConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => VocabConfig::default(),
    };
    if !args.steps.is_empty() {
        let selected = BuildPlan::from_names(&args.steps).context("Invalid --step")?;
        config.steps = selected.steps().to_vec();
    }

    // every source must load before anything is written
    let files = fetch_sources(&args.cache, args.overwrite).with_context(|| {
        format!("Failed to load sources through {}", args.cache.display())
    })?;
    let registry = files.registry().context("Failed to parse schemas")?;
    let codelists = files.codelists().context("Failed to parse codelists")?;
    info!(
        schemas = registry.len(),
        codelists = codelists.len(),
        "sources loaded"
    );

    let plan = config.plan();
    let graph = build_vocabulary(&registry, &codelists, &config)
        .context("Failed to build vocabulary")?;

    let out = &args.out;
    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;

    println!(
        "BODS vocabulary: {} triples from {} of {} mapping steps",
        graph.len(),
        plan.steps().len(),
        MappingStep::ALL.len()
    );

    // Turtle
    let ttl_path = out.join(&config.output);
    fs::write(&ttl_path, turtle::to_turtle(&graph))
        .with_context(|| format!("Failed to write {}", ttl_path.display()))?;
    println!("  Written: {}", ttl_path.display());

    // N-Triples
    let nt_path = ttl_path.with_extension("nt");
    fs::write(&nt_path, ntriples::to_ntriples(&graph))
        .with_context(|| format!("Failed to write {}", nt_path.display()))?;
    println!("  Written: {}", nt_path.display());

    if !args.no_docs {
        let docs_path = out.join(&args.docs);
        let index = bods_docs::generate(&ttl_path, &docs_path)
            .with_context(|| format!("Failed to render {}", docs_path.display()))?;
        println!(
            "  Written: {} ({} classes, {} properties, {} individuals)",
            docs_path.display(),
            index.classes.len(),
            index.properties.len(),
            index.individuals.len()
        );
    }

    println!("Build complete.");
    Ok(())
}
