//! Beneficial Ownership Data Standard vocabulary derived from its JSON Schema.
//!
//! The `bods-vocab` crate reads the BODS v0.4 schema documents and CSV
//! codelists, applies a fixed set of mapping rules (exclusions, renames,
//! semantic ranges) and produces an RDFS/OWL vocabulary graph in the
//! `https://standard.openownership.org/terms#` namespace, with serializers
//! for Turtle and N-Triples.
//!
//! # Entry Point
//!
//! ```no_run
//! use bods_vocab::{build_vocabulary, fetch_sources, VocabConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let files = fetch_sources(std::path::Path::new("schemas"), false)?;
//! let config = VocabConfig::default();
//! let graph = build_vocabulary(&files.registry()?, &files.codelists()?, &config)?;
//! let turtle = bods_vocab::serializer::turtle::to_turtle(&graph);
//! # let _ = turtle;
//! # Ok(())
//! # }
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod builder;
pub mod codelist;
pub mod config;
pub mod graph;
pub mod iris;
pub mod rules;
pub mod schema;
pub mod serializer;
pub mod source;

pub use builder::{BuildError, BuildPlan, MappingStep, OntologyMetadata, PlanError, VocabBuilder};
pub use codelist::{CodeInfo, Codelist, CodelistError, Codelists};
pub use config::{ConfigError, VocabConfig};
pub use graph::{Graph, Term, Triple};
pub use rules::{MappingRules, RulesError, SemanticRange};
pub use schema::{PrimitiveType, SchemaRegistry};
pub use source::{fetch_sources, SourceCache, SourceError, SourceFiles};

/// Builds the vocabulary for `config` from already loaded sources.
///
/// # Errors
///
/// Returns [`BuildError`] if the rules are invalid or an enabled step needs
/// a codelist that was not loaded.
pub fn build_vocabulary(
    registry: &SchemaRegistry,
    codelists: &Codelists,
    config: &VocabConfig,
) -> Result<Graph, BuildError> {
    VocabBuilder::new(registry, codelists, &config.rules)?
        .metadata(config.metadata.clone())
        .build(&config.plan())
}
