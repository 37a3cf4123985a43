//! BODS vocabulary documentation generator.
//!
//! Reads the vocabulary Turtle file, indexes its classes, properties and
//! named individuals, and renders them as a single self-contained HTML page
//! with an inventory, a table of contents and one anchored section per term.
//! Comments are Markdown (they come from schema descriptions).
//!
//! # Entry Points
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn main() -> Result<(), bods_docs::DocsError> {
//! let index = bods_docs::generate(
//!     Path::new("bods-vocabulary-0.4.0.ttl"),
//!     Path::new("bodsvocab.html"),
//! )?;
//! println!("{} classes documented", index.classes.len());
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

pub mod extractor;
pub mod linker;
pub mod renderer;
pub mod writer;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use extractor::OntologyIndex;

/// Default file name of the rendered page.
pub const DEFAULT_OUTPUT: &str = "bodsvocab.html";

/// Failure to produce the documentation page.
#[derive(Debug, Error)]
pub enum DocsError {
    /// The input is not valid Turtle.
    #[error("invalid Turtle: {0}")]
    Parse(String),
    /// Reading the input or writing the page failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Renders Turtle text to a complete HTML page.
///
/// # Errors
///
/// Returns [`DocsError::Parse`] if the text is not valid Turtle.
pub fn render(turtle: &str) -> Result<String, DocsError> {
    let graph = extractor::parse_turtle(turtle)?;
    let index = OntologyIndex::from_graph(&graph);
    Ok(renderer::render_vocabulary(&index))
}

/// Reads the Turtle file at `input`, renders it, and writes the page to `output`.
///
/// Returns the index of the documented terms.
///
/// # Errors
///
/// Returns [`DocsError::Io`] if the input cannot be read or the page cannot be
/// written, and [`DocsError::Parse`] for invalid Turtle.
pub fn generate(input: &Path, output: &Path) -> Result<OntologyIndex, DocsError> {
    let turtle = std::fs::read_to_string(input).map_err(|source| DocsError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    let graph = extractor::parse_turtle(&turtle)?;
    let index = OntologyIndex::from_graph(&graph);
    let page = renderer::render_vocabulary(&index);
    writer::write_html(output, &page)?;
    info!(
        path = %output.display(),
        classes = index.classes.len(),
        properties = index.properties.len(),
        individuals = index.individuals.len(),
        "documentation written"
    );
    Ok(index)
}
