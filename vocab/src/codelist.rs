//! Codelist loading: CSV rows to an ordered `code → (title, description)` map.

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::iris::is_forbidden_in_iri;

/// Title and description of a single code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeInfo {
    /// Human-readable title (becomes `rdfs:label`).
    pub title: String,
    /// Longer description (becomes `rdfs:comment`).
    pub description: String,
}

/// An ordered mapping of codes to their title and description.
///
/// Codes keep the position of their first appearance. A code that appears
/// again takes the later row's title and description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codelist {
    name: String,
    codes: IndexMap<String, CodeInfo>,
}

/// Failure to parse a codelist file.
#[derive(Debug, Error)]
pub enum CodelistError {
    /// The CSV could not be read or lacks a required column.
    #[error("codelist {name}: {source}")]
    Csv {
        /// Codelist file name.
        name: String,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
    /// A code cannot become part of a term IRI.
    #[error(
        "codelist {name}: code {code:?} contains a character not allowed in an IRI"
    )]
    InvalidCode {
        /// Codelist file name.
        name: String,
        /// The offending code.
        code: String,
    },
    /// The named codelist was not loaded.
    #[error("codelist {0} was not loaded")]
    Missing(String),
}

#[derive(Debug, Deserialize)]
struct Row {
    code: String,
    title: String,
    description: String,
}

impl Codelist {
    /// Parses CSV text with at least `code`, `title` and `description` columns.
    ///
    /// # Errors
    ///
    /// Returns [`CodelistError::Csv`] if the text is not valid CSV or a required
    /// column is missing, and [`CodelistError::InvalidCode`] for a code with
    /// whitespace or another character that cannot appear in an IRI.
    pub fn parse(name: &str, text: &str) -> Result<Self, CodelistError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());
        let mut codes = IndexMap::new();
        for row in reader.deserialize::<Row>() {
            let row = row.map_err(|source| CodelistError::Csv {
                name: name.to_string(),
                source,
            })?;
            if row.code.is_empty() {
                continue;
            }
            if row.code.chars().any(is_forbidden_in_iri) {
                return Err(CodelistError::InvalidCode {
                    name: name.to_string(),
                    code: row.code,
                });
            }
            let info = CodeInfo {
                title: row.title,
                description: row.description,
            };
            if codes.insert(row.code.clone(), info).is_some() {
                warn!(codelist = name, code = %row.code, "duplicate code; last row wins");
            }
        }
        Ok(Self {
            name: name.to_string(),
            codes,
        })
    }

    /// The file name this codelist was loaded from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CodeInfo> {
        self.codes.get(code)
    }

    /// Iterates codes in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CodeInfo)> {
        self.codes.iter().map(|(code, info)| (code.as_str(), info))
    }

    /// Number of distinct codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if the codelist has no codes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// All codelists of a build, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct Codelists {
    lists: IndexMap<String, Codelist>,
}

impl Codelists {
    /// Parses every `(file name, CSV text)` pair.
    ///
    /// # Errors
    ///
    /// Returns the first [`CodelistError`] encountered.
    pub fn parse<'a>(
        files: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, CodelistError> {
        let mut lists = IndexMap::new();
        for (name, text) in files {
            lists.insert(name.to_string(), Codelist::parse(name, text)?);
        }
        Ok(Self { lists })
    }

    /// Returns the named codelist.
    ///
    /// # Errors
    ///
    /// Returns [`CodelistError::Missing`] if no codelist of that name was loaded.
    pub fn get(&self, name: &str) -> Result<&Codelist, CodelistError> {
        self.lists
            .get(name)
            .ok_or_else(|| CodelistError::Missing(name.to_string()))
    }

    /// Number of loaded codelists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns true if no codelist was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

/// Converts a code to a node name by upper-casing its first character only.
#[must_use]
pub fn cap_first(code: &str) -> String {
    let mut chars = code.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
