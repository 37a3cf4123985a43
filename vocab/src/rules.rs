//! Mapping rules: which schema properties are dropped, which are renamed, and
//! which string-typed properties get a semantic range.
//!
//! Precedence is fixed: an excluded property never reaches renaming or
//! range inference, even if it is also listed in the rename tables.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::iris;
use crate::schema::PrimitiveType;

/// Range assigned to a string-typed property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticRange {
    /// `xsd:dateTime`.
    DateTime,
    /// `rdfs:Resource`.
    Uri,
    /// `bods:Name`.
    Name,
    /// `rdfs:Literal`, the fallback for any other string.
    Text,
}

impl SemanticRange {
    /// The range IRI asserted for this semantic type.
    #[must_use]
    pub fn iri(self) -> String {
        match self {
            SemanticRange::DateTime => iris::XSD_DATETIME.to_string(),
            SemanticRange::Uri => iris::RDFS_RESOURCE.to_string(),
            SemanticRange::Name => iris::bods("Name"),
            SemanticRange::Text => iris::RDFS_LITERAL.to_string(),
        }
    }
}

/// A configuration problem detected by [`MappingRules::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    /// Renamed properties without an override that do not end in `s`.
    #[error(
        "rename fallback would strip a meaningful character from {0:?}; add explicit overrides"
    )]
    UnsafeRenameFallback(Vec<String>),
    /// A property listed in more than one semantic range set.
    #[error("property {name:?} is listed as both {first} and {second}")]
    OverlappingRanges {
        /// Property name.
        name: String,
        /// First set it appears in.
        first: &'static str,
        /// Second set it appears in.
        second: &'static str,
    },
}

/// The property mapping configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingRules {
    /// Properties that never reach the vocabulary.
    pub exclude: IndexSet<String>,
    /// Properties renamed by the plural fallback (strip one trailing `s`)
    /// unless `rename_map` has an entry for them.
    pub rename: IndexSet<String>,
    /// Explicit renames. Keys are implicitly part of the rename set.
    pub rename_map: IndexMap<String, String>,
    /// String properties ranged as `xsd:dateTime`.
    pub date_props: IndexSet<String>,
    /// String properties ranged as `rdfs:Resource`.
    pub uri_props: IndexSet<String>,
    /// String properties ranged as `bods:Name`.
    pub name_props: IndexSet<String>,
}

impl MappingRules {
    /// Creates an empty rule set: nothing excluded, nothing renamed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The rules used to publish the BODS v0.4 vocabulary.
    #[must_use]
    pub fn bods() -> Self {
        Self::new()
            .exclude_properties([
                "statementId",
                "publicationDetails",
                "declarationSubject",
                "declaration",
                "recordId",
                "recordType",
                "recordStatus",
                "isComponent",
                "type",
                "unspecifiedEntityDetails",
                "publicListing",
                "unspecifiedPersonDetails",
                "componentRecords",
                "share",
                "security",
            ])
            .rename_properties(
                [
                    "annotations",
                    "alternateNames",
                    "identifiers",
                    "names",
                    "securitiesListings",
                    "companyFilingsURLs",
                    "interests",
                ],
                [
                    ("addresses", "address"),
                    ("formedByStatute", "formedByStatuteName"),
                    ("nationalities", "nationality"),
                    ("taxResidencies", "taxResidency"),
                    ("reason", "unspecifiedReason"),
                    ("description", "unspecifiedDescription"),
                    ("minimum", "shareMinimum"),
                    ("maximum", "shareMaximum"),
                    ("exact", "shareExact"),
                    ("exclusiveMinimum", "shareExclusiveMinimum"),
                    ("exclusiveMaximum", "shareExclusiveMaximum"),
                    ("address", "streetAddress"),
                    ("id", "idString"),
                ],
            )
            .property_ranges(
                [
                    "statementDate",
                    "publicationDate",
                    "dissolutionDate",
                    "formedByStatuteDate",
                    "foundingDate",
                    "birthDate",
                    "deathDate",
                    "startDate",
                    "endDate",
                ],
                ["uri", "companyFilingsURL"],
                ["name", "alternateName"],
            )
    }

    /// Adds properties to the exclusion set.
    #[must_use]
    pub fn exclude_properties<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.exclude.extend(names.into_iter().map(str::to_string));
        self
    }

    /// Adds properties to the rename set, with explicit overrides.
    #[must_use]
    pub fn rename_properties<'a>(
        mut self,
        names: impl IntoIterator<Item = &'a str>,
        overrides: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        self.rename.extend(names.into_iter().map(str::to_string));
        self.rename_map.extend(
            overrides
                .into_iter()
                .map(|(from, to)| (from.to_string(), to.to_string())),
        );
        self
    }

    /// Adds properties to the date, URI and name range sets.
    #[must_use]
    pub fn property_ranges<'a>(
        mut self,
        date_props: impl IntoIterator<Item = &'a str>,
        uri_props: impl IntoIterator<Item = &'a str>,
        name_props: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.date_props
            .extend(date_props.into_iter().map(str::to_string));
        self.uri_props
            .extend(uri_props.into_iter().map(str::to_string));
        self.name_props
            .extend(name_props.into_iter().map(str::to_string));
        self
    }

    /// Checks the rules for configurations that would silently produce wrong names.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::UnsafeRenameFallback`] if a renamed property has no
    /// override and does not end in `s`, or [`RulesError::OverlappingRanges`]
    /// if a property sits in two semantic range sets.
    pub fn validate(&self) -> Result<(), RulesError> {
        let unsafe_names: Vec<String> = self
            .rename
            .iter()
            .filter(|name| !self.rename_map.contains_key(*name))
            .filter(|name| !name.ends_with('s'))
            .cloned()
            .collect();
        if !unsafe_names.is_empty() {
            return Err(RulesError::UnsafeRenameFallback(unsafe_names));
        }

        let sets = [
            ("date", &self.date_props),
            ("uri", &self.uri_props),
            ("name", &self.name_props),
        ];
        for (i, (first, a)) in sets.iter().enumerate() {
            for (second, b) in &sets[i + 1..] {
                if let Some(name) = a.iter().find(|name| b.contains(*name)) {
                    return Err(RulesError::OverlappingRanges {
                        name: name.clone(),
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns true if the property is dropped from the vocabulary.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.contains(name)
    }

    /// Returns the vocabulary name for a schema property.
    ///
    /// Explicit overrides win; otherwise a name in the rename set loses its
    /// last character; any other name is returned unchanged.
    #[must_use]
    pub fn rename(&self, name: &str) -> String {
        if let Some(target) = self.rename_map.get(name) {
            return target.clone();
        }
        if self.rename.contains(name) {
            let mut chars = name.chars();
            chars.next_back();
            return chars.as_str().to_string();
        }
        name.to_string()
    }

    /// Infers a range for a property from its name and schema type.
    ///
    /// Only string-typed properties get a range; other types are ranged by
    /// the mapping routines themselves.
    #[must_use]
    pub fn infer_range(&self, name: &str, ty: Option<PrimitiveType>) -> Option<SemanticRange> {
        if ty != Some(PrimitiveType::String) {
            return None;
        }
        Some(if self.date_props.contains(name) {
            SemanticRange::DateTime
        } else if self.uri_props.contains(name) {
            SemanticRange::Uri
        } else if self.name_props.contains(name) {
            SemanticRange::Name
        } else {
            SemanticRange::Text
        })
    }
}
