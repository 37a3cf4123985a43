//! The ontology builder: walks the enabled mapping steps and accumulates the
//! vocabulary graph.
//!
//! A build runs in two passes:
//!
//! 1. Every step in the [`BuildPlan`] runs against the shared mapper, declaring
//!    classes and properties, asserting candidate ranges inferred from the
//!    schema, and registering range overrides.
//! 2. The override pass retracts each superseded range and asserts its
//!    replacement.
//!
//! Because overrides are applied after every step has run, the final graph
//! never depends on which step happened to emit a superseded range first.

mod components;
mod records;
pub mod steps;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::codelist::{cap_first, CodelistError, Codelists};
use crate::graph::{Graph, Term};
use crate::iris::{
    self, bods, OWL_CLASS, OWL_ONTOLOGY, RDFS_COMMENT, RDFS_DOMAIN, RDFS_LABEL, RDFS_LITERAL,
    RDFS_RANGE, RDFS_SUBCLASS_OF, RDF_PROPERTY, RDF_TYPE,
};
use crate::rules::{MappingRules, RulesError};
use crate::schema::{property_pointer, SchemaRegistry};

pub use steps::{BuildPlan, MappingStep, PlanError};

/// A failure that prevents the vocabulary from being built.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The mapping rules are inconsistent.
    #[error(transparent)]
    Rules(#[from] RulesError),
    /// A codelist required by an enabled step is unavailable.
    #[error(transparent)]
    Codelist(#[from] CodelistError),
}

/// Ontology header triples.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OntologyMetadata {
    /// Ontology IRI.
    pub iri: String,
    /// `rdfs:label`.
    pub label: String,
    /// `rdfs:comment`.
    pub comment: String,
}

impl Default for OntologyMetadata {
    fn default() -> Self {
        Self {
            iri: "https://standard.openownership.org/terms".to_string(),
            label: "Beneficial Ownership Data Standard v0.4".to_string(),
            comment: "The RDF vocabulary for the Beneficial Ownership Data Standard v0.4"
                .to_string(),
        }
    }
}

/// Builds the vocabulary graph from a schema registry, codelists and rules.
#[derive(Debug)]
pub struct VocabBuilder<'a> {
    registry: &'a SchemaRegistry,
    codelists: &'a Codelists,
    rules: &'a MappingRules,
    metadata: Option<OntologyMetadata>,
}

impl<'a> VocabBuilder<'a> {
    /// Creates a builder. The rules are validated here so that an invalid
    /// configuration never reaches a build.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Rules`] if [`MappingRules::validate`] fails.
    pub fn new(
        registry: &'a SchemaRegistry,
        codelists: &'a Codelists,
        rules: &'a MappingRules,
    ) -> Result<Self, BuildError> {
        rules.validate()?;
        Ok(Self {
            registry,
            codelists,
            rules,
            metadata: None,
        })
    }

    /// Sets the ontology header.
    #[must_use]
    pub fn metadata(mut self, metadata: OntologyMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Runs every step of `plan` into a fresh graph and applies range overrides.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Codelist`] if an enabled step needs a codelist
    /// that was not loaded.
    pub fn build(&self, plan: &BuildPlan) -> Result<Graph, BuildError> {
        let mut m = Mapper {
            registry: self.registry,
            codelists: self.codelists,
            rules: self.rules,
            graph: Graph::new(),
            overrides: Vec::new(),
        };

        if let Some(meta) = &self.metadata {
            m.graph.add(&meta.iri, RDF_TYPE, Term::iri(OWL_ONTOLOGY));
            m.graph.add(&meta.iri, RDFS_LABEL, Term::literal(&meta.label));
            m.graph.add(&meta.iri, RDFS_COMMENT, Term::literal(&meta.comment));
        }

        for step in plan.steps() {
            let before = m.graph.len();
            step.run(&mut m)?;
            info!(step = %step, triples = m.graph.len() - before, "mapped");
        }

        let graph = m.finish();
        info!(triples = graph.len(), "vocabulary built");
        Ok(graph)
    }
}

/// A range that replaces another on one property.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RangeOverride {
    property: String,
    superseded: String,
    replacement: String,
}

/// Where a manually declared term takes its label or comment from.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Text<'t> {
    /// The `title` (for labels) or `description` (for comments) at a pointer.
    Schema(&'t str),
    /// A hand-written literal.
    Manual(&'t str),
}

/// The graph under construction plus the read-only inputs every step consults.
pub(crate) struct Mapper<'a> {
    registry: &'a SchemaRegistry,
    codelists: &'a Codelists,
    rules: &'a MappingRules,
    graph: Graph,
    overrides: Vec<RangeOverride>,
}

impl Mapper<'_> {
    fn finish(mut self) -> Graph {
        for o in &self.overrides {
            let superseded = Term::iri(&o.superseded);
            if self.graph.remove(&o.property, RDFS_RANGE, &superseded) {
                debug!(property = %o.property, superseded = %o.superseded, "range superseded");
            }
            self.graph
                .add(&o.property, RDFS_RANGE, Term::iri(&o.replacement));
        }
        self.graph
    }

    fn label_text(&self, text: Text<'_>) -> Option<String> {
        match text {
            Text::Schema(pointer) => self.registry.title_of(pointer).map(str::to_string),
            Text::Manual(s) => Some(s.to_string()),
        }
    }

    fn comment_text(&self, text: Text<'_>) -> Option<String> {
        match text {
            Text::Schema(pointer) => self.registry.description_of(pointer).map(str::to_string),
            Text::Manual(s) => Some(s.to_string()),
        }
    }

    fn annotate(&mut self, iri: &str, label: Option<String>, comment: Option<String>) {
        if let Some(label) = label {
            self.graph.add(iri, RDFS_LABEL, Term::literal(label));
        }
        if let Some(comment) = comment {
            self.graph.add(iri, RDFS_COMMENT, Term::literal(comment));
        }
    }

    /// Declares a class, labelled from a schema fragment's title and description.
    pub(crate) fn map_class(&mut self, class: &str, pointer: &str) {
        self.class(class, Text::Schema(pointer), Text::Schema(pointer));
    }

    /// Declares a record class labelled from its record type codelist row.
    /// The schema fragment's title and description are used only when the
    /// codelist has no row for `record_type`.
    pub(crate) fn map_record_class(&mut self, class: &str, pointer: &str, record_type: &str) {
        let row = self
            .codelists
            .get("recordType.csv")
            .ok()
            .and_then(|cl| cl.get(record_type))
            .cloned();
        match row {
            Some(info) => {
                self.graph.add(class, RDF_TYPE, Term::iri(OWL_CLASS));
                self.annotate(class, Some(info.title), Some(info.description));
            }
            None => {
                debug!(class, record_type, "no record type row; using schema title");
                self.map_class(class, pointer);
            }
        }
    }

    /// Declares a class with explicit label and comment sources.
    pub(crate) fn class(&mut self, class: &str, label: Text<'_>, comment: Text<'_>) {
        self.graph.add(class, RDF_TYPE, Term::iri(OWL_CLASS));
        let label = self.label_text(label);
        let comment = self.comment_text(comment);
        self.annotate(class, label, comment);
    }

    /// Asserts `class rdfs:subClassOf parent`.
    pub(crate) fn subclass(&mut self, class: &str, parent: &str) {
        self.graph.add(class, RDFS_SUBCLASS_OF, Term::iri(parent));
    }

    /// Emits every non-excluded property of the fragment at `pointer` with
    /// `domain` as its domain.
    ///
    /// Each property is renamed, labelled from its schema title (or its own
    /// name), and given the range inferred from its schema type, if any.
    pub(crate) fn map_properties(&mut self, domain: &str, pointer: &str) {
        for name in self.registry.properties_of(pointer) {
            if self.rules.is_excluded(&name) {
                continue;
            }
            let path = property_pointer(pointer, &name);
            let range = self
                .rules
                .infer_range(&name, self.registry.type_of(&path));
            let renamed = self.rules.rename(&name);
            let prop = bods(&renamed);

            let label = self
                .registry
                .title_of(&path)
                .unwrap_or(renamed.as_str())
                .to_string();
            let comment = self
                .registry
                .description_of(&path)
                .unwrap_or(renamed.as_str())
                .to_string();

            self.graph.add(&prop, RDF_TYPE, Term::iri(RDF_PROPERTY));
            self.graph.add(&prop, RDFS_DOMAIN, Term::iri(domain));
            self.annotate(&prop, Some(label), Some(comment));
            if let Some(range) = range {
                self.graph.add(&prop, RDFS_RANGE, Term::iri(range.iri()));
            }
            debug!(property = %renamed, source = %name, domain, ?range, "property");
        }
    }

    /// Declares a property by hand, bypassing schema extraction.
    pub(crate) fn property(
        &mut self,
        name: &str,
        domain: &str,
        label: Text<'_>,
        comment: Text<'_>,
        range: Option<&str>,
    ) {
        let prop = bods(name);
        self.graph.add(&prop, RDF_TYPE, Term::iri(RDF_PROPERTY));
        self.graph.add(&prop, RDFS_DOMAIN, Term::iri(domain));
        let label = self.label_text(label);
        let comment = self.comment_text(comment);
        self.annotate(&prop, label, comment);
        if let Some(range) = range {
            self.graph.add(&prop, RDFS_RANGE, Term::iri(range));
        }
    }

    /// Adds a range to a property. Ranges accumulate.
    pub(crate) fn range(&mut self, name: &str, range: &str) {
        self.graph.add(&bods(name), RDFS_RANGE, Term::iri(range));
    }

    /// Registers a range correction: in the final graph the property has
    /// `replacement` as a range and not `superseded`.
    pub(crate) fn replace_range(&mut self, name: &str, superseded: &str, replacement: &str) {
        self.overrides.push(RangeOverride {
            property: bods(name),
            superseded: superseded.to_string(),
            replacement: replacement.to_string(),
        });
    }

    /// Replaces an inferred `rdfs:Literal` range with a class range.
    pub(crate) fn replace_literal_range(&mut self, name: &str, replacement: &str) {
        self.replace_range(name, RDFS_LITERAL, replacement);
    }

    /// Subclass pattern: declares `type_class` and makes every code of the
    /// codelist a class that is a subclass of `parent`.
    pub(crate) fn map_types(
        &mut self,
        parent: &str,
        type_class: &str,
        codelist: &str,
    ) -> Result<(), CodelistError> {
        self.graph.add(type_class, RDF_TYPE, Term::iri(OWL_CLASS));
        let codes = self.codelists.get(codelist)?;
        for (code, info) in codes.iter() {
            let node = bods(&cap_first(code));
            self.warn_if_shared(&node, codelist);
            self.graph.add(&node, RDF_TYPE, Term::iri(OWL_CLASS));
            self.graph.add(&node, RDFS_SUBCLASS_OF, Term::iri(parent));
            self.graph.add(&node, RDFS_LABEL, Term::literal(&info.title));
            self.graph
                .add(&node, RDFS_COMMENT, Term::literal(&info.description));
        }
        Ok(())
    }

    /// Instance pattern: declares `value_class` and makes every code of the
    /// codelist a named individual of it.
    pub(crate) fn map_instances(
        &mut self,
        value_class: &str,
        codelist: &str,
    ) -> Result<(), CodelistError> {
        self.graph.add(value_class, RDF_TYPE, Term::iri(OWL_CLASS));
        let codes = self.codelists.get(codelist)?;
        for (code, info) in codes.iter() {
            let node = bods(&cap_first(code));
            self.warn_if_shared(&node, codelist);
            self.graph.add(&node, RDF_TYPE, Term::iri(value_class));
            self.graph.add(&node, RDFS_LABEL, Term::literal(&info.title));
            self.graph
                .add(&node, RDFS_COMMENT, Term::literal(&info.description));
        }
        Ok(())
    }

    /// Codes are not namespaced by codelist, so a code already folded from
    /// another list merges into the same node.
    fn warn_if_shared(&self, node: &str, codelist: &str) {
        if self.graph.literal(node, RDFS_LABEL).is_some() {
            warn!(
                node,
                codelist,
                "code already declared; labels and types accumulate"
            );
        }
    }

    /// Declares a hand-authored named individual.
    pub(crate) fn individual(&mut self, name: &str, class: &str, label: &str, comment: &str) {
        let node = bods(name);
        self.graph.add(&node, RDF_TYPE, Term::iri(class));
        self.annotate(&node, Some(label.to_string()), Some(comment.to_string()));
    }
}

/// Shorthand used by the mapping routines for XSD datatypes.
pub(crate) fn xsd(local: &str) -> String {
    format!("{}{local}", iris::XSD)
}
