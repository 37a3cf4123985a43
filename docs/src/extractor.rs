//! Reads the vocabulary Turtle back into a graph and indexes its terms for
//! documentation.

use std::collections::BTreeSet;

use bods_vocab::iris::{
    OWL_CLASS, OWL_ONTOLOGY, RDFS_COMMENT, RDFS_DOMAIN, RDFS_LABEL, RDFS_RANGE, RDFS_SUBCLASS_OF,
    RDF_PROPERTY, RDF_TYPE, XSD_STRING,
};
use bods_vocab::{Graph, Term};
use sophia_api::prelude::*;
use sophia_api::term::TermKind;

use crate::DocsError;

/// Parses Turtle text into a vocabulary graph.
///
/// Blank nodes are dropped: the vocabulary only ever names its terms.
///
/// # Errors
///
/// Returns [`DocsError::Parse`] if the text is not valid Turtle.
pub fn parse_turtle(turtle: &str) -> Result<Graph, DocsError> {
    let mut graph = Graph::new();
    let mut skipped = 0usize;
    sophia_turtle::parser::turtle::parse_str(turtle)
        .try_for_each_triple(|t| -> Result<(), std::convert::Infallible> {
            let (Some(s), Some(p), Some(o)) = (iri_of(t.s()), iri_of(t.p()), term_of(t.o()))
            else {
                skipped += 1;
                return Ok(());
            };
            graph.add(&s, &p, o);
            Ok(())
        })
        .map_err(|e| DocsError::Parse(e.to_string()))?;
    if skipped > 0 {
        tracing::debug!(skipped, "triples with blank nodes ignored");
    }
    Ok(graph)
}

fn iri_of<T: sophia_api::term::Term>(t: T) -> Option<String> {
    match t.kind() {
        TermKind::Iri => t.iri().map(|iri| iri.as_str().to_string()),
        _ => None,
    }
}

fn term_of<T: sophia_api::term::Term>(t: T) -> Option<Term> {
    match t.kind() {
        TermKind::Iri => t.iri().map(|iri| Term::Iri(iri.as_str().to_string())),
        TermKind::Literal => {
            let lexical = t.lexical_form()?.to_string();
            match t.datatype() {
                Some(dt) if dt.as_str() != XSD_STRING && t.language_tag().is_none() => {
                    Some(Term::Typed {
                        lexical,
                        datatype: dt.as_str().to_string(),
                    })
                }
                _ => Some(Term::Literal(lexical)),
            }
        }
        _ => None,
    }
}

/// The ontology header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OntologyHeader {
    /// Ontology IRI.
    pub iri: String,
    /// `rdfs:label`.
    pub label: Option<String>,
    /// `rdfs:comment`.
    pub comment: Option<String>,
}

/// A documented class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassDoc {
    /// Class IRI.
    pub iri: String,
    /// `rdfs:label`.
    pub label: Option<String>,
    /// `rdfs:comment`.
    pub comment: Option<String>,
    /// Direct superclasses.
    pub superclasses: Vec<String>,
    /// Direct subclasses.
    pub subclasses: Vec<String>,
    /// Properties whose domain is this class.
    pub properties: Vec<String>,
    /// Named individuals of this class.
    pub instances: Vec<String>,
}

/// A documented property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyDoc {
    /// Property IRI.
    pub iri: String,
    /// `rdfs:label`.
    pub label: Option<String>,
    /// `rdfs:comment`.
    pub comment: Option<String>,
    /// Domain classes.
    pub domains: Vec<String>,
    /// Range classes and datatypes.
    pub ranges: Vec<String>,
}

/// A documented named individual.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndividualDoc {
    /// Individual IRI.
    pub iri: String,
    /// `rdfs:label`.
    pub label: Option<String>,
    /// `rdfs:comment`.
    pub comment: Option<String>,
    /// Classes it is an instance of.
    pub types: Vec<String>,
}

/// Every documented term of a vocabulary graph, in IRI order.
#[derive(Debug, Clone, Default)]
pub struct OntologyIndex {
    /// Prefix bindings used to display IRIs.
    pub prefixes: Vec<(String, String)>,
    /// The ontology header, if the graph declares one.
    pub header: Option<OntologyHeader>,
    /// All classes.
    pub classes: Vec<ClassDoc>,
    /// All properties.
    pub properties: Vec<PropertyDoc>,
    /// All named individuals.
    pub individuals: Vec<IndividualDoc>,
}

fn iris<'a>(it: impl Iterator<Item = &'a Term>) -> Vec<String> {
    it.filter_map(Term::as_iri).map(str::to_string).collect()
}

impl OntologyIndex {
    /// Indexes a vocabulary graph.
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        let class_term = Term::iri(OWL_CLASS);
        let class_iris: BTreeSet<&str> = graph.subjects(RDF_TYPE, &class_term).collect();

        let header = graph
            .subjects(RDF_TYPE, &Term::iri(OWL_ONTOLOGY))
            .next()
            .map(|iri| OntologyHeader {
                iri: iri.to_string(),
                label: graph.literal(iri, RDFS_LABEL).map(str::to_string),
                comment: graph.literal(iri, RDFS_COMMENT).map(str::to_string),
            });

        let properties: Vec<PropertyDoc> = graph
            .subjects(RDF_TYPE, &Term::iri(RDF_PROPERTY))
            .map(|iri| PropertyDoc {
                iri: iri.to_string(),
                label: graph.literal(iri, RDFS_LABEL).map(str::to_string),
                comment: graph.literal(iri, RDFS_COMMENT).map(str::to_string),
                domains: iris(graph.objects(iri, RDFS_DOMAIN)),
                ranges: iris(graph.objects(iri, RDFS_RANGE)),
            })
            .collect();

        // anything typed with a vocabulary class is an individual
        let mut individuals: Vec<IndividualDoc> = Vec::new();
        let mut seen = BTreeSet::new();
        for triple in graph.iter() {
            if triple.predicate != RDF_TYPE {
                continue;
            }
            let Some(ty) = triple.object.as_iri() else {
                continue;
            };
            if !class_iris.contains(ty) || !seen.insert(triple.subject.as_str()) {
                continue;
            }
            let iri = triple.subject.as_str();
            individuals.push(IndividualDoc {
                iri: iri.to_string(),
                label: graph.literal(iri, RDFS_LABEL).map(str::to_string),
                comment: graph.literal(iri, RDFS_COMMENT).map(str::to_string),
                types: iris(graph.objects(iri, RDF_TYPE))
                    .into_iter()
                    .filter(|t| class_iris.contains(t.as_str()))
                    .collect(),
            });
        }

        let classes = class_iris
            .iter()
            .map(|&iri| {
                let term = Term::iri(iri);
                ClassDoc {
                    iri: iri.to_string(),
                    label: graph.literal(iri, RDFS_LABEL).map(str::to_string),
                    comment: graph.literal(iri, RDFS_COMMENT).map(str::to_string),
                    superclasses: iris(graph.objects(iri, RDFS_SUBCLASS_OF)),
                    subclasses: graph
                        .subjects(RDFS_SUBCLASS_OF, &term)
                        .map(str::to_string)
                        .collect(),
                    properties: properties
                        .iter()
                        .filter(|p| p.domains.iter().any(|d| d == iri))
                        .map(|p| p.iri.clone())
                        .collect(),
                    instances: individuals
                        .iter()
                        .filter(|i| i.types.iter().any(|t| t == iri))
                        .map(|i| i.iri.clone())
                        .collect(),
                }
            })
            .collect();

        Self {
            prefixes: graph.prefixes().to_vec(),
            header,
            classes,
            properties,
            individuals,
        }
    }

    /// Returns true if the given IRI is a documented class.
    pub fn is_class(&self, iri: &str) -> bool {
        self.classes.iter().any(|c| c.iri == iri)
    }

    /// Returns true if the given IRI is a documented property.
    pub fn is_property(&self, iri: &str) -> bool {
        self.properties.iter().any(|p| p.iri == iri)
    }

    /// Returns true if the given IRI is a documented individual.
    pub fn is_individual(&self, iri: &str) -> bool {
        self.individuals.iter().any(|i| i.iri == iri)
    }

    /// Writes `iri` as `prefix:local` when a binding matches.
    pub fn compact(&self, iri: &str) -> String {
        self.prefixes
            .iter()
            .filter_map(|(p, ns)| Some((p, iri.strip_prefix(ns.as_str())?)))
            .filter(|(_, local)| !local.is_empty())
            .min_by_key(|(_, local)| local.len())
            .map(|(p, local)| format!("{p}:{local}"))
            .unwrap_or_else(|| iri.to_string())
    }
}
