//! Append-only triple accumulator with namespace prefix bindings.
//!
//! Triples live in an ordered set: inserting a triple twice leaves one copy,
//! and iteration order depends only on the triples themselves, never on the
//! order they were added. Both serializers rely on that to produce
//! byte-identical output for identical graphs.

use std::collections::BTreeSet;
use std::fmt;

use crate::iris;

/// An RDF term in object position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// A resource named by an absolute IRI (class, property, individual, datatype).
    Iri(String),
    /// A plain string literal.
    Literal(String),
    /// A literal with an explicit datatype IRI.
    Typed {
        /// Lexical form.
        lexical: String,
        /// Datatype IRI.
        datatype: String,
    },
}

impl Term {
    /// Creates an IRI term.
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// Creates a plain literal term.
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(value.into())
    }

    /// Returns the IRI if this term is one.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns the lexical form if this term is a literal of any kind.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Term::Literal(value) => Some(value),
            Term::Typed { lexical, .. } => Some(lexical),
            Term::Iri(_) => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Literal(value) => write!(f, "{value:?}"),
            Term::Typed { lexical, datatype } => write!(f, "{lexical:?}^^<{datatype}>"),
        }
    }
}

/// A single `(subject, predicate, object)` statement.
///
/// Subjects and predicates are always IRIs; the vocabulary never uses blank nodes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    /// Subject IRI.
    pub subject: String,
    /// Predicate IRI.
    pub predicate: String,
    /// Object term.
    pub object: Term,
}

/// The accumulated vocabulary graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    prefixes: Vec<(String, String)>,
    triples: BTreeSet<Triple>,
}

impl Graph {
    /// Creates an empty graph with the standard vocabulary prefixes bound.
    #[must_use]
    pub fn new() -> Self {
        let mut graph = Self::default();
        for (prefix, namespace) in iris::PREFIXES {
            graph.bind(prefix, namespace);
        }
        graph
    }

    /// Binds `prefix` to `namespace`, replacing any earlier binding of the same prefix.
    pub fn bind(&mut self, prefix: &str, namespace: &str) {
        match self.prefixes.iter_mut().find(|(p, _)| p == prefix) {
            Some(binding) => binding.1 = namespace.to_string(),
            None => self
                .prefixes
                .push((prefix.to_string(), namespace.to_string())),
        }
    }

    /// Returns the prefix bindings in declaration order.
    #[must_use]
    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }

    /// Asserts a triple. Returns `false` if it was already present.
    pub fn add(&mut self, subject: &str, predicate: &str, object: Term) -> bool {
        self.triples.insert(Triple {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object,
        })
    }

    /// Retracts a triple. Returns `false` if it was not present.
    pub fn remove(&mut self, subject: &str, predicate: &str, object: &Term) -> bool {
        self.triples.remove(&Triple {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: object.clone(),
        })
    }

    /// Returns true if the exact triple is present.
    #[must_use]
    pub fn contains(&self, subject: &str, predicate: &str, object: &Term) -> bool {
        self.triples.contains(&Triple {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: object.clone(),
        })
    }

    /// Returns every object asserted for `(subject, predicate, _)`.
    pub fn objects<'g, 'q>(
        &'g self,
        subject: &'q str,
        predicate: &'q str,
    ) -> impl Iterator<Item = &'g Term> + 'q
    where
        'g: 'q,
    {
        self.triples
            .iter()
            .filter(move |t| t.subject == subject && t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Returns every subject asserted for `(_, predicate, object)`.
    pub fn subjects<'g, 'q>(
        &'g self,
        predicate: &'q str,
        object: &'q Term,
    ) -> impl Iterator<Item = &'g str> + 'q
    where
        'g: 'q,
    {
        self.triples
            .iter()
            .filter(move |t| t.predicate == predicate && &t.object == object)
            .map(|t| t.subject.as_str())
    }

    /// Returns the first literal object of `(subject, predicate, _)`, if any.
    #[must_use]
    pub fn literal(&self, subject: &str, predicate: &str) -> Option<&str> {
        self.triples
            .iter()
            .filter(|t| t.subject == subject && t.predicate == predicate)
            .find_map(|t| t.object.as_literal())
    }

    /// Iterates all triples in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Number of distinct triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if no triple has been asserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Compacts an IRI to `prefix:local` using the bound prefixes.
    ///
    /// Returns `None` when no prefix matches or the local part is not a
    /// valid Turtle local name.
    #[must_use]
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, namespace)| iri.starts_with(namespace.as_str()))
            .max_by_key(|(_, namespace)| namespace.len())
            .and_then(|(prefix, namespace)| {
                let local = &iri[namespace.len()..];
                is_local_name(local).then(|| format!("{prefix}:{local}"))
            })
    }
}

/// Conservative subset of the Turtle `PN_LOCAL` production.
fn is_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() || first == '_' => {}
        _ => return false,
    }
    local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_triples_collapse() {
        let mut g = Graph::new();
        assert!(g.add("urn:s", "urn:p", Term::literal("o")));
        assert!(!g.add("urn:s", "urn:p", Term::literal("o")));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn remove_then_readd() {
        let mut g = Graph::new();
        let lit = Term::iri(iris::RDFS_LITERAL);
        g.add("urn:p", iris::RDFS_RANGE, lit.clone());
        assert!(g.remove("urn:p", iris::RDFS_RANGE, &lit));
        assert!(!g.remove("urn:p", iris::RDFS_RANGE, &lit));
        assert!(g.is_empty());
        g.add("urn:p", iris::RDFS_RANGE, lit.clone());
        assert!(g.contains("urn:p", iris::RDFS_RANGE, &lit));
    }

    #[test]
    fn lookups_outlive_their_query_strings() {
        let mut g = Graph::new();
        g.add("urn:s", iris::RDFS_LABEL, Term::literal("Subject"));
        g.add("urn:s", iris::RDF_TYPE, Term::iri(iris::OWL_CLASS));
        let (label, types) = {
            let subject = String::from("urn:s");
            let label = g.literal(&subject, iris::RDFS_LABEL);
            let types: Vec<&Term> = g.objects(&subject, iris::RDF_TYPE).collect();
            (label, types)
        };
        assert_eq!(label, Some("Subject"));
        assert_eq!(types, vec![&Term::iri(iris::OWL_CLASS)]);
        assert_eq!(g.literal("urn:s", iris::RDF_TYPE), None);
    }

    #[test]
    fn ranges_accumulate() {
        let mut g = Graph::new();
        let p = iris::bods("interestedParty");
        g.add(&p, iris::RDFS_RANGE, Term::iri(iris::bods("Entity")));
        g.add(&p, iris::RDFS_RANGE, Term::iri(iris::bods("Person")));
        assert_eq!(g.objects(&p, iris::RDFS_RANGE).count(), 2);
    }

    #[test]
    fn iteration_order_ignores_insertion_order() {
        let mut a = Graph::new();
        a.add("urn:b", "urn:p", Term::literal("2"));
        a.add("urn:a", "urn:p", Term::literal("1"));
        let mut b = Graph::new();
        b.add("urn:a", "urn:p", Term::literal("1"));
        b.add("urn:b", "urn:p", Term::literal("2"));
        assert_eq!(a, b);
        let subjects: Vec<_> = a.iter().map(|t| t.subject.as_str()).collect();
        assert_eq!(subjects, vec!["urn:a", "urn:b"]);
    }

    #[test]
    fn compaction_uses_bound_prefixes() {
        let g = Graph::new();
        assert_eq!(
            g.compact(&iris::bods("Entity")).as_deref(),
            Some("bods:Entity")
        );
        let xsd = g.compact(iris::XSD_DATETIME);
        assert_eq!(xsd.as_deref(), Some("xsd:dateTime"));
        assert_eq!(g.compact("https://example.com/x"), None);
        assert_eq!(g.compact(&iris::bods("has space")), None);
    }

    #[test]
    fn rebinding_a_prefix_replaces_it() {
        let mut g = Graph::new();
        let before = g.prefixes().len();
        g.bind("bods", "https://example.com/terms#");
        assert_eq!(g.prefixes().len(), before);
        assert_eq!(
            g.compact("https://example.com/terms#X").as_deref(),
            Some("bods:X")
        );
    }
}
