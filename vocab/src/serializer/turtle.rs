//! Turtle 1.1 serializer for the vocabulary graph.
//!
//! Subjects are written in canonical order, one block per subject, with
//! `rdf:type` first and abbreviated to `a`. IRIs are compacted against the
//! graph's prefix bindings and only the prefixes actually used are declared.

use std::collections::BTreeSet;

use crate::graph::{Graph, Term, Triple};
use crate::iris::RDF_TYPE;
use crate::serializer::{escape_iri, escape_literal};

/// Serializes the graph to a Turtle string.
#[must_use]
pub fn to_turtle(graph: &Graph) -> String {
    let mut used = BTreeSet::new();
    let mut body = String::with_capacity(64 * 1024);

    let mut subjects: Vec<&str> = graph.iter().map(|t| t.subject.as_str()).collect();
    subjects.dedup();

    for subject in subjects {
        let triples: Vec<&Triple> = graph.iter().filter(|t| t.subject == subject).collect();
        body.push_str(&node(graph, subject, &mut used));
        body.push('\n');

        let mut predicates: Vec<&str> = triples.iter().map(|t| t.predicate.as_str()).collect();
        predicates.dedup();
        // rdf:type leads each block
        predicates.sort_by_key(|p| *p != RDF_TYPE);

        let lines: Vec<String> = predicates
            .iter()
            .map(|predicate| {
                let verb = if *predicate == RDF_TYPE {
                    "a".to_string()
                } else {
                    node(graph, predicate, &mut used)
                };
                let objects: Vec<String> = triples
                    .iter()
                    .filter(|t| t.predicate == *predicate)
                    .map(|t| object(graph, &t.object, &mut used))
                    .collect();
                format!("  {} {}", verb, objects.join(" , "))
            })
            .collect();
        body.push_str(&lines.join(" ;\n"));
        body.push_str(" .\n\n");
    }

    let mut out = String::with_capacity(body.len() + 512);
    for (prefix, namespace) in graph.prefixes() {
        if used.contains(prefix.as_str()) {
            out.push_str(&format!("@prefix {prefix}: <{namespace}> .\n"));
        }
    }
    out.push('\n');
    out.push_str(&body);
    out
}

fn node(graph: &Graph, iri: &str, used: &mut BTreeSet<String>) -> String {
    match graph.compact(iri) {
        Some(curie) => {
            if let Some((prefix, _)) = curie.split_once(':') {
                used.insert(prefix.to_string());
            }
            curie
        }
        None => format!("<{}>", escape_iri(iri)),
    }
}

fn object(graph: &Graph, term: &Term, used: &mut BTreeSet<String>) -> String {
    match term {
        Term::Iri(iri) => node(graph, iri, used),
        Term::Literal(value) => format!("\"{}\"", escape_literal(value)),
        Term::Typed { lexical, datatype } => {
            format!(
                "\"{}\"^^{}",
                escape_literal(lexical),
                node(graph, datatype, used)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iris;

    fn sample() -> Graph {
        let mut g = Graph::new();
        let entity = iris::bods("Entity");
        g.add(&entity, iris::RDF_TYPE, Term::iri(iris::OWL_CLASS));
        g.add(&entity, iris::RDFS_LABEL, Term::literal("Entity"));
        let comment = Term::literal("A \"legal\" entity");
        g.add(&entity, iris::RDFS_COMMENT, comment);
        let name = iris::bods("name");
        g.add(&name, iris::RDF_TYPE, Term::iri(iris::RDF_PROPERTY));
        g.add(&name, iris::RDFS_DOMAIN, Term::iri(&entity));
        g.add(&name, iris::RDFS_DOMAIN, Term::iri(iris::bods("Person")));
        g
    }

    #[test]
    fn declares_only_used_prefixes() {
        let ttl = to_turtle(&sample());
        let prefix = "@prefix bods: <https://standard.openownership.org/terms#> .";
        assert!(ttl.contains(prefix));
        assert!(ttl.contains("@prefix owl:"));
        assert!(ttl.contains("@prefix rdfs:"));
        assert!(!ttl.contains("@prefix orgid:"));
        assert!(!ttl.contains("@prefix xsd:"));
    }

    #[test]
    fn uncompactable_iris_are_escaped() {
        let mut g = Graph::new();
        let odd = iris::bods("odd name");
        g.add(&odd, iris::RDF_TYPE, Term::iri(iris::OWL_CLASS));
        let ttl = to_turtle(&g);
        let block = "<https://standard.openownership.org/terms#odd%20name>\n  a owl:Class";
        assert!(ttl.contains(block));
        assert!(!ttl.contains("odd name"));
    }

    #[test]
    fn type_is_abbreviated_and_first() {
        let ttl = to_turtle(&sample());
        assert!(ttl.contains("bods:Entity\n  a owl:Class ;\n"));
    }

    #[test]
    fn repeated_predicates_share_a_line() {
        let ttl = to_turtle(&sample());
        assert!(ttl.contains("rdfs:domain bods:Entity , bods:Person"));
    }

    #[test]
    fn literals_are_escaped() {
        let ttl = to_turtle(&sample());
        assert!(ttl.contains(r#"rdfs:comment "A \"legal\" entity""#));
    }

    #[test]
    fn identical_graphs_serialize_identically() {
        assert_eq!(to_turtle(&sample()), to_turtle(&sample()));
    }

    #[test]
    fn output_parses_as_turtle() {
        use sophia_api::prelude::*;
        use std::convert::Infallible;

        let ttl = to_turtle(&sample());
        let mut count = 0usize;
        let mut triples = sophia_turtle::parser::turtle::parse_str(&ttl);
        let parsed = triples.try_for_each_triple(|_| -> Result<(), Infallible> {
            count += 1;
            Ok(())
        });
        assert!(parsed.is_ok(), "Turtle did not parse: {:?}", parsed.err());
        assert_eq!(count, sample().len());
    }
}
