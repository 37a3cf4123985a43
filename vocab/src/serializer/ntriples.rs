//! N-Triples serializer for the vocabulary graph.
//!
//! One triple per line, absolute IRIs, canonical order.

use crate::graph::{Graph, Term};
use crate::serializer::{escape_iri, escape_literal};

/// Serializes the graph to an N-Triples string.
#[must_use]
pub fn to_ntriples(graph: &Graph) -> String {
    let mut out = String::with_capacity(graph.len() * 128);
    for t in graph.iter() {
        out.push('<');
        out.push_str(&escape_iri(&t.subject));
        out.push_str("> <");
        out.push_str(&escape_iri(&t.predicate));
        out.push_str("> ");
        out.push_str(&object(&t.object));
        out.push_str(" .\n");
    }
    out
}

fn object(term: &Term) -> String {
    match term {
        Term::Iri(iri) => format!("<{}>", escape_iri(iri)),
        Term::Literal(value) => format!("\"{}\"", escape_literal(value)),
        Term::Typed { lexical, datatype } => {
            let (lexical, datatype) = (escape_literal(lexical), escape_iri(datatype));
            format!("\"{lexical}\"^^<{datatype}>")
        }
    }
}
