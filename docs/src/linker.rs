//! Anchors and cross-references between term sections of the page.

use crate::extractor::OntologyIndex;
use crate::renderer::escape_html;

/// Extracts the local name from an IRI (the part after the last `#` or `/`).
pub fn fragment_from_iri(iri: &str) -> String {
    iri.rsplit(['#', '/'])
        .find(|s| !s.is_empty())
        .unwrap_or(iri)
        .to_string()
}

/// The element id of a term's section. Classes, properties and individuals
/// live in separate id spaces so that `Name` and `name` never collide on
/// case-insensitive hosts.
pub fn anchor(kind: &str, iri: &str) -> String {
    format!("{kind}-{}", fragment_from_iri(iri))
}

/// Renders a reference to a term: a link to its section when the page
/// documents it, otherwise the compacted IRI as code.
pub fn term_ref(iri: &str, index: &OntologyIndex) -> String {
    let kind = if index.is_class(iri) {
        "class"
    } else if index.is_property(iri) {
        "prop"
    } else if index.is_individual(iri) {
        "ind"
    } else {
        return format!("<code>{}</code>", escape_html(&index.compact(iri)));
    };
    format!(
        "<a href=\"#{}\"><code>{}</code></a>",
        escape_html(&anchor(kind, iri)),
        escape_html(&index.compact(iri))
    )
}

/// Renders a comma-separated list of references, or a dash when empty.
pub fn term_refs(iris: &[String], index: &OntologyIndex) -> String {
    if iris.is_empty() {
        return String::from("&mdash;");
    }
    iris.iter()
        .map(|iri| term_ref(iri, index))
        .collect::<Vec<_>>()
        .join(", ")
}
