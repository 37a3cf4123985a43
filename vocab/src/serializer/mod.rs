//! Serializers for the vocabulary graph.
//!
//! Two formats are supported:
//! - **Turtle** ([`turtle`]) — prefix-compacted, the published artifact
//! - **N-Triples** ([`ntriples`]) — one triple per line, for diffing and bulk loading

pub mod ntriples;
pub mod turtle;

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::iris::is_forbidden_in_iri;

/// Percent-encodes the characters an IRI reference may not contain.
pub(crate) fn escape_iri(iri: &str) -> Cow<'_, str> {
    if !iri.chars().any(is_forbidden_in_iri) {
        return Cow::Borrowed(iri);
    }
    let mut out = String::with_capacity(iri.len() + 8);
    for c in iri.chars() {
        if is_forbidden_in_iri(c) {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(out, "%{byte:02X}");
            }
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Escapes a string for use inside a double-quoted Turtle or N-Triples literal.
pub(crate) fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
