//! Schema reference resolution and property/type extraction.
//!
//! A [`SchemaRegistry`] holds the standard's JSON Schema documents in
//! registration order. Pointers come in three shapes:
//!
//! - `urn:entity` — the root of the document whose `$id` is `urn:entity`
//! - `urn:entity#/properties/name` — a JSON pointer inside that document
//! - `/$defs/Address` — a JSON pointer tried against every document in
//!   registration order; the first document containing it wins
//!
//! Resolution never follows `$ref`. A pointer that does not resolve is not an
//! error: every accessor returns `Option` and the builder degrades to "no
//! title", "no description" or "no type".

use serde_json::Value;
use tracing::warn;

/// A parsed pointer expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer<'a> {
    /// The root of the document with this `$id`.
    Root(&'a str),
    /// A JSON pointer scoped to one document.
    Scoped {
        /// Document `$id`.
        document: &'a str,
        /// JSON pointer within the document.
        path: &'a str,
    },
    /// A JSON pointer tried against every document.
    Path(&'a str),
}

impl<'a> Pointer<'a> {
    /// Parses a pointer expression.
    #[must_use]
    pub fn parse(expr: &'a str) -> Self {
        if expr.starts_with("urn:") {
            match expr.split_once('#') {
                Some((document, path)) => Pointer::Scoped { document, path },
                None => Pointer::Root(expr),
            }
        } else {
            Pointer::Path(expr)
        }
    }
}

/// Appends `/properties/<name>` to a pointer expression.
///
/// Root pointers become document-scoped so the property is looked up in the
/// right document rather than in whichever document happens to match first.
#[must_use]
pub fn property_pointer(parent: &str, name: &str) -> String {
    match Pointer::parse(parent) {
        Pointer::Root(document) => format!("{document}#/properties/{name}"),
        Pointer::Scoped { .. } | Pointer::Path(_) => format!("{parent}/properties/{name}"),
    }
}

/// JSON Schema primitive type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    /// `"string"`.
    String,
    /// `"number"`.
    Number,
    /// `"integer"`.
    Integer,
    /// `"boolean"`.
    Boolean,
    /// `"object"`.
    Object,
    /// `"array"`.
    Array,
    /// `"null"`.
    Null,
}

impl PrimitiveType {
    /// Parses a JSON Schema `type` keyword value.
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            "null" => Some(Self::Null),
            _ => None,
        }
    }
}

/// The registered schema documents, queryable by pointer.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    documents: Vec<(String, Value)>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from documents in registration order.
    pub fn from_documents(documents: impl IntoIterator<Item = Value>) -> Self {
        let mut registry = Self::new();
        for document in documents {
            registry.register(document);
        }
        registry
    }

    /// Registers a document under its `$id`. Documents without an `$id` are
    /// still searchable by path.
    pub fn register(&mut self, document: Value) {
        let id = document
            .get("$id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.documents.push((id, document));
    }

    /// Number of registered documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if no document is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn document(&self, id: &str) -> Option<&Value> {
        self.documents
            .iter()
            .find(|(doc_id, _)| doc_id == id)
            .map(|(_, doc)| doc)
    }

    /// Resolves a pointer expression to the schema fragment it names.
    #[must_use]
    pub fn resolve(&self, expr: &str) -> Option<&Value> {
        let found = match Pointer::parse(expr) {
            Pointer::Root(id) => self.document(id),
            Pointer::Scoped { document, path } => {
                self.document(document).and_then(|doc| doc.pointer(path))
            }
            Pointer::Path(path) => self
                .documents
                .iter()
                .find_map(|(_, doc)| doc.pointer(path)),
        };
        if found.is_none() {
            warn!(pointer = expr, "pointer did not resolve");
        }
        found
    }

    /// Names of the properties declared under the fragment's `properties` key,
    /// in document order. Empty when the fragment is missing or has none.
    #[must_use]
    pub fn properties_of(&self, expr: &str) -> Vec<String> {
        self.resolve(expr)
            .and_then(|fragment| fragment.get("properties"))
            .and_then(Value::as_object)
            .map(|props| props.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The fragment's `type` keyword, when it is a single known type name.
    #[must_use]
    pub fn type_of(&self, expr: &str) -> Option<PrimitiveType> {
        self.keyword(expr, "type")
            .and_then(Value::as_str)
            .and_then(PrimitiveType::from_keyword)
    }

    /// The fragment's `title`.
    #[must_use]
    pub fn title_of(&self, expr: &str) -> Option<&str> {
        self.keyword(expr, "title").and_then(Value::as_str)
    }

    /// The fragment's `description`.
    #[must_use]
    pub fn description_of(&self, expr: &str) -> Option<&str> {
        self.keyword(expr, "description").and_then(Value::as_str)
    }

    fn keyword(&self, expr: &str, keyword: &str) -> Option<&Value> {
        self.resolve(expr).and_then(|f| f.get(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::from_documents([
            json!({
                "$id": "urn:components",
                "$defs": {
                    "Address": {
                        "title": "Address",
                        "description": "A free text address string",
                        "properties": {
                            "type": {"type": "string"},
                            "address": {"type": "string", "title": "Address"},
                            "postCode": {"type": "string"},
                            "country": {"type": "object"}
                        }
                    }
                }
            }),
            json!({
                "$id": "urn:entity",
                "properties": {
                    "name": {"type": "string", "title": "Name"},
                    "isComponent": {"type": "boolean"}
                }
            }),
            json!({
                "$id": "urn:person",
                "properties": {
                    "names": {"type": "array", "title": "Names"}
                }
            }),
        ])
    }

    #[test]
    fn pointer_shapes() {
        assert_eq!(Pointer::parse("urn:entity"), Pointer::Root("urn:entity"));
        assert_eq!(
            Pointer::parse("urn:entity#/properties/name"),
            Pointer::Scoped {
                document: "urn:entity",
                path: "/properties/name"
            }
        );
        assert_eq!(Pointer::parse("/$defs/Name"), Pointer::Path("/$defs/Name"));
    }

    #[test]
    fn root_pointer_returns_document() {
        let r = registry();
        let doc = r.resolve("urn:person");
        assert_eq!(
            doc.and_then(|d| d.get("$id")).and_then(Value::as_str),
            Some("urn:person")
        );
        assert!(r.resolve("urn:nowhere").is_none());
    }

    #[test]
    fn path_pointer_scans_documents() {
        let r = registry();
        assert_eq!(r.title_of("/$defs/Address"), Some("Address"));
        // first document with a match wins
        assert_eq!(r.title_of("/properties/name"), Some("Name"));
        assert!(r.resolve("/$defs/Missing").is_none());
    }

    #[test]
    fn properties_keep_document_order() {
        let r = registry();
        assert_eq!(
            r.properties_of("/$defs/Address"),
            vec!["type", "address", "postCode", "country"]
        );
        assert_eq!(r.properties_of("urn:entity"), vec!["name", "isComponent"]);
        let leaf = r.properties_of("/$defs/Address/properties/postCode");
        assert!(leaf.is_empty());
        assert!(r.properties_of("/$defs/Missing").is_empty());
    }

    #[test]
    fn property_pointers_stay_in_their_document() {
        let r = registry();
        let p = property_pointer("urn:person", "names");
        assert_eq!(p, "urn:person#/properties/names");
        assert_eq!(r.type_of(&p), Some(PrimitiveType::Array));
        assert_eq!(
            property_pointer("/$defs/Address", "country"),
            "/$defs/Address/properties/country"
        );
    }

    #[test]
    fn type_lookup() {
        let r = registry();
        assert_eq!(
            r.type_of("/$defs/Address/properties/address"),
            Some(PrimitiveType::String)
        );
        assert_eq!(
            r.type_of("urn:entity#/properties/isComponent"),
            Some(PrimitiveType::Boolean)
        );
        assert_eq!(r.type_of("/$defs/Address"), None);
    }

    #[test]
    fn missing_keywords_are_absent() {
        let r = registry();
        assert_eq!(r.description_of("/$defs/Address/properties/postCode"), None);
        assert_eq!(r.title_of("urn:entity"), None);
    }
}
