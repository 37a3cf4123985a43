//! End-to-end builds against the fixture schema set in `tests/fixtures`.

use std::path::{Path, PathBuf};

use bods_vocab::codelist::cap_first;
use bods_vocab::iris::{
    self, bods, OWL_CLASS, OWL_ONTOLOGY, RDFS_COMMENT, RDFS_DOMAIN, RDFS_LABEL, RDFS_LITERAL,
    RDFS_RANGE, RDFS_RESOURCE, RDFS_SUBCLASS_OF, RDF_PROPERTY, RDF_TYPE,
};
use bods_vocab::serializer::{ntriples::to_ntriples, turtle::to_turtle};
use bods_vocab::{
    build_vocabulary, BuildPlan, Codelists, Graph, MappingStep, OntologyMetadata, SchemaRegistry,
    SourceCache, Term, VocabBuilder, VocabConfig,
};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn sources() -> (SchemaRegistry, Codelists) {
    // every file is cached, so the remote is never contacted
    let files = SourceCache::new(fixtures())
        .remote("http://127.0.0.1:9/")
        .load();
    assert!(files.is_ok(), "fixtures failed to load: {files:?}");
    let files = files.unwrap_or_default();
    let registry = files.registry().unwrap_or_default();
    let codelists = files.codelists().unwrap_or_default();
    assert_eq!(registry.len(), 5);
    assert_eq!(codelists.len(), 13);
    (registry, codelists)
}

fn build(plan: &BuildPlan) -> Graph {
    let (registry, codelists) = sources();
    let config = VocabConfig::default();
    let graph = VocabBuilder::new(&registry, &codelists, &config.rules)
        .map(|b| b.metadata(config.metadata.clone()))
        .and_then(|b| b.build(plan));
    assert!(graph.is_ok(), "build failed: {:?}", graph.as_ref().err());
    graph.unwrap_or_default()
}

fn full() -> Graph {
    build(&BuildPlan::full())
}

fn iri(s: &str) -> Term {
    Term::iri(s)
}

fn has_domain(g: &Graph, property: &str, class: &str) -> bool {
    g.contains(&bods(property), RDFS_DOMAIN, &iri(&bods(class)))
}

fn has_range(g: &Graph, property: &str, range: &str) -> bool {
    g.contains(&bods(property), RDFS_RANGE, &iri(range))
}

fn declares_class(g: &Graph, class: &str) -> bool {
    g.contains(&bods(class), RDF_TYPE, &iri(OWL_CLASS))
}

fn domains(g: &Graph, property: &str) -> Vec<String> {
    g.objects(&bods(property), RDFS_DOMAIN)
        .filter_map(|t| t.as_iri().map(str::to_string))
        .collect()
}

#[test]
fn natural_person_code_becomes_person_type_instance() {
    let g = full();
    let natural = bods("Natural");
    assert!(g.contains(&natural, RDF_TYPE, &iri(&bods("PersonType"))));
    assert_eq!(g.literal(&natural, RDFS_LABEL), Some("Natural person"));
    assert_eq!(g.literal(&natural, RDFS_COMMENT), Some("A human being"));
}

#[test]
fn excluded_properties_never_reach_the_graph() {
    let g = build(&BuildPlan::select([MappingStep::Entity]));
    let entity = iri(&bods("Entity"));
    let excluded = [
        "recordType",
        "isComponent",
        "publicListing",
        "unspecifiedEntityDetails",
    ];
    for name in excluded {
        assert!(
            !g.contains(&bods(name), RDFS_DOMAIN, &entity),
            "{name} was emitted with domain Entity"
        );
    }
    assert!(g.contains(&bods("foundingDate"), RDFS_DOMAIN, &entity));
}

#[test]
fn plural_properties_are_renamed() {
    let g = full();
    let entity = iri(&bods("Entity"));
    assert!(g.contains(&bods("address"), RDFS_DOMAIN, &entity));
    let addresses = bods("addresses");
    assert!(g.subjects(RDFS_DOMAIN, &entity).all(|s| s != addresses));
    assert!(g.contains(&bods("alternateName"), RDFS_DOMAIN, &entity));
    assert!(g.contains(&bods("identifier"), RDFS_DOMAIN, &entity));
    assert!(has_domain(&g, "nationality", "Person"));
    assert!(has_domain(&g, "streetAddress", "Address"));
    assert!(has_domain(&g, "idString", "Identifier"));
}

#[test]
fn repeated_builds_are_byte_identical() {
    let first = full();
    let second = full();
    assert_eq!(to_turtle(&first), to_turtle(&second));
    assert_eq!(to_ntriples(&first), to_ntriples(&second));

    let (registry, codelists) = sources();
    let config = VocabConfig::default();
    let third = build_vocabulary(&registry, &codelists, &config);
    assert_eq!(third.map(|g| to_turtle(&g)).ok(), Some(to_turtle(&first)));
}

#[test]
fn every_code_is_folded_in() {
    let g = full();
    let (_, codelists) = sources();

    let instance_lists = [
        ("personType.csv", "PersonType"),
        ("entityType.csv", "EntityType"),
        ("entitySubtype.csv", "EntitySubtype"),
        ("unspecifiedReason.csv", "UnspecifiedReason"),
        ("annotationMotivation.csv", "AnnotationMotivation"),
        ("directOrIndirect.csv", "DirectOrIndirect"),
        ("sourceType.csv", "SourceType"),
        ("securitiesIdentifierSchemes.csv", "SecuritiesIdentifierScheme"),
    ];
    for (file, class) in instance_lists {
        let list = codelists.get(file);
        assert!(list.is_ok(), "{file} missing");
        let Ok(list) = list else { continue };
        let members = g.subjects(RDF_TYPE, &iri(&bods(class))).count();
        assert_eq!(members, list.len(), "{class} instances");
        for (code, info) in list.iter() {
            let node = bods(&cap_first(code));
            assert_eq!(g.literal(&node, RDFS_LABEL), Some(info.title.as_str()));
            let comment = g.literal(&node, RDFS_COMMENT);
            assert_eq!(comment, Some(info.description.as_str()));
        }
    }

    let subclass_lists = [
        ("recordStatus.csv", "Statement"),
        ("interestType.csv", "Interest"),
        ("addressType.csv", "Address"),
        ("nameType.csv", "Name"),
    ];
    for (file, parent) in subclass_lists {
        let list = codelists.get(file);
        assert!(list.is_ok(), "{file} missing");
        let Ok(list) = list else { continue };
        let members = g.subjects(RDFS_SUBCLASS_OF, &iri(&bods(parent))).count();
        assert_eq!(members, list.len(), "{parent} subclasses");
        for (code, _) in list.iter() {
            assert!(declares_class(&g, &cap_first(code)), "{code}");
        }
    }
}

#[test]
fn corrected_ranges_supersede_literal() {
    let g = full();
    let xsd_datetime = iris::XSD_DATETIME;
    let corrections = [
        ("personType", bods("PersonType")),
        ("subject", bods("Entity")),
        ("interestedParty", bods("Entity")),
        ("unspecifiedReason", bods("UnspecifiedReason")),
        ("motivation", bods("AnnotationMotivation")),
        ("directOrIndirect", bods("DirectOrIndirect")),
        ("retrievedAt", xsd_datetime.to_string()),
    ];
    for (property, range) in corrections {
        let p = bods(property);
        assert!(
            g.contains(&p, RDFS_RANGE, &iri(&range)),
            "{property} lacks {range}"
        );
        assert!(
            !g.contains(&p, RDFS_RANGE, &iri(RDFS_LITERAL)),
            "{property} kept rdfs:Literal"
        );
    }
    assert!(has_range(&g, "interestedParty", &bods("Person")));
}

#[test]
fn semantic_ranges_are_inferred() {
    let g = full();
    assert!(has_range(&g, "birthDate", iris::XSD_DATETIME));
    assert!(has_range(&g, "statementDate", iris::XSD_DATETIME));
    assert!(has_range(&g, "uri", RDFS_RESOURCE));
    assert!(has_range(&g, "postCode", RDFS_LITERAL));
    assert!(has_range(&g, "hasPublicListing", iris::XSD_BOOLEAN));
    assert!(has_range(&g, "shareExact", iris::XSD_FLOAT));
}

#[test]
fn class_specific_properties_have_one_domain_and_text() {
    let g = full();
    let owned = [
        ("foundingDate", "Entity"),
        ("dissolutionDate", "Entity"),
        ("birthDate", "Person"),
        ("placeOfBirth", "Person"),
        ("shareExact", "Interest"),
        ("fullName", "Name"),
        ("stockExchangeName", "SecuritiesListing"),
        ("statementPointerTarget", "Annotation"),
    ];
    for (property, class) in owned {
        assert_eq!(domains(&g, property), vec![bods(class)], "{property}");
    }

    for property in g.subjects(RDF_TYPE, &iri(RDF_PROPERTY)) {
        let label = g.literal(property, RDFS_LABEL);
        assert!(label.is_some(), "{property} has no label");
        let domain_count = g.objects(property, RDFS_DOMAIN).count();
        assert!(domain_count >= 1, "{property} has no domain");
    }
}

#[test]
fn nested_objects_are_flattened() {
    let g = full();
    let entity = iri(&bods("Entity"));
    assert!(g.contains(&bods("entitySubtype"), RDFS_DOMAIN, &entity));
    assert!(has_range(&g, "entitySubtype", &bods("EntitySubtype")));
    assert_eq!(
        g.literal(&bods("entityTypeDetails"), RDFS_LABEL),
        Some("Entity Type Details")
    );
    assert!(has_range(&g, "formedByStatuteDate", iris::XSD_DATETIME));
    assert_eq!(
        g.literal(&bods("formedByStatuteName"), RDFS_LABEL),
        Some("Formed by statute")
    );
    assert!(has_range(&g, "formedByStatuteName", RDFS_LITERAL));

    let listing = iri(&bods("SecuritiesListing"));
    assert!(g.contains(&bods("securityIdScheme"), RDFS_DOMAIN, &listing));
    assert!(g.contains(&bods("securityId"), RDFS_DOMAIN, &listing));
    assert!(!g.contains(&bods("security"), RDFS_DOMAIN, &listing));

    assert!(has_range(&g, "sourceType", &bods("SourceType")));
    assert!(has_range(&g, "pepStatus", &bods("PEPStatus")));
    assert!(has_domain(&g, "publicationDate", "Statement"));
}

#[test]
fn pep_status_has_three_individuals() {
    let g = full();
    let status = iri(&bods("PEPStatus"));
    let mut members: Vec<&str> = g.subjects(RDF_TYPE, &status).collect();
    members.sort_unstable();
    assert_eq!(
        members,
        vec![bods("NotPEP"), bods("PEP"), bods("PEPMissing")]
    );
    assert_eq!(g.literal(&bods("PEPStatus"), RDFS_LABEL), Some("Status"));
}

#[test]
fn record_classes_sit_under_record_details() {
    let g = full();
    let details = iri(&bods("RecordDetails"));
    for class in ["Entity", "Person", "Relationship", "Unspecified"] {
        assert!(
            g.contains(&bods(class), RDFS_SUBCLASS_OF, &details),
            "{class}"
        );
    }
    // the recordType codelist labels record classes even where the schema has a title
    let person = bods("Person");
    assert_eq!(g.literal(&person, RDFS_LABEL), Some("Person"));
    assert_eq!(g.literal(&person, RDFS_COMMENT), Some("A natural person."));
    assert_eq!(g.literal(&bods("Entity"), RDFS_LABEL), Some("Entity"));
    assert_eq!(
        g.objects(&bods("Entity"), RDFS_LABEL).count(),
        1,
        "schema title must not add a second label"
    );
}

#[test]
fn hand_authored_classes() {
    let g = full();
    assert_eq!(g.literal(&bods("Agent"), RDFS_LABEL), Some("Agent"));
    assert!(has_range(&g, "agentUri", RDFS_RESOURCE));
    assert!(declares_class(&g, "Declaration"));
    let subject = bods("declarationSubject");
    assert!(g.contains(&subject, RDFS_RANGE, &iri(&bods("Entity"))));
    assert!(g.contains(&subject, RDFS_RANGE, &iri(&bods("Person"))));
}

#[test]
fn ontology_header() {
    let g = full();
    let meta = OntologyMetadata::default();
    assert!(g.contains(&meta.iri, RDF_TYPE, &iri(OWL_ONTOLOGY)));
    let comment = g.literal(&meta.iri, RDFS_COMMENT);
    assert_eq!(comment, Some(meta.comment.as_str()));
}

#[test]
fn selective_plan_builds_only_what_it_names() {
    let g = build(&BuildPlan::select([MappingStep::Person]));
    assert!(declares_class(&g, "Person"));
    assert!(declares_class(&g, "RecordDetails"));
    assert!(g.contains(&bods("PEP"), RDF_TYPE, &iri(&bods("PEPStatus"))));
    assert!(!declares_class(&g, "Entity"));
    assert!(!declares_class(&g, "Statement"));
    assert!(g.len() < full().len());
}

#[test]
fn turtle_output_parses_back() {
    use sophia_api::prelude::*;
    use std::convert::Infallible;

    let g = full();
    let ttl = to_turtle(&g);
    let prefix = "@prefix bods: <https://standard.openownership.org/terms#> .";
    assert!(ttl.contains(prefix));
    assert!(ttl.contains("bods:Natural\n  a bods:PersonType"));

    let mut count = 0usize;
    let mut triples = sophia_turtle::parser::turtle::parse_str(&ttl);
    let parsed = triples.try_for_each_triple(|_| -> Result<(), Infallible> {
        count += 1;
        Ok(())
    });
    assert!(parsed.is_ok(), "Turtle did not parse: {:?}", parsed.err());
    assert_eq!(count, g.len());
}
