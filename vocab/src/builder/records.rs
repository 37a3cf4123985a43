//! Statements, declarations and the three record types.

use super::{xsd, BuildError, Mapper, Text};
use crate::iris::{bods, RDFS_LITERAL, RDFS_RESOURCE};

const STATEMENT: &str = "/$defs/Statement";

pub(crate) fn map_statement(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let statement = bods("Statement");
    m.map_class(&statement, STATEMENT);

    // record status codes become kinds of statement
    m.map_types(&statement, &statement, "recordStatus.csv")?;

    m.map_properties(&statement, STATEMENT);
    m.map_properties(
        &statement,
        "/$defs/Statement/properties/publicationDetails",
    );

    m.range("annotation", &bods("Annotation"));
    m.range("publisher", &bods("Agent"));
    m.range("source", &bods("Source"));
    m.range("recordDetails", &bods("RecordDetails"));
    Ok(())
}

pub(crate) fn map_declaration(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let declaration = bods("Declaration");
    m.class(
        &declaration,
        Text::Manual("Declaration"),
        Text::Manual(
            "Each declaration is a set of claims about the entities, people and \
             relationships within the subject\u{2019}s beneficial ownership network.",
        ),
    );

    let decl = "/$defs/Statement/properties/declaration";
    m.property(
        "declarationIdString",
        &declaration,
        Text::Schema(decl),
        Text::Schema(decl),
        Some(RDFS_LITERAL),
    );

    let subject = "/$defs/Statement/properties/declarationSubject";
    m.property(
        "declarationSubject",
        &declaration,
        Text::Schema(subject),
        Text::Schema(subject),
        Some(&bods("Entity")),
    );
    m.range("declarationSubject", &bods("Person"));
    Ok(())
}

pub(crate) fn map_record_details(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let details = "/$defs/Statement/properties/recordDetails";
    m.map_class(&bods("RecordDetails"), details);
    Ok(())
}

pub(crate) fn map_entity(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let entity = bods("Entity");
    m.map_record_class(&entity, "urn:entity", "entity");
    m.subclass(&entity, &bods("RecordDetails"));

    m.map_properties(&entity, "urn:entity");
    m.map_properties(&entity, "/$defs/PublicListing");

    // entityType {type, subtype, details} flattens onto the entity
    m.property(
        "entitySubtype",
        &entity,
        Text::Schema("/properties/entityType/properties/subtype"),
        Text::Schema("/properties/entityType/properties/subtype"),
        Some(&bods("EntitySubtype")),
    );
    m.property(
        "entityTypeDetails",
        &entity,
        Text::Manual("Entity Type Details"),
        Text::Schema("/properties/entityType/properties/details"),
        Some(RDFS_LITERAL),
    );

    // formedByStatute {name, date}: the object itself is renamed to
    // formedByStatuteName, the date gets its own property
    m.property(
        "formedByStatuteDate",
        &entity,
        Text::Manual("Formed by Statute Date"),
        Text::Schema("/properties/formedByStatute/properties/date"),
        Some(&xsd("dateTime")),
    );
    m.range("formedByStatuteName", RDFS_LITERAL);

    m.range("address", &bods("Address"));
    m.range("name", &bods("Name"));
    m.range("alternateName", &bods("Name"));
    m.range("jurisdiction", &bods("Jurisdiction"));
    m.range("identifier", &bods("Identifier"));
    m.range("securitiesListing", &bods("SecuritiesListing"));
    m.range("entityType", &bods("EntityType"));
    m.range("hasPublicListing", &xsd("boolean"));
    m.range("companyFilingsURL", RDFS_RESOURCE);

    m.map_instances(&bods("EntityType"), "entityType.csv")?;
    m.map_instances(&bods("EntitySubtype"), "entitySubtype.csv")?;
    Ok(())
}

pub(crate) fn map_person(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let person = bods("Person");
    m.map_record_class(&person, "urn:person", "person");
    m.subclass(&person, &bods("RecordDetails"));

    m.map_properties(&person, "urn:person");

    m.replace_literal_range("personType", &bods("PersonType"));
    m.range("identifier", &bods("Identifier"));
    m.range("name", &bods("Name"));
    m.range("nationality", &bods("Jurisdiction"));
    m.range("placeOfBirth", &bods("Address"));
    m.range("address", &bods("Address"));
    m.range("taxResidency", &bods("Jurisdiction"));
    m.range("politicalExposure", &bods("PoliticalExposure"));

    // politicalExposure.status flattens to pepStatus
    let status = "/properties/politicalExposure/properties/status";
    m.property(
        "pepStatus",
        &person,
        Text::Schema(status),
        Text::Schema(status),
        Some(&bods("PEPStatus")),
    );

    m.map_instances(&bods("PersonType"), "personType.csv")?;
    Ok(())
}

pub(crate) fn map_relationship(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let relationship = bods("Relationship");
    m.map_record_class(&relationship, "urn:relationship", "relationship");
    m.subclass(&relationship, &bods("RecordDetails"));

    m.map_properties(&relationship, "urn:relationship");

    // subject and interestedParty hold record references in the JSON
    m.replace_literal_range("subject", &bods("Entity"));
    m.replace_literal_range("interestedParty", &bods("Entity"));
    m.range("interestedParty", &bods("Person"));
    m.range("interest", &bods("Interest"));
    Ok(())
}

pub(crate) fn map_unspecified(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let path = "/$defs/UnspecifiedRecord";
    let unspecified = bods("Unspecified");
    m.map_class(&unspecified, path);
    m.subclass(&unspecified, &bods("RecordDetails"));

    m.map_properties(&unspecified, path);
    m.replace_literal_range("unspecifiedReason", &bods("UnspecifiedReason"));

    m.map_instances(&bods("UnspecifiedReason"), "unspecifiedReason.csv")?;
    Ok(())
}
