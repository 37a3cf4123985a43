//! Component and value types shared by the record types.

use super::{xsd, BuildError, Mapper, Text};
use crate::iris::{bods, RDFS_LITERAL, RDFS_RESOURCE};

pub(crate) fn map_interest(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let path = "/$defs/Interest";
    let interest = bods("Interest");
    m.map_class(&interest, path);

    let interest_type = bods("InterestType");
    m.map_types(&interest, &interest_type, "interestType.csv")?;
    let type_path = "/$defs/Interest/properties/type";
    let text = Text::Schema(type_path);
    m.class(&interest_type, text, text);

    m.map_properties(&interest, path);
    // share {exact, minimum, ...} flattens to shareExact, shareMinimum, ...
    m.map_properties(&interest, "/$defs/Interest/properties/share");

    m.range("beneficialOwnershipOrControl", &xsd("boolean"));
    for share in [
        "shareMaximum",
        "shareMinimum",
        "shareExact",
        "shareExclusiveMaximum",
        "shareExclusiveMinimum",
    ] {
        m.range(share, &xsd("float"));
    }

    m.map_instances(&bods("DirectOrIndirect"), "directOrIndirect.csv")?;
    m.replace_literal_range("directOrIndirect", &bods("DirectOrIndirect"));
    Ok(())
}

pub(crate) fn map_address(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let path = "/$defs/Address";
    let address = bods("Address");
    m.map_class(&address, path);

    let address_type = bods("AddressType");
    m.map_types(&address, &address_type, "addressType.csv")?;
    let type_path = "/$defs/Address/properties/type";
    let text = Text::Schema(type_path);
    m.class(&address_type, text, text);

    m.map_properties(&address, path);
    m.range("country", &bods("Jurisdiction"));
    Ok(())
}

/// Agent is a vocabulary class with no counterpart in the JSON schema.
pub(crate) fn map_agent(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let agent = bods("Agent");
    m.class(
        &agent,
        Text::Manual("Agent"),
        Text::Manual(
            "A person or organisation that publishes, creates or asserts information.",
        ),
    );
    m.property(
        "agentName",
        &agent,
        Text::Manual("Agent name"),
        Text::Manual("The name of the agent responsible for this action"),
        Some(RDFS_LITERAL),
    );
    m.property(
        "agentUri",
        &agent,
        Text::Manual("Agent URI"),
        Text::Manual("A globally unique identifier or URL for this agent"),
        Some(RDFS_RESOURCE),
    );
    Ok(())
}

pub(crate) fn map_annotation(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let path = "/$defs/Annotation";
    let annotation = bods("Annotation");
    m.map_class(&annotation, path);
    m.map_instances(&bods("AnnotationMotivation"), "annotationMotivation.csv")?;

    m.map_properties(&annotation, path);

    m.replace_literal_range("motivation", &bods("AnnotationMotivation"));
    m.range("createdBy", &bods("Agent"));
    Ok(())
}

pub(crate) fn map_jurisdiction(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let path = "/$defs/Jurisdiction";
    let jurisdiction = bods("Jurisdiction");
    m.map_class(&jurisdiction, path);
    m.map_properties(&jurisdiction, path);
    Ok(())
}

pub(crate) fn map_identifier(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let path = "/$defs/Identifier";
    let identifier = bods("Identifier");
    m.map_class(&identifier, path);
    m.map_properties(&identifier, path);
    Ok(())
}

pub(crate) fn map_name(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let path = "/$defs/Name";
    let name = bods("Name");
    m.map_class(&name, path);

    let name_type = bods("NameType");
    m.map_types(&name, &name_type, "nameType.csv")?;
    let type_path = "/$defs/Name/properties/type";
    m.class(&name_type, Text::Schema(type_path), Text::Schema(type_path));

    m.map_properties(&name, path);
    Ok(())
}

/// PEP status values are an enum in the schema, not a codelist, so the three
/// individuals are declared by hand.
pub(crate) fn map_pep_status(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let pep_status = bods("PEPStatus");
    let path = "/properties/politicalExposure/properties/status";
    m.map_class(&pep_status, path);

    m.individual(
        "NotPEP",
        &pep_status,
        "Not a PEP",
        "The person is not a politically exposed person (status value isNotPep).",
    );
    m.individual(
        "PEP",
        &pep_status,
        "PEP",
        "The person is a politically exposed person (status value isPep).",
    );
    m.individual(
        "PEPMissing",
        &pep_status,
        "PEP status unknown",
        "Whether the person is politically exposed is not known (status value unknown).",
    );
    Ok(())
}

pub(crate) fn map_political_exposure(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let path = "/$defs/PepStatusDetails";
    let exposure = bods("PoliticalExposure");
    m.map_class(&exposure, path);
    m.map_properties(&exposure, path);

    m.range("source", &bods("Source"));
    m.range("jurisdiction", &bods("Jurisdiction"));
    Ok(())
}

pub(crate) fn map_source(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let path = "/$defs/Source";
    let source = bods("Source");
    m.map_class(&source, path);
    m.map_properties(&source, path);

    // the excluded `type` array becomes sourceType
    let type_path = "/$defs/Source/properties/type";
    m.map_instances(&bods("SourceType"), "sourceType.csv")?;
    m.property(
        "sourceType",
        &source,
        Text::Schema(type_path),
        Text::Schema(type_path),
        Some(&bods("SourceType")),
    );

    m.replace_literal_range("retrievedAt", &xsd("dateTime"));
    m.range("assertedBy", &bods("Agent"));
    Ok(())
}

pub(crate) fn map_securities_listing(m: &mut Mapper<'_>) -> Result<(), BuildError> {
    let path = "/$defs/SecuritiesListing";
    let listing = bods("SecuritiesListing");
    m.map_class(&listing, path);
    m.map_properties(&listing, path);

    // security {idScheme, id} flattens onto the listing
    let scheme_path = "/$defs/SecuritiesListing/properties/security/properties/idScheme";
    let id_path = "/$defs/SecuritiesListing/properties/security/properties/id";
    let scheme = bods("SecuritiesIdentifierScheme");
    m.map_instances(&scheme, "securitiesIdentifierSchemes.csv")?;
    m.property(
        "securityIdScheme",
        &listing,
        Text::Schema(scheme_path),
        Text::Schema(scheme_path),
        Some(&scheme),
    );
    m.property(
        "securityId",
        &listing,
        Text::Schema(id_path),
        Text::Schema(id_path),
        Some(RDFS_LITERAL),
    );
    Ok(())
}
