//! The declarative list of mapping steps.
//!
//! Each step maps one record or value type of the standard. Steps declare the
//! steps they depend on; a [`BuildPlan`] is always closed under dependencies
//! and ordered canonically, so a selective build is just a shorter plan.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{components, records, BuildError, Mapper};

/// One mapping routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MappingStep {
    /// `Statement`, record status subclasses, publication details.
    Statement,
    /// The hand-authored `Declaration` class.
    Declaration,
    /// `RecordDetails`, parent of the three record types.
    RecordDetails,
    /// `PEPStatus` and its three fixed individuals.
    PepStatus,
    /// `Entity` with flattened entity type and statute fields.
    Entity,
    /// `Person` with flattened PEP status.
    Person,
    /// `Relationship`.
    Relationship,
    /// `Unspecified` records and unspecified reasons.
    UnspecifiedRecord,
    /// `PoliticalExposure` details.
    PoliticalExposure,
    /// `Interest`, interest types and flattened share fields.
    Interest,
    /// `Address` and address types.
    Address,
    /// The hand-authored `Agent` class.
    Agent,
    /// `Annotation` and annotation motivations.
    Annotation,
    /// `Jurisdiction`.
    Jurisdiction,
    /// `Identifier`.
    Identifier,
    /// `Name` and name types.
    Name,
    /// `Source` and source types.
    Source,
    /// `SecuritiesListing` and securities identifier schemes.
    SecuritiesListing,
}

impl MappingStep {
    /// Every step in canonical order. Each step appears after its dependencies.
    pub const ALL: [MappingStep; 18] = [
        MappingStep::Statement,
        MappingStep::Declaration,
        MappingStep::RecordDetails,
        MappingStep::PepStatus,
        MappingStep::Entity,
        MappingStep::Person,
        MappingStep::Relationship,
        MappingStep::UnspecifiedRecord,
        MappingStep::PoliticalExposure,
        MappingStep::Interest,
        MappingStep::Address,
        MappingStep::Agent,
        MappingStep::Annotation,
        MappingStep::Jurisdiction,
        MappingStep::Identifier,
        MappingStep::Name,
        MappingStep::Source,
        MappingStep::SecuritiesListing,
    ];

    /// Stable kebab-case name used on the command line and in config files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MappingStep::Statement => "statement",
            MappingStep::Declaration => "declaration",
            MappingStep::RecordDetails => "record-details",
            MappingStep::PepStatus => "pep-status",
            MappingStep::Entity => "entity",
            MappingStep::Person => "person",
            MappingStep::Relationship => "relationship",
            MappingStep::UnspecifiedRecord => "unspecified-record",
            MappingStep::PoliticalExposure => "political-exposure",
            MappingStep::Interest => "interest",
            MappingStep::Address => "address",
            MappingStep::Agent => "agent",
            MappingStep::Annotation => "annotation",
            MappingStep::Jurisdiction => "jurisdiction",
            MappingStep::Identifier => "identifier",
            MappingStep::Name => "name",
            MappingStep::Source => "source",
            MappingStep::SecuritiesListing => "securities-listing",
        }
    }

    /// Steps that must run in the same build for this step's subclass axioms to
    /// point at declared classes.
    #[must_use]
    pub fn depends_on(self) -> &'static [MappingStep] {
        match self {
            MappingStep::Entity | MappingStep::Relationship | MappingStep::UnspecifiedRecord => {
                &[MappingStep::RecordDetails]
            }
            MappingStep::Person => &[MappingStep::RecordDetails, MappingStep::PepStatus],
            _ => &[],
        }
    }

    pub(crate) fn run(self, m: &mut Mapper<'_>) -> Result<(), BuildError> {
        match self {
            MappingStep::Statement => records::map_statement(m),
            MappingStep::Declaration => records::map_declaration(m),
            MappingStep::RecordDetails => records::map_record_details(m),
            MappingStep::PepStatus => components::map_pep_status(m),
            MappingStep::Entity => records::map_entity(m),
            MappingStep::Person => records::map_person(m),
            MappingStep::Relationship => records::map_relationship(m),
            MappingStep::UnspecifiedRecord => records::map_unspecified(m),
            MappingStep::PoliticalExposure => components::map_political_exposure(m),
            MappingStep::Interest => components::map_interest(m),
            MappingStep::Address => components::map_address(m),
            MappingStep::Agent => components::map_agent(m),
            MappingStep::Annotation => components::map_annotation(m),
            MappingStep::Jurisdiction => components::map_jurisdiction(m),
            MappingStep::Identifier => components::map_identifier(m),
            MappingStep::Name => components::map_name(m),
            MappingStep::Source => components::map_source(m),
            MappingStep::SecuritiesListing => components::map_securities_listing(m),
        }
    }
}

impl fmt::Display for MappingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An unknown step name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown mapping step {0:?}")]
pub struct PlanError(pub String);

impl FromStr for MappingStep {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MappingStep::ALL
            .into_iter()
            .find(|step| step.name() == s)
            .ok_or_else(|| PlanError(s.to_string()))
    }
}

/// The steps enabled for one build, closed under dependencies, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    steps: Vec<MappingStep>,
}

impl Default for BuildPlan {
    fn default() -> Self {
        Self::full()
    }
}

impl BuildPlan {
    /// Every step.
    #[must_use]
    pub fn full() -> Self {
        Self {
            steps: MappingStep::ALL.to_vec(),
        }
    }

    /// The given steps plus everything they transitively depend on.
    pub fn select(steps: impl IntoIterator<Item = MappingStep>) -> Self {
        let mut wanted: Vec<MappingStep> = steps.into_iter().collect();
        let mut i = 0;
        while i < wanted.len() {
            for dep in wanted[i].depends_on() {
                if !wanted.contains(dep) {
                    wanted.push(*dep);
                }
            }
            i += 1;
        }
        Self {
            steps: MappingStep::ALL
                .into_iter()
                .filter(|step| wanted.contains(step))
                .collect(),
        }
    }

    /// Parses step names and selects them.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] for the first unknown name.
    pub fn from_names<S: AsRef<str>>(
        names: impl IntoIterator<Item = S>,
    ) -> Result<Self, PlanError> {
        let steps = names
            .into_iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<MappingStep>, _>>()?;
        Ok(Self::select(steps))
    }

    /// The enabled steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[MappingStep] {
        &self.steps
    }
}
