//! Namespaces, datatypes and the fixed prefix preamble shared by the generated Turtle files.

use oxigraph::model::NamedNodeRef;

pub const NAMESPACE: &str = "http://example.org/sport-hlm#";
pub const RDFS_NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

// xsd datatypes used for typed literals
pub const XSD_GYEAR: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#gYear");
pub const XSD_DECIMAL: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#decimal");

/// Prefix declarations written at the top of every generated file, followed by a blank line.
pub const PREFIXES: &str = "@prefix : <http://example.org/sport-hlm#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

";

/// Language tag of every `rdfs:label`.
pub const LABEL_LANGUAGE: &str = "fr";

// local names of the classes emitted by the generators
pub const REGION: &str = "Region";
pub const DEPARTMENT: &str = "Department";
pub const HOUSING_DATA: &str = "HousingData";
pub const POPULATION_GROUP: &str = "PopulationGroup";
pub const SPORT: &str = "Sport";
pub const SPORT_PARTICIPATION: &str = "SportParticipation";

// resource name prefixes
pub const REGION_PREFIX: &str = "Region_";
pub const DEPARTMENT_PREFIX: &str = "Department_";
pub const HOUSING_DATA_PREFIX: &str = "HousingData_";
pub const POPULATION_GROUP_PREFIX: &str = "PopGroup_";
pub const SPORT_PREFIX: &str = "Sport_";
pub const SPORT_PARTICIPATION_PREFIX: &str = "SportPart_";

pub const HAS_HOUSING_DATA: &str = "hasHousingData";
