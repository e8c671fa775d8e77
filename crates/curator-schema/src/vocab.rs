//! # Controlled Vocabularies
//!
//! The fixed enumerated sets the schemas validate against. These are data,
//! not logic: each table is shared by every record of its kind and is the
//! single place a new code gets added.

/// License identifiers accepted on a dataset.
pub static LICENSE_IDS: [&str; 10] = [
    "cc-by",      // Creative Commons Attribution
    "cc-by-sa",   // Creative Commons Attribution Share-Alike
    "cc-zero",    // Creative Commons CCZero
    "fr-lo",      // Licence Ouverte / Open Licence
    "odc-by",     // Open Data Commons Attribution License
    "odc-odbl",   // Open Data Commons Open Database License (ODbL)
    "odc-pddl",   // Open Data Commons Public Domain Dedication and Licence
    "other-at",   // Other (Attribution)
    "other-open", // Other (Open)
    "other-pd",   // Other (Public Domain)
];

/// Resource formats accepted, uppercase. Deprecated compressed variants
/// (`KMLZ`, `SVGZ`, `XLSX`) are rejected separately with a message naming
/// the preferred replacement.
pub static RESOURCE_FORMATS: [&str; 33] = [
    "CSV", "DOC", "DXF", "GEOJSON", "GML", "GPX", "GTFS", "GZ", "HTML", "JPG", "JSON", "KML",
    "MID", "MIF", "ODS", "ODT", "PDF", "PNG", "PPT", "RDF", "RSS", "RTF", "SVG", "SHP", "SQL",
    "TIFF", "TXT", "WFS", "WMS", "XLS", "XML", "XSD", "ZIP",
];

/// Update frequencies accepted on a dataset.
pub static UPDATE_FREQUENCIES: [&str; 13] = [
    "annuelle",
    "aucune",
    "bimensuelle",
    "bimestrielle",
    "hebdomadaire",
    "mensuelle",
    "ponctuelle",
    "quinquennale",
    "quotidienne",
    "semestrielle",
    "temps réel",
    "triennale",
    "trimestrielle",
];

/// The frequency code that waives the temporal-coverage-from requirement.
pub const REALTIME_FREQUENCY: &str = "temps réel";

/// Territory types accepted in a `TYPE/VALUE` territorial-coverage pair.
pub static TERRITORY_TYPES: [&str; 23] = [
    "ArrondissementOfFrance",
    "AssociatedCommuneOfFrance",
    "CantonalFractionOfCommuneOfFrance",
    "CantonCityOfFrance",
    "CantonOfFrance",
    "CatchmentAreaOfFrance",
    "CommuneOfFrance",
    "Country",
    "DepartmentOfFrance",
    "EmploymentAreaOfFrance",
    "IntercommunalityOfFrance",
    "InternationalOrganization",
    "JusticeAreaOfFrance",
    "MetropoleOfCountry",
    "Mountain",
    "OverseasCollectivityOfFrance",
    "OverseasOfCountry",
    "PaysOfFrance",
    "RegionalNatureParkOfFrance",
    "RegionOfFrance",
    "UrbanAreaOfFrance",
    "UrbanTransportsPerimeterOfFrance",
    "UrbanUnitOfFrance",
];

/// Territorial-coverage granularities accepted on a dataset.
pub static COVERAGE_GRANULARITIES: [&str; 8] = [
    "canton", "commune", "department", "epci", "france", "iris", "poi", "region",
];

/// Kinds of related document accepted on a dataset.
pub static RELATED_TYPES: [&str; 7] = [
    "api",
    "application",
    "idea",
    "news_article",
    "paper",
    "post",
    "visualization",
];

/// Resource types accepted on a dataset resource.
pub static RESOURCE_TYPES: [&str; 3] = ["api", "file", "file.upload"];
