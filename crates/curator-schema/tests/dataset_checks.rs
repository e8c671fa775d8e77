//! End-to-end checks of the dataset error and warning passes against a
//! realistic record, mirroring how the reconciler drives them.

use curator_convert::Context;
use curator_schema::check_dataset;
use curator_schema::dataset::{DATASET_ERROR_SCHEMA, DATASET_WARNING_SCHEMA};
use serde_json::{json, Value};

/// A dataset that satisfies both passes.
fn clean_dataset() -> Value {
    json!({
        "draft_id": "123e4567-e89b-12d3-a456-426614174010",
        "id": "123e4567-e89b-12d3-a456-426614174000",
        "name": "comptes-publics",
        "title": "Comptes Publics De La Nation",
        "notes": "Soldes des administrations publiques.",
        "frequency": "annuelle",
        "temporal_coverage_from": "2010",
        "temporal_coverage_to": "2012",
        "territorial_coverage": "Country/FR,DepartmentOfFrance/75",
        "territorial_coverage_granularity": "france",
        "license_id": "fr-lo",
        "license_title": "Licence Ouverte",
        "isopen": true,
        "metadata_created": "2013-04-02",
        "metadata_modified": "2013-06-11",
        "revision_id": "123e4567-e89b-12d3-a456-426614174001",
        "revision_timestamp": "2013-06-11T10:00:00Z",
        "timestamp": "2013-07-01T08:30:00Z",
        "state": "active",
        "type": "dataset",
        "groups": [{
            "id": "123e4567-e89b-12d3-a456-426614174002",
            "name": "economie",
            "title": "Economie Et Emploi",
            "description": "Comptes et budgets publics.",
        }],
        "tags": [{"name": "finances"}],
        "resources": [{
            "created": "2013-04-02",
            "description": "Export au format CSV.",
            "format": "CSV",
            "id": "123e4567-e89b-12d3-a456-426614174003",
            "name": "comptes.csv",
            "position": 0,
            "resource_group_id": "123e4567-e89b-12d3-a456-426614174004",
            "revision_id": "123e4567-e89b-12d3-a456-426614174005",
            "revision_timestamp": "2013-06-11T10:00:00Z",
            "state": "active",
            "tracking_summary": {"recent": 2, "total": 10},
            "url": "http://example.org/comptes.csv",
        }],
        "url": "http://example.org/datasets/comptes-publics",
    })
}

#[test]
fn clean_dataset_has_no_alerts() {
    let alerts = check_dataset(&clean_dataset());
    assert_eq!(alerts.error, None, "unexpected errors: {:?}", alerts.error);
    assert_eq!(alerts.warning, None, "unexpected warnings: {:?}", alerts.warning);
}

#[test]
fn validation_is_idempotent() {
    let dataset = clean_dataset();
    assert_eq!(check_dataset(&dataset), check_dataset(&dataset));
}

#[test]
fn missing_resource_url_is_an_error() {
    let mut dataset = clean_dataset();
    dataset["resources"][0]
        .as_object_mut()
        .unwrap()
        .remove("url");
    let alerts = check_dataset(&dataset);
    let error = alerts.error.expect("error pass must flag the resource");
    assert_eq!(
        error
            .get("resources")
            .and_then(|t| t.get_index(0))
            .and_then(|t| t.get("url"))
            .and_then(|t| t.as_leaf()),
        Some("Missing value"),
    );
}

#[test]
fn malformed_dataset_url_is_an_error() {
    let mut dataset = clean_dataset();
    dataset["url"] = json!("/datasets/comptes-publics");
    let alerts = check_dataset(&dataset);
    assert_eq!(
        alerts.error.unwrap().get("url").unwrap().as_leaf(),
        Some("URL must be complete"),
    );
}

#[test]
fn territorial_coverage_flags_only_the_bad_pair() {
    let mut dataset = clean_dataset();
    dataset["territorial_coverage"] = json!("Country/FR,BadType/75");
    let alerts = check_dataset(&dataset);
    let warning = alerts.warning.unwrap();
    let coverage = warning.get("territorial_coverage").unwrap();
    assert!(coverage.get_index(0).is_none(), "index 0 is valid");
    assert_eq!(
        coverage
            .get_index(1)
            .and_then(|t| t.get_index(0))
            .and_then(|t| t.as_leaf()),
        Some("Invalid territory type"),
    );
}

#[test]
fn pair_without_separator_is_invalid_territory() {
    let mut dataset = clean_dataset();
    dataset["territorial_coverage"] = json!("Country-FR");
    let alerts = check_dataset(&dataset);
    assert_eq!(
        alerts
            .warning
            .unwrap()
            .get("territorial_coverage")
            .and_then(|t| t.get_index(0))
            .and_then(|t| t.as_leaf()),
        Some("Invalid territory"),
    );
}

#[test]
fn deprecated_format_names_its_replacement() {
    let mut dataset = clean_dataset();
    dataset["resources"][0]["format"] = json!("XLSX");
    let alerts = check_dataset(&dataset);
    assert_eq!(
        alerts
            .warning
            .unwrap()
            .get("resources")
            .and_then(|t| t.get_index(0))
            .and_then(|t| t.get("format"))
            .and_then(|t| t.as_leaf()),
        Some("Invalid format; use \"XLS\" instead"),
    );
}

#[test]
fn format_membership_is_case_insensitive() {
    let mut dataset = clean_dataset();
    dataset["resources"][0]["format"] = json!("csv");
    let alerts = check_dataset(&dataset);
    assert_eq!(alerts.warning, None, "{:?}", alerts.warning);
}

#[test]
fn short_title_is_flagged() {
    let mut dataset = clean_dataset();
    dataset["title"] = json!("Short");
    let alerts = check_dataset(&dataset);
    assert_eq!(
        alerts.warning.unwrap().get("title").unwrap().as_leaf(),
        Some("String is too short"),
    );
}

#[test]
fn title_with_embedded_year_is_flagged() {
    let mut dataset = clean_dataset();
    dataset["title"] = json!("Rapport Public 2021");
    let alerts = check_dataset(&dataset);
    assert_eq!(
        alerts.warning.unwrap().get("title").unwrap().as_leaf(),
        Some("String contains a year"),
    );
}

#[test]
fn temporal_coverage_required_unless_realtime() {
    let mut dataset = clean_dataset();
    dataset.as_object_mut().unwrap().remove("temporal_coverage_from");
    let alerts = check_dataset(&dataset);
    assert_eq!(
        alerts
            .warning
            .unwrap()
            .get("temporal_coverage_from")
            .unwrap()
            .as_leaf(),
        Some("Missing value"),
    );

    let mut realtime = clean_dataset();
    realtime.as_object_mut().unwrap().remove("temporal_coverage_from");
    realtime["frequency"] = json!("temps réel");
    assert_eq!(check_dataset(&realtime).warning, None);
}

#[test]
fn invalid_frequency_suppresses_the_cross_field_rule() {
    let mut dataset = clean_dataset();
    dataset.as_object_mut().unwrap().remove("temporal_coverage_from");
    dataset["frequency"] = json!("souvent");
    let alerts = check_dataset(&dataset);
    let warning = alerts.warning.unwrap();
    assert_eq!(
        warning.get("frequency").unwrap().as_leaf(),
        Some("Invalid frequency"),
    );
    assert!(
        warning.get("temporal_coverage_from").is_none(),
        "the cross-field rule must not fire on an already-flagged frequency",
    );
}

#[test]
fn unlisted_field_is_rejected_by_the_warning_pass() {
    let mut dataset = clean_dataset();
    dataset["num_followers"] = json!(5);
    let alerts = check_dataset(&dataset);
    assert_eq!(
        alerts.warning.unwrap().get("num_followers").unwrap().as_leaf(),
        Some("Unexpected item"),
    );
}

#[test]
fn warning_tree_mirrors_the_validated_shape() {
    let mut dataset = clean_dataset();
    dataset["territorial_coverage"] = json!("Country/FR,BadType/75");
    dataset["resources"][0]["format"] = json!("XLSX");
    dataset["title"] = json!("Short");

    let ctx = Context::new();
    let error_verified = DATASET_ERROR_SCHEMA.apply(dataset, &ctx);
    assert!(error_verified.is_ok());
    let outcome = DATASET_WARNING_SCHEMA.apply(error_verified.value, &ctx);
    let warning = outcome.error.expect("warnings expected");
    assert!(warning.mirrors_shape_of(&outcome.value));
}

#[test]
fn tag_rules_apply_per_element() {
    let mut dataset = clean_dataset();
    dataset["tags"] = json!([{"name": "finances"}, {"name": "Fi"}]);
    let alerts = check_dataset(&dataset);
    let tags = alerts.warning.unwrap().get("tags").cloned().unwrap();
    assert!(tags.get_index(0).is_none());
    assert_eq!(
        tags.get_index(1).and_then(|t| t.get("name")).and_then(|t| t.as_leaf()),
        Some("String must contain only lowercase characters"),
    );
}
