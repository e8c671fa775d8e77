//! Contract tests for the store client against a mock remote store.

use curator_core::{Alerts, Author, DraftId, ErrorTree, RecordKind};
use curator_store::{
    AlertsUpdate, ObjectStore, PublishOutcome, RemoteStore, StoreConfig, StoreError,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DRAFT: &str = "123e4567-e89b-12d3-a456-426614174010";

fn client_for(server: &MockServer) -> RemoteStore {
    let config = StoreConfig::for_site(server.uri().parse().unwrap(), "test-key");
    RemoteStore::new(config).unwrap()
}

fn draft() -> DraftId {
    DraftId::parse(DRAFT).unwrap()
}

fn envelope(value: serde_json::Value) -> serde_json::Value {
    json!({
        "apiVersion": "1.0",
        "method": "GET",
        "params": {},
        "url": "http://example.org/api/1/datasets",
        "value": value,
    })
}

#[tokio::test]
async fn list_ids_unwraps_the_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/datasets"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!(["id-1", "id-2"]))),
        )
        .mount(&server)
        .await;

    let ids = client_for(&server)
        .list_ids(RecordKind::Dataset)
        .await
        .unwrap();
    assert_eq!(ids, vec!["id-1", "id-2"]);
}

#[tokio::test]
async fn get_record_returns_the_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/datasets/id-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": "id-1",
            "draft_id": "draft-1",
            "name": "comptes-publics",
        }))))
        .mount(&server)
        .await;

    let record = client_for(&server)
        .get_record(RecordKind::Dataset, "id-1")
        .await
        .unwrap();
    assert_eq!(record["name"], json!("comptes-publics"));
}

#[tokio::test]
async fn malformed_envelope_is_a_contract_break() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/datasets/id-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "apiVersion": "0.9",
            "value": {},
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_record(RecordKind::Dataset, "id-1")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidEnvelope { .. }), "{err}");
}

#[tokio::test]
async fn publish_sends_author_draft_and_trees() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/1/datasets/id-1/alert"))
        .and(body_partial_json(json!({
            "api_key": "test-key",
            "author": "check-datasets",
            "draft_id": DRAFT,
            "error": {"name": "Missing value"},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    let mut node = curator_core::NodeBuilder::new();
    node.insert("name", Some(ErrorTree::leaf("Missing value")));
    let update = AlertsUpdate {
        author: Author::new("check-datasets"),
        draft_id: draft(),
        alerts: Alerts::errors(node.finish()),
    };

    let outcome = client_for(&server)
        .publish_alerts(RecordKind::Dataset, "id-1", &update)
        .await
        .unwrap();
    assert_eq!(outcome, PublishOutcome::Updated);
}

#[tokio::test]
async fn conflict_is_absorbed_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/1/datasets/id-1/alert"))
        .respond_with(ResponseTemplate::new(409))
        .expect(1) // exactly one call: no retry
        .mount(&server)
        .await;

    let update = AlertsUpdate {
        author: Author::new("check-datasets"),
        draft_id: draft(),
        alerts: Alerts::none(),
    };

    let outcome = client_for(&server)
        .publish_alerts(RecordKind::Dataset, "id-1", &update)
        .await
        .unwrap();
    assert_eq!(outcome, PublishOutcome::Conflict);
}

#[tokio::test]
async fn server_error_is_fatal_for_the_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/1/datasets/id-1/alert"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let update = AlertsUpdate {
        author: Author::new("check-datasets"),
        draft_id: draft(),
        alerts: Alerts::none(),
    };

    let err = client_for(&server)
        .publish_alerts(RecordKind::Dataset, "id-1", &update)
        .await
        .unwrap_err();
    match err {
        StoreError::ApiError { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected ApiError, got: {other}"),
    }
}

#[tokio::test]
async fn organization_records_use_their_own_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(&server)
        .await;

    let ids = client_for(&server)
        .list_ids(RecordKind::Organization)
        .await
        .unwrap();
    assert!(ids.is_empty());
}
