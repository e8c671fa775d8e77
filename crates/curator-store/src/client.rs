//! # Object Store Contract and HTTP Implementation
//!
//! [`ObjectStore`] is the seam the reconciliation engine works against;
//! [`RemoteStore`] is the `reqwest`-backed implementation. Tests substitute
//! spy implementations to observe exactly which publish calls are issued.

use std::future::Future;
use std::time::Duration;

use curator_core::{Alerts, Author, DraftId, RecordKind};
use serde_json::{json, Map, Value};
use url::Url;

use crate::config::StoreConfig;
use crate::envelope;
use crate::error::StoreError;

/// The payload of one publish call: which author is writing, the draft the
/// record was fetched at, and the fresh alert trees. A clean record
/// publishes empty alerts, clearing this author's previous entries.
#[derive(Debug, Clone)]
pub struct AlertsUpdate {
    /// The validator identity owning the published sub-tree.
    pub author: Author,
    /// Optimistic-concurrency token from the fetched record.
    pub draft_id: DraftId,
    /// Freshly computed alert trees.
    pub alerts: Alerts,
}

/// How a publish call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The store accepted the new alert trees.
    Updated,
    /// The record changed between fetch and publish; the update was
    /// abandoned. A future cycle will re-validate the newer version.
    Conflict,
}

/// Contract with the remote object store.
pub trait ObjectStore: Send + Sync {
    /// List the ids of every record of a kind.
    fn list_ids(
        &self,
        kind: RecordKind,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Fetch one record by id.
    fn get_record(
        &self,
        kind: RecordKind,
        id: &str,
    ) -> impl Future<Output = Result<Value, StoreError>> + Send;

    /// Publish fresh alert trees for one record.
    fn publish_alerts(
        &self,
        kind: RecordKind,
        id: &str,
        update: &AlertsUpdate,
    ) -> impl Future<Output = Result<PublishOutcome, StoreError>> + Send;
}

/// `reqwest`-backed store client.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    http: reqwest::Client,
    config: StoreConfig,
}

impl RemoteStore {
    /// Build a client from configuration: one HTTP client with the
    /// configured User-Agent and timeout, shared by every call.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| StoreError::Http {
                endpoint: "client_init".to_string(),
                source,
            })?;
        Ok(Self { http, config })
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, StoreError> {
        self.config
            .site_url
            .join(path)
            .map_err(|source| StoreError::ApiError {
                endpoint: path.to_string(),
                status: 0,
                body: format!("cannot build endpoint URL: {source}"),
            })
    }

    async fn get_value(&self, path: String) -> Result<Value, StoreError> {
        let url = self.endpoint_url(&path)?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| StoreError::Http {
                endpoint: path.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| StoreError::Http {
            endpoint: path.clone(),
            source,
        })?;
        if !status.is_success() {
            return Err(StoreError::ApiError {
                endpoint: path,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: Value =
            serde_json::from_str(&body).map_err(|source| StoreError::Deserialization {
                endpoint: path.clone(),
                source,
            })?;
        envelope::extract_value(&path, parsed)
    }
}

impl ObjectStore for RemoteStore {
    fn list_ids(
        &self,
        kind: RecordKind,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send {
        async move {
            let path = format!("api/1/{}", kind.collection());
            let value = self.get_value(path.clone()).await?;
            serde_json::from_value(value).map_err(|source| StoreError::Deserialization {
                endpoint: path,
                source,
            })
        }
    }

    fn get_record(
        &self,
        kind: RecordKind,
        id: &str,
    ) -> impl Future<Output = Result<Value, StoreError>> + Send {
        let path = format!("api/1/{}/{id}", kind.collection());
        async move { self.get_value(path).await }
    }

    fn publish_alerts(
        &self,
        kind: RecordKind,
        id: &str,
        update: &AlertsUpdate,
    ) -> impl Future<Output = Result<PublishOutcome, StoreError>> + Send {
        let path = format!("api/1/{}/{id}/alert", kind.collection());
        let body = publish_body(&self.config.api_key, update);
        async move {
            let url = self.endpoint_url(&path)?;
            let response = self
                .http
                .post(url)
                .json(&body)
                .send()
                .await
                .map_err(|source| StoreError::Http {
                    endpoint: path.clone(),
                    source,
                })?;

            let status = response.status();
            if status.as_u16() == 409 {
                tracing::info!(endpoint = %path, "record changed since fetch, alerts ignored");
                return Ok(PublishOutcome::Conflict);
            }

            let text = response.text().await.map_err(|source| StoreError::Http {
                endpoint: path.clone(),
                source,
            })?;
            if !status.is_success() {
                tracing::error!(
                    endpoint = %path,
                    status = status.as_u16(),
                    body = %text,
                    "publish failed",
                );
                return Err(StoreError::ApiError {
                    endpoint: path,
                    status: status.as_u16(),
                    body: text,
                });
            }

            let parsed: Value =
                serde_json::from_str(&text).map_err(|source| StoreError::Deserialization {
                    endpoint: path.clone(),
                    source,
                })?;
            envelope::extract_value(&path, parsed)?;
            Ok(PublishOutcome::Updated)
        }
    }
}

/// Assemble the publish body: credentials, authorship, concurrency token,
/// then one key per non-empty severity.
fn publish_body(api_key: &str, update: &AlertsUpdate) -> Value {
    let mut body = Map::new();
    body.insert("api_key".to_string(), json!(api_key));
    body.insert("author".to_string(), json!(update.author.as_str()));
    body.insert("draft_id".to_string(), json!(update.draft_id));
    if let Some(tree) = &update.alerts.error {
        body.insert("error".to_string(), tree.to_value());
    }
    if let Some(tree) = &update.alerts.warning {
        body.insert("warning".to_string(), tree.to_value());
    }
    Value::Object(body)
}
