//! ---
//! pw_section: "05-networking-external-interfaces"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Polling client for the three read-only endpoints."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
//! HTTP client for the PlantWatch backend. Every poll is an independent GET
//! with no timeout, no retry, and no backoff; the next scheduled tick is the
//! retry mechanism. Transport failures and non-2xx statuses surface as
//! [`ClientError`], payload shape problems come back as soft
//! [`FieldIssue`]s alongside the decoded snapshot.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

use plantwatch_model::{FieldIssue, FleetSnapshot, PlantSnapshot, PowerHistory};

/// Uniform fetch-error taxonomy: every poll failure is one of these.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure (connect, DNS, body read).
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    /// The backend answered outside the 2xx range.
    #[error("unexpected http status {code}")]
    Status {
        /// Status code the backend returned.
        code: StatusCode,
    },
    /// The body was not valid JSON at all.
    #[error("response body is not valid json: {0}")]
    Decode(#[from] serde_json::Error),
    /// The endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
}

/// Read-only client over the backend's live endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client rooted at `base`, e.g. `http://127.0.0.1:8080/`.
    pub fn new(base: Url) -> Self {
        Self {
            base,
            http: reqwest::Client::new(),
        }
    }

    /// `GET /api/master/live`
    pub async fn fleet_live(&self) -> Result<(FleetSnapshot, Vec<FieldIssue>), ClientError> {
        let value = self.get_json("api/master/live").await?;
        Ok(FleetSnapshot::from_value(value)?)
    }

    /// `GET /api/plant/{id}/details`
    pub async fn plant_details(
        &self,
        plant_id: u32,
    ) -> Result<(PlantSnapshot, Vec<FieldIssue>), ClientError> {
        let value = self
            .get_json(&format!("api/plant/{plant_id}/details"))
            .await?;
        Ok(PlantSnapshot::from_value(value)?)
    }

    /// `GET /api/plant/{id}/history`
    pub async fn plant_history(
        &self,
        plant_id: u32,
    ) -> Result<(PowerHistory, Vec<FieldIssue>), ClientError> {
        let value = self
            .get_json(&format!("api/plant/{plant_id}/history"))
            .await?;
        Ok(PowerHistory::from_value(value)?)
    }

    async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let url = self.base.join(path)?;
        debug!(%url, "polling endpoint");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { code: status });
        }
        let body = response.bytes().await.map_err(ClientError::Transport)?;
        Ok(serde_json::from_slice(&body)?)
    }
}
