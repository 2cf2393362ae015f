//! Analysis service transport.
//!
//! Endpoint: `POST {base_url}/api/analyze` with a JSON `Query` body.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

use coscientist_common::config::EndpointConfig;
use coscientist_common::models::ErrorPayload;
use coscientist_common::{AnalysisResult, Query};

use crate::error::{SubmitError, REQUEST_FAILED};

/// Issues the one network call of a submission cycle.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn analyze(&self, query: &Query) -> Result<AnalysisResult, SubmitError>;
}

#[derive(Debug, Deserialize)]
struct HealthPayload {
    status: String,
}

pub struct HttpTransport {
    client: Client,
    analyze_url: Url,
    health_url: Url,
}

impl HttpTransport {
    pub fn new(endpoint: &EndpointConfig) -> coscientist_common::error::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = endpoint.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            analyze_url: endpoint.analyze_url()?,
            health_url: endpoint.health_url()?,
        })
    }

    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }

    /// `GET /api/health`; returns the reported status (normally "ok").
    #[instrument(skip(self), fields(url = %self.health_url))]
    pub async fn health(&self) -> Result<String, SubmitError> {
        let resp = self.client.get(self.health_url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SubmitError::Request {
                status: status.as_u16(),
                detail: format!("health check returned {}", status),
            });
        }
        let payload = resp.json::<HealthPayload>().await?;
        Ok(payload.status)
    }
}

#[async_trait]
impl AnalysisTransport for HttpTransport {
    #[instrument(skip(self, query), fields(query = %query.query, organism = %query.organism))]
    async fn analyze(&self, query: &Query) -> Result<AnalysisResult, SubmitError> {
        let resp = self.client
            .post(self.analyze_url.clone())
            .json(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let payload = resp.json::<ErrorPayload>().await.ok();
            let detail = payload
                .as_ref()
                .and_then(ErrorPayload::detail_text)
                .unwrap_or(REQUEST_FAILED)
                .to_string();
            warn!(status = status.as_u16(), %detail, "Analysis request rejected");
            return Err(SubmitError::Request { status: status.as_u16(), detail });
        }

        let body = resp.bytes().await?;
        let result: AnalysisResult = serde_json::from_slice(&body)
            .map_err(|e| SubmitError::Transport(format!("malformed analysis response: {}", e)))?;

        debug!(
            entries = result.entries.len(),
            hypotheses = result.hypotheses.len(),
            tasks = result.tasks.len(),
            "Analysis response decoded"
        );
        Ok(result)
    }
}
