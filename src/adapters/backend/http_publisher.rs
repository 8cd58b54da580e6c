//! HTTP submission backend.
//!
//! Posts the draft as JSON to a configured endpoint; the wire contract is
//! the request/response pair below, transport details stay in here.

use crate::domain::{CompositionDraft, DraftRef, PublishError, PublishedContent};
use crate::ports::Publisher;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Backend acknowledgement for a publish call.
#[derive(Debug, Deserialize)]
struct PublishResponse {
    id: String,
    published_at: DateTime<Utc>,
}

/// Backend acknowledgement for a draft save.
#[derive(Debug, Deserialize)]
struct DraftResponse {
    id: String,
    saved_at: DateTime<Utc>,
}

/// Publisher backed by a JSON HTTP API.
pub struct HttpPublisher {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpPublisher {
    /// `base_url` without trailing slash; `api_key` sent as a bearer token
    /// (may be empty for unauthenticated local backends).
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url,
            api_key,
        }
    }

    async fn post_json(
        &self,
        path: &str,
        draft: &CompositionDraft,
    ) -> Result<reqwest::Response, PublishError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        debug!(%url, upload_type = %draft.upload_type, "submitting draft");
        let mut req = self.client.post(&url).json(draft);
        if !self.api_key.is_empty() {
            req = req.bearer_auth(&self.api_key);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| PublishError::Backend(format!("request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(PublishError::Backend(format!(
                "backend returned {}",
                resp.status()
            )));
        }
        Ok(resp)
    }
}

#[async_trait::async_trait]
impl Publisher for HttpPublisher {
    async fn publish(&self, draft: &CompositionDraft) -> Result<PublishedContent, PublishError> {
        let resp = self.post_json("publish", draft).await?;
        let ack: PublishResponse = resp
            .json()
            .await
            .map_err(|e| PublishError::Backend(format!("invalid response body: {e}")))?;
        info!(id = %ack.id, "backend accepted publish");
        Ok(PublishedContent {
            id: ack.id,
            published_at: ack.published_at,
            draft: draft.clone(),
        })
    }

    async fn save_draft(&self, draft: &CompositionDraft) -> Result<DraftRef, PublishError> {
        let resp = self.post_json("drafts", draft).await?;
        let ack: DraftResponse = resp
            .json()
            .await
            .map_err(|e| PublishError::Backend(format!("invalid response body: {e}")))?;
        info!(id = %ack.id, "backend accepted draft");
        Ok(DraftRef {
            id: ack.id,
            saved_at: ack.saved_at,
        })
    }
}
