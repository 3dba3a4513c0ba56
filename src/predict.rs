use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("prediction service unreachable: {0}")]
    Unreachable(String),
    #[error("prediction service returned {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("prediction service sent an unreadable body: {0}")]
    InvalidResponse(String),
}

/// Risk model collaborator. The payload is forwarded untouched.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, features: &Value) -> Result<Value, PredictError>;
}

/// Forwards feature payloads to the model service over HTTP.
pub struct HttpPredictor {
    client: reqwest::Client,
    url: String,
}

impl HttpPredictor {
    /// `timeout: None` leaves the request unbounded.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self { client: builder.build()?, url: url.into() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Predictor for HttpPredictor {
    async fn predict(&self, features: &Value) -> Result<Value, PredictError> {
        let resp = self
            .client
            .post(&self.url)
            .json(features)
            .send()
            .await
            .map_err(|e| {
                error!("prediction request to {} failed: {e}", self.url);
                PredictError::Unreachable(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(status = status.as_u16(), "failed to read prediction error body: {e}");
                    format!("unreadable body: {e}")
                }
            };
            warn!(status = status.as_u16(), %body, "prediction service rejected request");
            return Err(PredictError::Rejected { status: status.as_u16(), body });
        }

        resp.json::<Value>().await.map_err(|e| {
            error!("prediction response was not JSON: {e}");
            PredictError::InvalidResponse(e.to_string())
        })
    }
}
