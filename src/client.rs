//! HTTP client for the remote model-serving endpoint.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::preprocess::Tensor;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct InferencePayload {
    inputs: Vec<Vec<Vec<Vec<f32>>>>,
}

/// What the serving endpoint sent back, uninterpreted.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

pub struct InferenceClient {
    client: reqwest::Client,
    endpoint_url: Url,
    token: String,
    timeout: Option<Duration>,
}

impl InferenceClient {
    pub fn new(config: &Config) -> Result<Self, InferenceError> {
        let timeout = config.timeout();
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint_url: config.endpoint_url.clone(),
            token: config.token.clone(),
            timeout,
        })
    }

    pub fn endpoint_url(&self) -> &Url {
        &self.endpoint_url
    }

    /// Sends one image to the endpoint. Non-2xx statuses are returned, not
    /// raised; only failures to complete the exchange are errors.
    pub async fn invoke(&self, tensor: &Tensor) -> Result<RawResponse, InferenceError> {
        let payload = InferencePayload {
            inputs: tensor.to_nested(),
        };

        let resp = self
            .client
            .post(self.endpoint_url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = resp.bytes().await.map_err(|e| self.classify(e))?;

        debug!(status, len = body.len(), "inference endpoint responded");

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }

    fn classify(&self, err: reqwest::Error) -> InferenceError {
        match self.timeout {
            Some(timeout) if err.is_timeout() => InferenceError::Timeout(timeout),
            _ => InferenceError::Transport(err),
        }
    }
}
