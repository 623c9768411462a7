use crate::adapters::push::{PushResponse, PushTransport};
use crate::domain::AccessToken;
use crate::error::DeliveryError;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

/// HTTP transport for the FCM v1 send endpoint.
#[derive(Debug, Clone)]
pub struct FcmTransport {
    http_client: reqwest::Client,
}

impl FcmTransport {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl PushTransport for FcmTransport {
    async fn post(&self, endpoint: &str, bearer: &AccessToken, body: String) -> Result<PushResponse, DeliveryError> {
        let response = self
            .http_client
            .post(endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", bearer.value()))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout
                } else {
                    DeliveryError::Transport(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(text) => text,
            Err(e) if e.is_timeout() => return Err(DeliveryError::Timeout),
            Err(e) => {
                tracing::debug!(error = %e, status, "Failed to read provider response body");
                String::new()
            }
        };

        Ok(PushResponse { status, body })
    }
}
