use crate::domain::AccessToken;
use crate::error::DeliveryError;
use async_trait::async_trait;

pub mod fcm;

pub use fcm::FcmTransport;

/// Status and body of a provider response, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait PushTransport: Send + Sync + std::fmt::Debug {
    /// POSTs a JSON `body` to `endpoint` authenticated with `bearer`.
    ///
    /// # Errors
    /// Returns `DeliveryError::Timeout` or `DeliveryError::Transport` when no response was received.
    /// Any received response, including non-success statuses, is returned as `Ok`.
    async fn post(&self, endpoint: &str, bearer: &AccessToken, body: String) -> Result<PushResponse, DeliveryError>;
}
