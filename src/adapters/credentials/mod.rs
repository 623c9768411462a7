use crate::domain::AccessToken;
use crate::error::CredentialError;
use async_trait::async_trait;

pub mod service_account;

pub use service_account::{ServiceAccountKey, ServiceAccountProvider};

#[async_trait]
pub trait CredentialProvider: Send + Sync + std::fmt::Debug {
    /// Mints a fresh bearer token for `scope`.
    ///
    /// # Errors
    /// Returns a `CredentialError` if the secret is unusable or the provider refuses the request.
    async fn mint(&self, scope: &str) -> Result<AccessToken, CredentialError>;
}
