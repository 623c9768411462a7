use crate::adapters::cache::TokenCache;
use crate::adapters::credentials::CredentialProvider;
use crate::adapters::database::DeviceDirectory;
use crate::adapters::push::{PushResponse, PushTransport};
use crate::config::FcmConfig;
use crate::core::envelope;
use crate::domain::{AccessToken, DeliveryOutcome, DeliveryStatus, Device, NotificationRequest};
use crate::error::{CacheError, CredentialError, DeliveryError, Result};
use futures::StreamExt;
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

/// Cache slot holding the single process-wide access token.
pub const ACCESS_TOKEN_CACHE_KEY: &str = "fcm:access_token";

#[derive(Clone, Debug)]
struct Metrics {
    sent: Counter<u64>,
    errors: Counter<u64>,
    token_mints: Counter<u64>,
    token_cache_hits: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("fcm-courier");
        Self {
            sent: meter
                .u64_counter("push_sent_total")
                .with_description("Total number of push notifications accepted by the provider")
                .build(),
            errors: meter
                .u64_counter("push_errors_total")
                .with_description("Total number of failed device deliveries")
                .build(),
            token_mints: meter
                .u64_counter("access_token_mints_total")
                .with_description("Total number of access tokens minted from the service account")
                .build(),
            token_cache_hits: meter
                .u64_counter("access_token_cache_hits_total")
                .with_description("Total number of access token lookups served from cache")
                .build(),
        }
    }
}

/// Sends a notification to every device a user has registered.
///
/// Owns access token resolution (cache first, mint on miss) and per-device delivery.
/// A failed device never stops delivery to the remaining devices; only a failure to
/// obtain a token or to list devices aborts a dispatch.
#[derive(Debug)]
pub struct NotificationDispatcher {
    credentials: Arc<dyn CredentialProvider>,
    cache: Arc<dyn TokenCache>,
    devices: Arc<dyn DeviceDirectory>,
    transport: Arc<dyn PushTransport>,
    endpoint: String,
    scope: String,
    token_cache_ttl: time::Duration,
    max_concurrent_deliveries: usize,
    metrics: Metrics,
}

impl NotificationDispatcher {
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        cache: Arc<dyn TokenCache>,
        devices: Arc<dyn DeviceDirectory>,
        transport: Arc<dyn PushTransport>,
        config: &FcmConfig,
    ) -> Self {
        Self {
            credentials,
            cache,
            devices,
            transport,
            endpoint: config.endpoint.clone(),
            scope: config.scope.clone(),
            token_cache_ttl: time::Duration::seconds(i64::try_from(config.token_cache_ttl_secs).unwrap_or(i64::MAX)),
            max_concurrent_deliveries: usize::from(config.max_concurrent_deliveries.max(1)),
            metrics: Metrics::new(),
        }
    }

    /// Returns a usable access token, minting and caching a new one when the cache has none.
    ///
    /// Minted tokens are cached for the configured TTL or their own validity, whichever is shorter,
    /// and returned with their full validity.
    /// Cache failures degrade to minting; they never fail the call.
    ///
    /// # Errors
    /// Returns a `CredentialError` if a token has to be minted and minting fails.
    #[tracing::instrument(skip(self), err)]
    pub async fn resolve_access_token(&self) -> std::result::Result<AccessToken, CredentialError> {
        let now = OffsetDateTime::now_utc();
        match self.cache.get(ACCESS_TOKEN_CACHE_KEY).await {
            Ok(Some(token)) if !token.is_expired_at(now) => {
                tracing::debug!(expires_at = %token.expires_at(), "Access token served from cache");
                self.metrics.token_cache_hits.add(1, &[]);
                return Ok(token);
            }
            Ok(Some(_)) => tracing::debug!("Cached access token has expired"),
            Ok(None) => tracing::debug!("No cached access token"),
            Err(e) => tracing::warn!(error = %e, "Token cache read failed, minting a fresh token"),
        }

        let minted = self.credentials.mint(&self.scope).await?;
        self.metrics.token_mints.add(1, &[]);

        let now = OffsetDateTime::now_utc();
        if minted.is_expired_at(now) {
            return Err(CredentialError::InvalidResponse("minted token is already expired".into()));
        }

        // Only the cache entry is shortened; delivery uses the token's real expiry.
        let ttl = minted.remaining_at(now).min(self.token_cache_ttl).unsigned_abs();
        if let Err(e) = self.cache.put(ACCESS_TOKEN_CACHE_KEY, &minted, ttl).await {
            tracing::warn!(error = %e, "Failed to cache minted access token");
        }

        Ok(minted)
    }

    /// Drops the cached access token so the next resolution mints a new one.
    ///
    /// # Errors
    /// Returns an error if the cache backend fails.
    #[tracing::instrument(skip(self), err)]
    pub async fn invalidate_access_token(&self) -> std::result::Result<(), CacheError> {
        self.cache.invalidate(ACCESS_TOKEN_CACHE_KEY).await
    }

    /// Sends `title`/`body` to every device of `user_id`.
    ///
    /// # Errors
    /// See [`Self::dispatch_request`].
    pub async fn dispatch(&self, user_id: Uuid, title: &str, body: &str) -> Result<Vec<DeliveryOutcome>> {
        self.dispatch_request(&NotificationRequest::new(user_id, title, body)).await
    }

    /// Delivers a notification to each of the user's devices, newest registration first.
    ///
    /// Outcomes are returned in device order. A user without devices yields an empty list.
    ///
    /// # Errors
    /// Returns `DispatchError::Credential` if no access token can be obtained and
    /// `DispatchError::DeviceLookup` if the user's devices cannot be listed. In both cases no
    /// delivery is attempted.
    #[tracing::instrument(skip(self, request), fields(user_id = %request.user_id), err)]
    pub async fn dispatch_request(&self, request: &NotificationRequest) -> Result<Vec<DeliveryOutcome>> {
        let token = self.resolve_access_token().await?;
        let devices = self.devices.list_for(request.user_id).await?;

        if devices.is_empty() {
            tracing::debug!("User has no registered devices");
            return Ok(Vec::new());
        }

        let outcomes: Vec<DeliveryOutcome> = futures::stream::iter(devices)
            .map(|device| self.deliver(&token, request, device))
            .buffered(self.max_concurrent_deliveries)
            .collect()
            .await;

        if outcomes.iter().any(|o| matches!(o.error(), Some(DeliveryError::Unauthorized))) {
            tracing::warn!("Provider refused the access token, invalidating cached token");
            if let Err(e) = self.invalidate_access_token().await {
                tracing::warn!(error = %e, "Failed to invalidate cached access token");
            }
        }

        let delivered = outcomes.iter().filter(|o| o.is_success()).count();
        tracing::info!(delivered, failed = outcomes.len() - delivered, "Dispatch complete");

        Ok(outcomes)
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, token, request, device),
        fields(device_id = %device.id, device_type = %device.device_type)
    )]
    async fn deliver(&self, token: &AccessToken, request: &NotificationRequest, device: Device) -> DeliveryOutcome {
        let status = match self.attempt(token, request, &device).await {
            Ok(message_id) => {
                tracing::debug!(message_id = ?message_id, "Push notification delivered");
                self.metrics.sent.add(1, &[]);
                DeliveryStatus::Delivered { message_id }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Push notification delivery failed");
                self.metrics.errors.add(1, &[KeyValue::new("reason", e.reason())]);
                DeliveryStatus::Failed(e)
            }
        };

        DeliveryOutcome { device, status }
    }

    async fn attempt(
        &self,
        token: &AccessToken,
        request: &NotificationRequest,
        device: &Device,
    ) -> std::result::Result<Option<String>, DeliveryError> {
        // Long fan-outs can outlive the token.
        if token.is_expired_at(OffsetDateTime::now_utc()) {
            return Err(DeliveryError::Unauthorized);
        }

        let body = envelope::encode(&device.token, &request.title, &request.body)
            .map_err(|e| DeliveryError::Encode(e.to_string()))?;
        let response = self.transport.post(&self.endpoint, token, body).await?;
        classify(response)
    }
}

/// Only an exact 200 counts as delivered.
fn classify(response: PushResponse) -> std::result::Result<Option<String>, DeliveryError> {
    match response.status {
        200 => Ok(envelope::message_id(&response.body)),
        401 => Err(DeliveryError::Unauthorized),
        404 => Err(DeliveryError::Unregistered),
        _ if response.body.contains("UNREGISTERED") => Err(DeliveryError::Unregistered),
        status => Err(DeliveryError::Rejected { status, body: response.body }),
    }
}
