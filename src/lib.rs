#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod error;
pub mod telemetry;

use crate::adapters::cache::{MemoryTokenCache, RedisTokenCache, TokenCache};
use crate::adapters::credentials::ServiceAccountProvider;
use crate::adapters::database::{self, DeviceRepository};
use crate::adapters::push::FcmTransport;
use crate::config::Config;
use crate::core::NotificationDispatcher;
use std::sync::Arc;
use std::time::Duration;

/// Builds a dispatcher backed by Postgres, the configured token cache and the FCM HTTP API.
///
/// # Errors
/// Returns an error if the database, Redis or HTTP clients cannot be set up.
pub async fn build_dispatcher(config: &Config) -> anyhow::Result<NotificationDispatcher> {
    let pool = database::init_pool(&config.database).await?;
    database::run_migrations(&pool).await?;

    let cache: Arc<dyn TokenCache> = match &config.cache.redis_url {
        Some(url) => {
            tracing::info!("Using Redis token cache");
            Arc::new(RedisTokenCache::connect(url, config.cache.key_prefix.clone()).await?)
        }
        None => {
            tracing::info!("Using in-process token cache");
            Arc::new(MemoryTokenCache::new())
        }
    };

    let timeout = Duration::from_secs(config.fcm.request_timeout_secs);
    let credentials = ServiceAccountProvider::new(config.fcm.credentials_path.clone(), timeout)?;
    let transport = FcmTransport::new(timeout)?;

    Ok(NotificationDispatcher::new(
        Arc::new(credentials),
        cache,
        Arc::new(DeviceRepository::new(pool)),
        Arc::new(transport),
        &config.fcm,
    ))
}
