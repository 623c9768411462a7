pub mod device_repo;
pub mod records;

pub use device_repo::DeviceRepository;

use crate::config::DatabaseConfig;
use crate::domain::Device;
use crate::error::DirectoryError;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use uuid::Uuid;

pub type DbPool = Pool<Postgres>;

/// Read-only lookup of the devices a user has registered.
#[async_trait]
pub trait DeviceDirectory: Send + Sync + std::fmt::Debug {
    /// Lists the user's devices, most recently registered first.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be queried.
    async fn list_for(&self, user_id: Uuid) -> Result<Vec<Device>, DirectoryError>;
}

/// Initializes the database connection pool.
///
/// # Errors
/// Returns `sqlx::Error` if the connection fails.
pub async fn init_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await
}

/// Applies pending schema migrations.
///
/// # Errors
/// Returns an error if a migration fails.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
