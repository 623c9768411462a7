use crate::adapters::database::records::DeviceRecord;
use crate::adapters::database::{DbPool, DeviceDirectory};
use crate::domain::{Device, DeviceType};
use crate::error::DirectoryError;
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct DeviceRepository {
    pool: DbPool,
}

impl DeviceRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Registers a device token for a user.
    ///
    /// Re-registering an existing token moves it to `user_id` and makes it the most recent.
    ///
    /// # Errors
    /// Returns `DirectoryError::Database` if the upsert fails.
    #[tracing::instrument(level = "debug", skip(self, token), err)]
    pub async fn register(&self, user_id: Uuid, token: &str, device_type: DeviceType) -> Result<Device, DirectoryError> {
        let record = sqlx::query_as::<_, DeviceRecord>(
            r#"
            INSERT INTO devices (user_id, token, device_type)
            VALUES ($1, $2, $3)
            ON CONFLICT (token) DO UPDATE
            SET user_id = EXCLUDED.user_id,
                device_type = EXCLUDED.device_type,
                created_at = NOW()
            RETURNING id, user_id, token, device_type, created_at
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(device_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        record.try_into()
    }
}

#[async_trait]
impl DeviceDirectory for DeviceRepository {
    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn list_for(&self, user_id: Uuid) -> Result<Vec<Device>, DirectoryError> {
        let records = sqlx::query_as::<_, DeviceRecord>(
            r#"
            SELECT id, user_id, token, device_type, created_at
            FROM devices
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(Device::try_from).collect()
    }
}
