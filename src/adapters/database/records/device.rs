use crate::domain::Device;
use crate::error::DirectoryError;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
pub struct DeviceRecord {
    pub(crate) id: Uuid,
    pub(crate) user_id: Uuid,
    pub(crate) token: String,
    pub(crate) device_type: String,
    pub(crate) created_at: Option<OffsetDateTime>,
}

impl TryFrom<DeviceRecord> for Device {
    type Error = DirectoryError;

    fn try_from(record: DeviceRecord) -> Result<Self, Self::Error> {
        let device_type = record.device_type.parse().map_err(DirectoryError::InvalidRecord)?;
        Ok(Self {
            id: record.id,
            user_id: record.user_id,
            token: record.token,
            device_type,
            created_at: record.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeviceType;

    fn record(device_type: &str) -> DeviceRecord {
        DeviceRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token: "fcm-token".into(),
            device_type: device_type.into(),
            created_at: None,
        }
    }

    #[test]
    fn test_record_converts_to_device() {
        let device = Device::try_from(record("ios")).unwrap();
        assert_eq!(device.device_type, DeviceType::Ios);
        assert_eq!(device.token, "fcm-token");
    }

    #[test]
    fn test_unknown_device_type_is_invalid_record() {
        let err = Device::try_from(record("pager")).unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidRecord(_)));
    }
}
