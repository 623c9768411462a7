use crate::domain::device::Device;
use crate::error::DeliveryError;
use uuid::Uuid;

/// A notification addressed to every device of one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
}

impl NotificationRequest {
    #[must_use]
    pub fn new(user_id: Uuid, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { user_id, title: title.into(), body: body.into() }
    }
}

#[derive(Debug)]
pub enum DeliveryStatus {
    /// The provider accepted the message. `message_id` is the provider's resource name when it sent one.
    Delivered { message_id: Option<String> },
    Failed(DeliveryError),
}

/// Result of a single delivery attempt to a single device.
#[derive(Debug)]
pub struct DeliveryOutcome {
    pub device: Device,
    pub status: DeliveryStatus,
}

impl DeliveryOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, DeliveryStatus::Delivered { .. })
    }

    #[must_use]
    pub const fn error(&self) -> Option<&DeliveryError> {
        match &self.status {
            DeliveryStatus::Delivered { .. } => None,
            DeliveryStatus::Failed(e) => Some(e),
        }
    }
}
