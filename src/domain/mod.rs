pub mod device;
pub mod notification;
pub mod token;

pub use device::{Device, DeviceType};
pub use notification::{DeliveryOutcome, DeliveryStatus, NotificationRequest};
pub use token::AccessToken;
