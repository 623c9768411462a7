pub mod dispatcher;
pub mod envelope;

pub use dispatcher::{ACCESS_TOKEN_CACHE_KEY, NotificationDispatcher};
