use std::path::PathBuf;
use thiserror::Error;

/// Failures while obtaining a bearer token. Fatal to a dispatch call.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Service account key at {} is unreadable: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Service account key is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("Token request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Token endpoint rejected the assertion with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Token endpoint returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// Failures of a single device delivery. Recorded per device, never propagated.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Device token is no longer registered")]
    Unregistered,
    #[error("Provider refused the access token")]
    Unauthorized,
    #[error("Delivery timed out")]
    Timeout,
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Failed to encode message: {0}")]
    Encode(String),
}

impl DeliveryError {
    /// Short label used as a metric attribute.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => "rejected",
            Self::Unregistered => "unregistered",
            Self::Unauthorized => "unauthorized",
            Self::Timeout => "timeout",
            Self::Transport(_) => "transport",
            Self::Encode(_) => "encode",
        }
    }
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("Cached value could not be decoded: {0}")]
    Codec(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Stored device is invalid: {0}")]
    InvalidRecord(String),
}

/// Top-level failure of a dispatch call. Per-device failures are reported as outcomes instead.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Could not obtain an access token: {0}")]
    Credential(#[from] CredentialError),
    #[error("Could not look up devices: {0}")]
    DeviceLookup(#[from] DirectoryError),
}

pub type Result<T> = std::result::Result<T, DispatchError>;
