//! The FCM v1 `messages:send` request and response bodies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    message: Message<'a>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    token: &'a str,
    notification: Notification<'a>,
}

#[derive(Debug, Serialize)]
struct Notification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    name: Option<String>,
}

/// Serializes the message for one device.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn encode(device_token: &str, title: &str, body: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Envelope { message: Message { token: device_token, notification: Notification { title, body } } })
}

/// Extracts the message resource name from a successful send response.
#[must_use]
pub fn message_id(response_body: &str) -> Option<String> {
    serde_json::from_str::<SendResponse>(response_body).ok().and_then(|r| r.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape_is_exact() {
        let encoded = encode("ABC", "T", "B").unwrap();
        assert_eq!(encoded, r#"{"message":{"token":"ABC","notification":{"title":"T","body":"B"}}}"#);
    }

    #[test]
    fn test_envelope_escapes_user_text() {
        let encoded = encode("ABC", "Say \"hi\"", "line1\nline2").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(parsed["message"]["notification"]["title"], "Say \"hi\"");
        assert_eq!(parsed["message"]["notification"]["body"], "line1\nline2");
    }

    #[test]
    fn test_message_id_from_response() {
        assert_eq!(message_id(r#"{"name":"projects/p/messages/1"}"#).as_deref(), Some("projects/p/messages/1"));
        assert_eq!(message_id("{}"), None);
        assert_eq!(message_id("not json"), None);
    }
}
