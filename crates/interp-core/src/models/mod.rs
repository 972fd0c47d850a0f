//! Request and response bodies exchanged with the platform API.
//!
//! - `User`, `LoginResponse`, `NewUser`: identity and session
//! - `CallSession`, `CustomerInfo`: interpretation calls
//! - `QueueSnapshot`, `QueueEntry`, `QueueMetrics`: waiting list
//! - `TranslatorRegistration`, `Language`: translator sign-up form
//!
//! Response types keep any field they do not model in an `extra` map.

pub mod call;
pub mod queue;
pub mod registration;
pub mod user;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use call::{CallSession, CustomerInfo, EndCallRequest, StartCallRequest};
pub use queue::{QueueEntry, QueueMetrics, QueueSnapshot};
pub use registration::{Language, RegistrationError, TranslatorRegistration, TranslatorRegistrationRequest};
pub use user::{LoginRequest, LoginResponse, NewUser, User};

/// Identifier issued by the service. Accepts JSON strings or integers and is
/// always sent back as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Uint(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Id(s),
            Raw::Int(n) => Id(n.to_string()),
            Raw::Uint(n) => Id(n.to_string()),
        })
    }
}

/// Body of endpoints that only confirm an action. The shape varies by
/// endpoint (and may be empty), so the raw JSON is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Acknowledgment(pub Value);

impl Acknowledgment {
    /// Human-readable `message` field, when the service sends one
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    pub fn body(&self) -> &Value {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_accepts_strings_and_numbers() {
        let ids: Vec<Id> = serde_json::from_str(r#"["c-17", 42, 18446744073709551615]"#).unwrap();
        assert_eq!(ids[0].as_str(), "c-17");
        assert_eq!(ids[1].as_str(), "42");
        assert_eq!(ids[2].as_str(), "18446744073709551615");

        assert_eq!(serde_json::to_string(&Id::from(7)).unwrap(), r#""7""#);
    }

    #[test]
    fn test_acknowledgment_message() {
        let ack: Acknowledgment =
            serde_json::from_str(r#"{"message": "Email verified successfully! You can now log in.", "verified": true}"#)
                .unwrap();
        assert_eq!(ack.message(), Some("Email verified successfully! You can now log in."));
        assert_eq!(ack.body()["verified"], Value::Bool(true));

        let empty: Acknowledgment = serde_json::from_value(Value::Null).unwrap();
        assert_eq!(empty.message(), None);
    }
}
