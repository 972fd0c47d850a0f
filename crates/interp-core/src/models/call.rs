use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Id;

/// Details about the caller attached when a call is started
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomerInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CustomerInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.language.is_none() && self.phone.is_none() && self.extra.is_empty()
    }
}

/// An interpretation session, active or completed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallSession {
    pub id: Id,
    #[serde(alias = "roomName")]
    pub room_name: Option<String>,
    pub status: Option<String>,
    #[serde(alias = "customerInfo")]
    pub customer_info: Option<CustomerInfo>,
    #[serde(alias = "startedAt")]
    pub started_at: Option<String>,
    #[serde(alias = "endedAt")]
    pub ended_at: Option<String>,
    #[serde(alias = "durationSeconds", alias = "duration")]
    pub duration_seconds: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CallSession {
    /// Address of the media room for this call on `signaling_domain`
    pub fn meeting_url(&self, signaling_domain: &str) -> Option<String> {
        self.room_name
            .as_deref()
            .filter(|room| !room.is_empty())
            .map(|room| format!("https://{}/{}", signaling_domain.trim_end_matches('/'), room))
    }

    pub fn duration_display(&self) -> String {
        match self.duration_seconds {
            Some(secs) if secs >= 0.0 => {
                let total = secs.round() as u64;
                format!("{}m {:02}s", total / 60, total % 60)
            }
            _ => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCallRequest<'a> {
    pub room_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_info: Option<&'a CustomerInfo>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndCallRequest<'a> {
    pub call_id: &'a Id,
}
