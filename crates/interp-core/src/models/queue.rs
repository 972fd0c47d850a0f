use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::Id;

/// A caller waiting for an interpreter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueEntry {
    pub id: Option<Id>,
    pub position: Option<u32>,
    #[serde(alias = "customerName")]
    pub customer_name: Option<String>,
    pub language: Option<String>,
    #[serde(alias = "roomName")]
    pub room_name: Option<String>,
    #[serde(alias = "waitSeconds", alias = "wait_time")]
    pub wait_seconds: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Point-in-time view of the waiting list.
///
/// The service may answer with a bare array of entries or with an object
/// that carries the entries next to summary fields; both decode here.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct QueueSnapshot {
    pub entries: Vec<QueueEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct QueueObject {
    #[serde(default, alias = "queue", alias = "items", alias = "waiting")]
    entries: Vec<QueueEntry>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for QueueSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            List(Vec<QueueEntry>),
            Object(QueueObject),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::List(entries) => QueueSnapshot {
                entries,
                extra: Map::new(),
            },
            Raw::Object(obj) => QueueSnapshot {
                entries: obj.entries,
                extra: obj.extra,
            },
        })
    }
}

impl QueueSnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest wait among entries that report one
    pub fn longest_wait_seconds(&self) -> Option<f64> {
        self.entries
            .iter()
            .filter_map(|e| e.wait_seconds)
            .fold(None, |max, w| Some(max.map_or(w, |m: f64| m.max(w))))
    }
}

/// Aggregate queue statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueueMetrics {
    #[serde(alias = "totalWaiting", alias = "queue_length")]
    pub total_waiting: Option<u64>,
    #[serde(alias = "averageWaitSeconds", alias = "avg_wait_time")]
    pub average_wait_seconds: Option<f64>,
    #[serde(alias = "longestWaitSeconds", alias = "max_wait_time")]
    pub longest_wait_seconds: Option<f64>,
    #[serde(alias = "callsHandledToday", alias = "calls_today")]
    pub calls_handled_today: Option<u64>,
    #[serde(alias = "activeTranslators", alias = "available_translators")]
    pub active_translators: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
