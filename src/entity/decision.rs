use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single logged decision: a statement plus optional rationale.
///
/// The serialized shape is the storage and JSON export wire format, so field
/// names follow it (`createdAt` in epoch milliseconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub id: String,
    pub decision: String,
    pub context: String,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Decision {
    /// Build a new decision with a fresh id, stamped with the current time.
    /// Both text fields are trimmed.
    pub fn new(decision: &str, context: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            decision: decision.trim().to_string(),
            context: context.trim().to_string(),
            created_at: Utc::now().timestamp_millis(),
        }
    }

    pub fn created_at_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.created_at).unwrap_or_default()
    }

    /// First seven characters of the id, for display.
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(7)
            .map(|(i, _)| i)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }

    /// Case-insensitive substring match on either text field.
    /// `query_lower` must already be lower-cased.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.decision.to_lowercase().contains(query_lower)
            || self.context.to_lowercase().contains(query_lower)
    }
}
