use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[sqlx(type_name = "waitlist_event_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WaitlistEventType {
    Signup,
    Verify,
}

/// Append-only audit row. Rows are never updated or deleted.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEvent {
    pub id: Uuid,
    pub waitlist_id: Uuid,
    pub event_type: WaitlistEventType,
    pub event_data: serde_json::Value,
    pub created_at: NaiveDateTime,
}
