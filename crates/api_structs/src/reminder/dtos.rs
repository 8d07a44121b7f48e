use nudge_domain::{IssueRef, ReminderEvent, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub recipient: String,
    pub target: IssueRef,
    pub auth_context: String,
    /// Epoch seconds at which the reminder becomes eligible for dispatch
    pub fire_at: i64,
}

impl ReminderDTO {
    pub fn new(event: &ReminderEvent, fire_at: i64) -> Self {
        Self {
            id: event.id.clone(),
            recipient: event.recipient.clone(),
            target: event.target.clone(),
            auth_context: event.auth_context.clone(),
            fire_at,
        }
    }
}
