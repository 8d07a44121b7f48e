use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The issue a reminder is about, including the repository that owns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRef {
    pub owner: String,
    pub repo: String,
    pub issue_number: i64,
}

impl Display for IssueRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.issue_number)
    }
}

/// A `ReminderEvent` is the full payload of one pending reminder as it is
/// persisted in the event store. It is created when a reminder request is
/// accepted and deleted again once the reminder has been delivered. It is
/// never updated in between; a duplicate request becomes a new independent
/// event with its own id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderEvent {
    pub id: ID,
    /// Who to notify when the reminder fires
    pub recipient: String,
    /// The issue the reminder concerns
    pub target: IssueRef,
    /// Identifier of the credential / installation scope the delivery
    /// capability needs in order to notify the recipient
    pub auth_context: String,
}

impl Entity<ID> for ReminderEvent {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// One entry in the due-time index, matching exactly one pending
/// `ReminderEvent`. `attempts` counts failed delivery attempts so that a
/// capped retry policy can decide when to give an event up.
#[derive(Debug, Clone, PartialEq)]
pub struct DueTimeEntry {
    pub event_id: ID,
    /// Epoch seconds at or after which the event is eligible for dispatch
    pub fire_at: i64,
    pub attempts: i64,
}

impl DueTimeEntry {
    pub fn new(event_id: ID, fire_at: i64) -> Self {
        Self {
            event_id,
            fire_at,
            attempts: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reminder_event_round_trips_through_json() {
        let event = ReminderEvent {
            id: Default::default(),
            recipient: "alice".into(),
            target: IssueRef {
                owner: "nudge".into(),
                repo: "nudge".into(),
                issue_number: 7,
            },
            auth_context: "1234".into(),
        };

        let json = serde_json::to_string(&event).expect("To serialize reminder event");
        let parsed: ReminderEvent = serde_json::from_str(&json).expect("To parse reminder event");
        assert_eq!(event, parsed);
    }

    #[test]
    fn issue_ref_display() {
        let target = IssueRef {
            owner: "octo".into(),
            repo: "spoon-knife".into(),
            issue_number: 42,
        };
        assert_eq!(target.to_string(), "octo/spoon-knife#42");
    }
}
