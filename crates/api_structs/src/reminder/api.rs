pub mod schedule_reminder {
    use crate::dtos::ReminderDTO;
    use nudge_domain::{IssueRef, ReminderEvent};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub recipient: String,
        pub target: IssueRef,
        pub auth_context: String,
        /// Free text like "2 hours" or "/remind 2 hours". Absent means
        /// the server default delay.
        #[serde(default)]
        pub duration_expression: Option<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct APIResponse {
        pub reminder: ReminderDTO,
    }

    impl APIResponse {
        pub fn new(event: &ReminderEvent, fire_at: i64) -> Self {
            Self {
                reminder: ReminderDTO::new(event, fire_at),
            }
        }
    }
}
