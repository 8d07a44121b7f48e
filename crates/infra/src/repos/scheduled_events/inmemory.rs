use super::IScheduledEventRepo;
use nudge_domain::{ReminderEvent, ID};
use std::collections::HashMap;
use std::sync::Mutex;

pub struct InMemoryScheduledEventRepo {
    events: Mutex<HashMap<ID, ReminderEvent>>,
}

impl InMemoryScheduledEventRepo {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl IScheduledEventRepo for InMemoryScheduledEventRepo {
    async fn insert(&self, event: &ReminderEvent) -> anyhow::Result<()> {
        self.events
            .lock()
            .unwrap()
            .insert(event.id.clone(), event.clone());
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<ReminderEvent>> {
        Ok(self.events.lock().unwrap().get(event_id).cloned())
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<()> {
        self.events.lock().unwrap().remove(event_id);
        Ok(())
    }
}
