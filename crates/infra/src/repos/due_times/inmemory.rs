use super::IDueTimeRepo;
use anyhow::anyhow;
use nudge_domain::{DueTimeEntry, ID};
use std::sync::Mutex;

pub struct InMemoryDueTimeRepo {
    entries: Mutex<Vec<DueTimeEntry>>,
}

impl InMemoryDueTimeRepo {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IDueTimeRepo for InMemoryDueTimeRepo {
    async fn insert(&self, entry: &DueTimeEntry) -> anyhow::Result<()> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn find_due(&self, before: i64) -> anyhow::Result<Vec<DueTimeEntry>> {
        let mut due = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.fire_at <= before)
            .cloned()
            .collect::<Vec<_>>();
        due.sort_by_key(|entry| entry.fire_at);
        Ok(due)
    }

    async fn record_attempt(&self, event_id: &ID) -> anyhow::Result<i64> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .iter_mut()
            .find(|entry| entry.event_id == *event_id)
            .ok_or_else(|| anyhow!("No due time entry for event: {}", event_id))?;
        entry.attempts += 1;
        Ok(entry.attempts)
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<()> {
        self.entries
            .lock()
            .unwrap()
            .retain(|entry| entry.event_id != *event_id);
        Ok(())
    }
}
