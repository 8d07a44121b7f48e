mod inmemory;
mod postgres;

pub use inmemory::InMemoryScheduledEventRepo;
use nudge_domain::{ReminderEvent, ID};
pub use postgres::PostgresScheduledEventRepo;

/// The event store: a flat key-value collection of pending reminder
/// payloads keyed by event id
#[async_trait::async_trait]
pub trait IScheduledEventRepo: Send + Sync {
    async fn insert(&self, event: &ReminderEvent) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<ReminderEvent>>;
    async fn delete(&self, event_id: &ID) -> anyhow::Result<()>;
}
