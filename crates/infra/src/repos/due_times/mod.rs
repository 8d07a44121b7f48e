mod inmemory;
mod postgres;

pub use inmemory::InMemoryDueTimeRepo;
use nudge_domain::{DueTimeEntry, ID};
pub use postgres::PostgresDueTimeRepo;

/// The due-time index: one entry per pending reminder, ordered by fire
/// time and queryable by a maximum-time threshold.
///
/// An entry should exist here if and only if a matching payload exists in
/// the event store. The two writes are not transactional, so consumers
/// must tolerate an entry whose payload is missing.
#[async_trait::async_trait]
pub trait IDueTimeRepo: Send + Sync {
    async fn insert(&self, entry: &DueTimeEntry) -> anyhow::Result<()>;
    /// All entries with a fire time at or before `before`, soonest first
    async fn find_due(&self, before: i64) -> anyhow::Result<Vec<DueTimeEntry>>;
    /// Bumps the failed delivery counter and returns the new count
    async fn record_attempt(&self, event_id: &ID) -> anyhow::Result<i64>;
    async fn delete(&self, event_id: &ID) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use crate::Context;
    use nudge_domain::DueTimeEntry;

    #[tokio::test]
    async fn finds_entries_at_or_before_threshold() {
        let ctx = Context::create_inmemory();

        let early = DueTimeEntry::new(Default::default(), 100);
        let exact = DueTimeEntry::new(Default::default(), 200);
        let late = DueTimeEntry::new(Default::default(), 300);
        for entry in [&late, &early, &exact] {
            ctx.repos.due_times.insert(entry).await.unwrap();
        }

        let due = ctx.repos.due_times.find_due(200).await.unwrap();
        assert_eq!(due.len(), 2);
        // Soonest first
        assert_eq!(due[0], early);
        assert_eq!(due[1], exact);

        assert!(ctx.repos.due_times.find_due(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_a_single_entry() {
        let ctx = Context::create_inmemory();

        let e1 = DueTimeEntry::new(Default::default(), 100);
        let e2 = DueTimeEntry::new(Default::default(), 100);
        ctx.repos.due_times.insert(&e1).await.unwrap();
        ctx.repos.due_times.insert(&e2).await.unwrap();

        ctx.repos.due_times.delete(&e1.event_id).await.unwrap();
        let due = ctx.repos.due_times.find_due(100).await.unwrap();
        assert_eq!(due, vec![e2]);
    }

    #[tokio::test]
    async fn record_attempt_increments_counter() {
        let ctx = Context::create_inmemory();

        let entry = DueTimeEntry::new(Default::default(), 100);
        ctx.repos.due_times.insert(&entry).await.unwrap();

        assert_eq!(
            ctx.repos
                .due_times
                .record_attempt(&entry.event_id)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            ctx.repos
                .due_times
                .record_attempt(&entry.event_id)
                .await
                .unwrap(),
            2
        );

        let due = ctx.repos.due_times.find_due(100).await.unwrap();
        assert_eq!(due[0].attempts, 2);
    }
}
