use super::IScheduledEventRepo;
use nudge_domain::{ReminderEvent, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresScheduledEventRepo {
    pool: PgPool,
}

impl PostgresScheduledEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScheduledEventRaw {
    #[allow(dead_code)]
    event_uid: Uuid,
    payload: serde_json::Value,
}

impl ScheduledEventRaw {
    fn into_event(self) -> anyhow::Result<ReminderEvent> {
        serde_json::from_value(self.payload).map_err(Into::into)
    }
}

#[async_trait::async_trait]
impl IScheduledEventRepo for PostgresScheduledEventRepo {
    async fn insert(&self, event: &ReminderEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO scheduled_events
            (event_uid, payload)
            VALUES($1, $2)
            "#,
        )
        .bind(event.id.inner_ref())
        .bind(serde_json::to_value(event)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<ReminderEvent>> {
        let row: Option<ScheduledEventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM scheduled_events AS e
            WHERE e.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|raw| raw.into_event()).transpose()
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM scheduled_events AS e
            WHERE e.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
