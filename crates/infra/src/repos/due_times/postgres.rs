use super::IDueTimeRepo;
use nudge_domain::{DueTimeEntry, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresDueTimeRepo {
    pool: PgPool,
}

impl PostgresDueTimeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DueTimeRaw {
    event_uid: Uuid,
    fire_at: i64,
    attempts: i64,
}

impl From<DueTimeRaw> for DueTimeEntry {
    fn from(raw: DueTimeRaw) -> Self {
        Self {
            event_id: raw.event_uid.into(),
            fire_at: raw.fire_at,
            attempts: raw.attempts,
        }
    }
}

#[async_trait::async_trait]
impl IDueTimeRepo for PostgresDueTimeRepo {
    async fn insert(&self, entry: &DueTimeEntry) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_due_times
            (event_uid, fire_at, attempts)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(entry.event_id.inner_ref())
        .bind(entry.fire_at)
        .bind(entry.attempts)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_due(&self, before: i64) -> anyhow::Result<Vec<DueTimeEntry>> {
        let due: Vec<DueTimeRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_due_times AS d
            WHERE d.fire_at <= $1
            ORDER BY d.fire_at
            "#,
        )
        .bind(before)
        .fetch_all(&self.pool)
        .await?;

        Ok(due.into_iter().map(Into::into).collect())
    }

    async fn record_attempt(&self, event_id: &ID) -> anyhow::Result<i64> {
        let raw: DueTimeRaw = sqlx::query_as(
            r#"
            UPDATE reminder_due_times AS d
                SET attempts = attempts + 1
            WHERE d.event_uid = $1
            RETURNING *
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_one(&self.pool)
        .await?;

        Ok(raw.attempts)
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM reminder_due_times AS d
            WHERE d.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
