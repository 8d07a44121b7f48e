mod due_times;
mod scheduled_events;

pub use due_times::IDueTimeRepo;
use due_times::{InMemoryDueTimeRepo, PostgresDueTimeRepo};
pub use scheduled_events::IScheduledEventRepo;
use scheduled_events::{InMemoryScheduledEventRepo, PostgresScheduledEventRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

/// The two durable stores a pending reminder lives in: the event store
/// holding the full payload and the due-time index holding its fire time.
/// Producer and consumer share nothing else.
#[derive(Clone)]
pub struct Repos {
    pub scheduled_events: Arc<dyn IScheduledEventRepo>,
    pub due_times: Arc<dyn IDueTimeRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            scheduled_events: Arc::new(PostgresScheduledEventRepo::new(pool.clone())),
            due_times: Arc::new(PostgresDueTimeRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            scheduled_events: Arc::new(InMemoryScheduledEventRepo::new()),
            due_times: Arc::new(InMemoryDueTimeRepo::new()),
        }
    }
}
