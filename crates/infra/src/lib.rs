mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{IDueTimeRepo, IScheduledEventRepo, Repos};
pub use services::{
    INotificationGateway, InMemoryNotificationGateway, WebhookNotificationGateway,
};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct Context {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotificationGateway>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl Context {
    async fn create(params: ContextParams) -> Self {
        let config = Config::new();
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let notifier = Arc::new(WebhookNotificationGateway::new(&config));
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
        }
    }

    /// A context backed entirely by in-memory stores and a recording
    /// notification gateway. Used by tests.
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            notifier: Arc::new(InMemoryNotificationGateway::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> Context {
    Context::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
