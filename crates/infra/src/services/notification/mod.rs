use crate::config::Config;
use anyhow::{anyhow, Context as _};
use nudge_domain::ReminderEvent;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// The outbound delivery capability. The rest of the system treats it as
/// opaque: given a reminder payload and a message it either confirms the
/// notification reached the recipient or fails.
#[async_trait::async_trait]
pub trait INotificationGateway: Send + Sync {
    async fn deliver(&self, event: &ReminderEvent, message: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotificationBody<'a> {
    recipient: &'a str,
    owner: &'a str,
    repo: &'a str,
    issue_number: i64,
    auth_context: &'a str,
    message: &'a str,
}

/// Delivers notifications by POSTing them to a configured webhook,
/// authenticated with a shared key header. The request carries an
/// explicit timeout so a hanging receiver cannot stall a sweep forever.
pub struct WebhookNotificationGateway {
    client: reqwest::Client,
    url: String,
    key: String,
}

impl WebhookNotificationGateway {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.notify_timeout_secs))
            .build()
            .expect("To build notification http client");

        Self {
            client,
            url: config.notify_webhook_url.clone(),
            key: config.notify_webhook_key.clone(),
        }
    }
}

#[async_trait::async_trait]
impl INotificationGateway for WebhookNotificationGateway {
    async fn deliver(&self, event: &ReminderEvent, message: &str) -> anyhow::Result<()> {
        self.client
            .post(&self.url)
            .header("nudge-webhook-key", &self.key)
            .json(&NotificationBody {
                recipient: &event.recipient,
                owner: &event.target.owner,
                repo: &event.target.repo,
                issue_number: event.target.issue_number,
                auth_context: &event.auth_context,
                message,
            })
            .send()
            .await
            .with_context(|| format!("Unable to reach notification webhook: {}", self.url))?
            .error_for_status()?;

        Ok(())
    }
}

/// Records notifications instead of sending them. Used by tests, which
/// can also flip the gateway into a failing state to exercise retry
/// behavior.
pub struct InMemoryNotificationGateway {
    pub deliveries: Mutex<Vec<(ReminderEvent, String)>>,
    broken: AtomicBool,
}

impl InMemoryNotificationGateway {
    pub fn new() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            broken: AtomicBool::new(false),
        }
    }

    /// Make every subsequent delivery fail (or succeed again)
    pub fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::SeqCst);
    }

    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl INotificationGateway for InMemoryNotificationGateway {
    async fn deliver(&self, event: &ReminderEvent, message: &str) -> anyhow::Result<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(anyhow!("Notification gateway is down"));
        }
        self.deliveries
            .lock()
            .unwrap()
            .push((event.clone(), message.to_string()));
        Ok(())
    }
}
