use nudge_domain::RetryPolicy;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Seconds between two dispatcher sweeps. Due reminders may fire up
    /// to one full interval late, never early.
    pub dispatch_interval_secs: u64,
    /// Where outbound notifications are POSTed
    pub notify_webhook_url: String,
    /// Shared key sent along with every outbound notification so the
    /// receiver can verify the origin
    pub notify_webhook_key: String,
    /// Upper bound in seconds on a single outbound delivery call. The
    /// delivery capability is expected to fail fast, this is the safety
    /// margin in case it does not.
    pub notify_timeout_secs: u64,
    /// What to do with reminders whose delivery keeps failing
    pub retry_policy: RetryPolicy,
}

fn parse_env_num(var: &str, default: u64) -> u64 {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    match raw.parse::<u64>() {
        Ok(value) => value,
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}.",
                var, raw, default
            );
            default
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let notify_webhook_url = match std::env::var("NOTIFY_WEBHOOK_URL") {
            Ok(url) => url,
            Err(_) => {
                let url = "http://localhost:3000/notifications".to_string();
                info!(
                    "Did not find NOTIFY_WEBHOOK_URL environment variable. Going to use: {}",
                    url
                );
                url
            }
        };
        let notify_webhook_key = std::env::var("NOTIFY_WEBHOOK_KEY").unwrap_or_default();

        let retry_policy = match std::env::var("MAX_DELIVERY_ATTEMPTS") {
            Ok(raw) => match raw.parse::<i64>() {
                Ok(max) if max > 0 => RetryPolicy::MaxAttempts(max),
                _ => {
                    warn!(
                        "The given MAX_DELIVERY_ATTEMPTS: {} is not a positive number, falling back to unbounded retries.",
                        raw
                    );
                    RetryPolicy::RetryForever
                }
            },
            Err(_) => RetryPolicy::RetryForever,
        };

        Self {
            port,
            dispatch_interval_secs: parse_env_num("DISPATCH_INTERVAL_SECS", 60 * 10),
            notify_webhook_url,
            notify_webhook_key,
            notify_timeout_secs: parse_env_num("NOTIFY_TIMEOUT_SECS", 30),
            retry_policy,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
