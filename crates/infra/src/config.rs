use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the content service hosting the posts, schedules and
    /// approvals APIs
    pub content_api_url: String,
    /// Port for the application to run on
    pub port: usize,
    /// Chat recipients alerted by the notify-approval ingress
    pub approval_recipients: Vec<String>,
    /// Minimum pacing between two messages to the same recipient, in millis
    pub message_base_delay_ms: u64,
    /// Uniform random variance applied on top of the base delay, in millis.
    /// Keeps the send cadence irregular enough to not trip the messaging
    /// platform's abuse detection.
    pub message_jitter_range_ms: u64,
    /// Outbound messaging gateway webhook
    pub transport_webhook_url: Option<String>,
    /// Shared key sent with every webhook delivery
    pub transport_webhook_key: String,
    /// Timeout applied to every call against the external APIs
    pub external_api_timeout: Duration,
}

const DEFAULT_EXTERNAL_API_TIMEOUT_SECS: u64 = 30;

impl Config {
    pub fn new() -> Self {
        let content_api_url = match std::env::var("CONTENT_API_URL") {
            Ok(url) => url,
            Err(_) => {
                let default_url = "http://localhost:3000/api";
                warn!(
                    "Did not find CONTENT_API_URL environment variable. Falling back to: {}.",
                    default_url
                );
                default_url.into()
            }
        };

        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
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

        let approval_recipients = std::env::var("APPROVAL_RECIPIENTS")
            .map(|value| {
                value
                    .split(',')
                    .map(|recipient| recipient.trim().to_string())
                    .filter(|recipient| !recipient.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        if approval_recipients.is_empty() {
            info!("No APPROVAL_RECIPIENTS configured. The notify-approval ingress has nobody to alert.");
        }

        Self {
            content_api_url,
            port,
            approval_recipients,
            message_base_delay_ms: env_millis("MESSAGE_BASE_DELAY_MS", 12_000),
            message_jitter_range_ms: env_millis("MESSAGE_JITTER_RANGE_MS", 3_000),
            transport_webhook_url: std::env::var("TRANSPORT_WEBHOOK_URL").ok(),
            transport_webhook_key: std::env::var("TRANSPORT_WEBHOOK_KEY").unwrap_or_default(),
            external_api_timeout: Duration::from_secs(DEFAULT_EXTERNAL_API_TIMEOUT_SECS),
        }
    }
}

fn env_millis(var: &str, default: u64) -> u64 {
    match std::env::var(var) {
        Ok(value) => match value.parse::<u64>() {
            Ok(millis) => millis,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    var, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
