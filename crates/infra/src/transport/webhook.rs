use super::IMessageTransport;
use serde::Serialize;
use std::time::Duration;
use tracing::error;

pub const TRANSPORT_KEY_HEADER: &str = "postpilot-transport-key";

/// Delivers messages by POSTing them to the configured messaging gateway.
pub struct WebhookTransport {
    client: reqwest::Client,
    url: String,
    key: String,
}

impl WebhookTransport {
    pub fn new(url: String, key: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("To build the HTTP client");
        Self { client, url, key }
    }
}

#[derive(Debug, Serialize)]
struct OutboundMessage<'a> {
    recipient: &'a str,
    text: &'a str,
}

#[async_trait::async_trait]
impl IMessageTransport for WebhookTransport {
    async fn send(&self, recipient: &str, text: &str) -> anyhow::Result<()> {
        let res = self
            .client
            .post(&self.url)
            .header(TRANSPORT_KEY_HEADER, &self.key)
            .json(&OutboundMessage { recipient, text })
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] Messaging gateway error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            })?;

        res.error_for_status().map(|_| ()).map_err(|e| {
            error!(
                "[Unexpected Response] Messaging gateway error. Error message: {:?}",
                e
            );
            anyhow::Error::new(e)
        })
    }
}
