mod inmemory;
mod webhook;

pub use inmemory::InMemoryTransport;
pub use webhook::{WebhookTransport, TRANSPORT_KEY_HEADER};

/// Outbound chat delivery. The WhatsApp session itself lives in an external
/// gateway; the dispatcher only hands finished messages over.
#[async_trait::async_trait]
pub trait IMessageTransport: Send + Sync {
    async fn send(&self, recipient: &str, text: &str) -> anyhow::Result<()>;
}
