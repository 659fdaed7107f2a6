use super::IMessageTransport;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub struct InMemoryTransport {
    sent: Mutex<Vec<(String, String)>>,
    fail_sends: AtomicBool,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_sends: AtomicBool::new(false),
        }
    }

    /// Messages delivered so far, as `(recipient, text)` pairs.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }
}

impl Default for InMemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMessageTransport for InMemoryTransport {
    async fn send(&self, recipient: &str, text: &str) -> anyhow::Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(anyhow::Error::msg("Transport unavailable"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), text.to_string()));
        Ok(())
    }
}
