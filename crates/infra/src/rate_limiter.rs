use rand::Rng;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

pub const DEFAULT_BASE_DELAY_MS: u64 = 12_000;
pub const DEFAULT_JITTER_RANGE_MS: u64 = 3_000;

/// Per-recipient outbound message pacing. Consecutive sends to one recipient
/// are spaced by a base delay plus a uniform random jitter; distinct
/// recipients pace independently.
///
/// Callers reserve their send instant under the map lock before sleeping, so
/// two concurrent callers for the same recipient can never pace against the
/// same stale timestamp.
pub struct RateLimiter {
    base_delay: Duration,
    jitter_range_ms: u64,
    reservations: Mutex<HashMap<String, Instant>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiterStats {
    pub tracked_recipients: usize,
    /// Recipients still inside the base-delay window. Jitter is ignored, the
    /// count is a coarse gauge.
    pub throttled_recipients: usize,
}

impl RateLimiter {
    pub fn new(base_delay_ms: u64, jitter_range_ms: u64) -> Self {
        Self {
            base_delay: Duration::from_millis(base_delay_ms),
            jitter_range_ms,
            reservations: Mutex::new(HashMap::new()),
        }
    }

    fn sample_target_delay(&self) -> Duration {
        let jitter_range = self.jitter_range_ms as i64;
        let jitter = if jitter_range == 0 {
            0
        } else {
            rand::thread_rng().gen_range(-jitter_range..=jitter_range)
        };
        let delay = self.base_delay.as_millis() as i64 + jitter;
        Duration::from_millis(delay.max(0) as u64)
    }

    /// Suspends the caller until it is safe to send to `recipient`, then
    /// records the send.
    pub async fn wait_for_rate_limit(&self, recipient: &str) {
        let target_delay = self.sample_target_delay();
        let send_at = {
            let mut reservations = self.reservations.lock().unwrap();
            let now = Instant::now();
            let send_at = match reservations.get(recipient) {
                Some(last) => {
                    let earliest = *last + target_delay;
                    if earliest > now {
                        earliest
                    } else {
                        now
                    }
                }
                None => now,
            };
            reservations.insert(recipient.to_string(), send_at);
            send_at
        };
        sleep_until(send_at).await;
    }

    /// Non-suspending check against the base delay alone, without jitter.
    pub fn can_send_immediately(&self, recipient: &str) -> bool {
        let reservations = self.reservations.lock().unwrap();
        match reservations.get(recipient) {
            Some(last) => {
                let now = Instant::now();
                now >= *last && now - *last >= self.base_delay
            }
            None => true,
        }
    }

    /// Advisory estimate of the next send instant. A fresh jitter sample is
    /// drawn on every call, so two calls will disagree.
    pub fn get_next_available_time(&self, recipient: &str) -> Instant {
        let target_delay = self.sample_target_delay();
        let now = Instant::now();
        let reservations = self.reservations.lock().unwrap();
        match reservations.get(recipient) {
            Some(last) => {
                let earliest = *last + target_delay;
                if earliest > now {
                    earliest
                } else {
                    now
                }
            }
            None => now,
        }
    }

    /// Drops the tracking state for a recipient.
    pub fn clear_history(&self, recipient: &str) {
        self.reservations.lock().unwrap().remove(recipient);
    }

    pub fn get_stats(&self) -> RateLimiterStats {
        let reservations = self.reservations.lock().unwrap();
        let now = Instant::now();
        let throttled_recipients = reservations
            .values()
            .filter(|last| now < **last + self.base_delay)
            .count();
        RateLimiterStats {
            tracked_recipients: reservations.len(),
            throttled_recipients,
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DELAY_MS, DEFAULT_JITTER_RANGE_MS)
    }
}
