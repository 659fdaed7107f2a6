mod http;
mod inmemory;

pub use http::{format_run_at, HttpSchedulesApi};
pub use inmemory::{InMemorySchedulesApi, ScheduleRequest};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use postpilot_domain::{Schedule, ID};

/// Schedules service collaborator.
#[async_trait::async_trait]
pub trait ISchedulesApi: Send + Sync {
    /// `Ok(None)` means the post has no schedule yet; `Err` means the lookup
    /// itself failed. Callers branch on absence, they never treat it as a
    /// failure.
    async fn find_by_post(&self, post_id: &ID) -> anyhow::Result<Option<Schedule>>;
    async fn create(
        &self,
        post_id: &ID,
        run_at: DateTime<Utc>,
        timezone: Tz,
    ) -> anyhow::Result<Schedule>;
    async fn update(
        &self,
        schedule_id: &ID,
        run_at: DateTime<Utc>,
        timezone: Tz,
    ) -> anyhow::Result<Schedule>;
}
