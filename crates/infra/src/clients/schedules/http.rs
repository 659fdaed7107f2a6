use super::ISchedulesApi;
use crate::clients::shared::RestClient;
use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use postpilot_domain::{Schedule, ID};
use serde::Serialize;

pub struct HttpSchedulesApi {
    api: RestClient,
}

impl HttpSchedulesApi {
    pub fn new(api: RestClient) -> Self {
        Self { api }
    }
}

/// Wire format for instants: RFC3339 with millisecond precision and a `Z`
/// suffix, e.g. `2024-06-15T14:00:00.000Z`.
pub fn format_run_at(run_at: &DateTime<Utc>) -> String {
    run_at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateScheduleRequest {
    post_id: ID,
    run_at: String,
    timezone: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateScheduleRequest {
    run_at: String,
    timezone: String,
}

#[async_trait::async_trait]
impl ISchedulesApi for HttpSchedulesApi {
    async fn find_by_post(&self, post_id: &ID) -> anyhow::Result<Option<Schedule>> {
        self.api.get(&format!("schedules/post/{}", post_id)).await
    }

    async fn create(
        &self,
        post_id: &ID,
        run_at: DateTime<Utc>,
        timezone: Tz,
    ) -> anyhow::Result<Schedule> {
        let body = CreateScheduleRequest {
            post_id: post_id.clone(),
            run_at: format_run_at(&run_at),
            timezone: timezone.to_string(),
        };
        self.api.post(&body, "schedules").await
    }

    async fn update(
        &self,
        schedule_id: &ID,
        run_at: DateTime<Utc>,
        timezone: Tz,
    ) -> anyhow::Result<Schedule> {
        let body = UpdateScheduleRequest {
            run_at: format_run_at(&run_at),
            timezone: timezone.to_string(),
        };
        self.api
            .patch(&body, &format!("schedules/{}", schedule_id))
            .await
    }
}
