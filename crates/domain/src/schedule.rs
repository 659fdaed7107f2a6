use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

/// Binds a post to a future publish instant. The instant is stored as a UTC
/// timestamp; the timezone is carried alongside for display purposes only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: ID,
    pub post_id: ID,
    pub run_at: DateTime<Utc>,
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    pub status: ScheduleStatus,
}

fn default_timezone() -> Tz {
    chrono_tz::UTC
}

impl Schedule {
    pub fn new(post_id: ID, run_at: DateTime<Utc>, timezone: Tz) -> Self {
        Self {
            id: Default::default(),
            post_id,
            run_at,
            timezone,
            status: ScheduleStatus::Pending,
        }
    }
}

impl Entity for Schedule {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn it_defaults_missing_timezone_to_utc() {
        let schedule: Schedule = serde_json::from_str(
            r#"{
                "id": "7895faf1-a14e-4f24-a8bb-c5d9d4d24f17",
                "postId": "a77e63b5-0d3c-4a37-b1b7-e824b2296e0b",
                "runAt": "2024-06-15T14:00:00Z",
                "status": "PENDING"
            }"#,
        )
        .expect("To deserialize schedule");
        assert_eq!(schedule.timezone, chrono_tz::UTC);
        assert_eq!(schedule.run_at, Utc.ymd(2024, 6, 15).and_hms(14, 0, 0));
    }

    #[test]
    fn it_parses_named_timezones() {
        let schedule: Schedule = serde_json::from_str(
            r#"{
                "id": "7895faf1-a14e-4f24-a8bb-c5d9d4d24f17",
                "postId": "a77e63b5-0d3c-4a37-b1b7-e824b2296e0b",
                "runAt": "2024-06-15T14:00:00Z",
                "timezone": "Europe/Oslo",
                "status": "PENDING"
            }"#,
        )
        .expect("To deserialize schedule");
        assert_eq!(schedule.timezone, chrono_tz::Europe::Oslo);
    }
}
