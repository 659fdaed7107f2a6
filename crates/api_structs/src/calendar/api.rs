use crate::calendar::dtos::{CalendarEventDTO, CalendarGridDTO};
use chrono::NaiveDate;
use postpilot_domain::{CalendarEvent, CalendarGrid, CalendarView, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarViewResponse {
    pub label: String,
    pub grid: CalendarGridDTO,
}

impl CalendarViewResponse {
    pub fn new(label: String, grid: CalendarGrid) -> Self {
        Self {
            label,
            grid: CalendarGridDTO::new(grid),
        }
    }
}

pub mod get_calendar_view {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub view: Option<CalendarView>,
        #[serde(default)]
        pub date: Option<NaiveDate>,
    }

    pub type APIResponse = CalendarViewResponse;
}

pub mod navigate_calendar {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Direction {
        Next,
        Previous,
        Today,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub direction: Direction,
    }

    pub type APIResponse = CalendarViewResponse;
}

pub mod reschedule_event {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub event_id: ID,
        pub target_date: NaiveDate,
        /// Hour of the target slot for week and day views. Whole-day month
        /// drops leave it out and the event keeps its time-of-day.
        #[serde(default)]
        pub target_hour: Option<u32>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub event: CalendarEventDTO,
    }

    impl APIResponse {
        pub fn new(event: CalendarEvent) -> Self {
            Self {
                event: CalendarEventDTO::new(event),
            }
        }
    }
}
