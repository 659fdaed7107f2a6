use crate::calendar_event::CalendarEvent;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Month,
    Week,
    Day,
}

/// Inclusive instant range covered by a calendar view.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_current_month: bool,
    pub is_weekend: bool,
    pub events: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarWeek {
    pub week_number: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth {
    pub weeks: Vec<CalendarWeek>,
}

/// The projection rendered for the current view.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarGrid {
    Month(CalendarMonth),
    Week(CalendarWeek),
    Day(CalendarDay),
}
