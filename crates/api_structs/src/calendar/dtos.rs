use chrono::{DateTime, NaiveDate, Utc};
use postpilot_domain::{
    CalendarDay, CalendarEvent, CalendarGrid, CalendarMonth, CalendarWeek, PostStatus,
    SocialPlatform, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventDTO {
    pub id: ID,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Hex color derived from the post status, ready for styling
    pub color: String,
    pub post_id: ID,
    pub brand_id: ID,
    pub status: PostStatus,
    pub platforms: Vec<SocialPlatform>,
    pub summary: String,
}

impl CalendarEventDTO {
    pub fn new(event: CalendarEvent) -> Self {
        Self {
            id: event.id,
            title: event.title,
            start: event.start,
            end: event.end,
            color: event.color.as_hex().to_string(),
            post_id: event.post_id,
            brand_id: event.brand_id,
            status: event.status,
            platforms: event.platforms,
            summary: event.summary,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDayDTO {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_current_month: bool,
    pub is_weekend: bool,
    pub events: Vec<CalendarEventDTO>,
}

impl CalendarDayDTO {
    pub fn new(day: CalendarDay) -> Self {
        Self {
            date: day.date,
            is_today: day.is_today,
            is_current_month: day.is_current_month,
            is_weekend: day.is_weekend,
            events: day.events.into_iter().map(CalendarEventDTO::new).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWeekDTO {
    pub week_number: u32,
    pub days: Vec<CalendarDayDTO>,
}

impl CalendarWeekDTO {
    pub fn new(week: CalendarWeek) -> Self {
        Self {
            week_number: week.week_number,
            days: week.days.into_iter().map(CalendarDayDTO::new).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonthDTO {
    pub weeks: Vec<CalendarWeekDTO>,
}

impl CalendarMonthDTO {
    pub fn new(month: CalendarMonth) -> Self {
        Self {
            weeks: month.weeks.into_iter().map(CalendarWeekDTO::new).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum CalendarGridDTO {
    Month(CalendarMonthDTO),
    Week(CalendarWeekDTO),
    Day(CalendarDayDTO),
}

impl CalendarGridDTO {
    pub fn new(grid: CalendarGrid) -> Self {
        match grid {
            CalendarGrid::Month(month) => Self::Month(CalendarMonthDTO::new(month)),
            CalendarGrid::Week(week) => Self::Week(CalendarWeekDTO::new(week)),
            CalendarGrid::Day(day) => Self::Day(CalendarDayDTO::new(day)),
        }
    }
}
