//! Pure date projections for the scheduling calendar. Weeks start on Sunday.
//! Events are bucketed by the UTC calendar date of their start instant.

use super::grid::{CalendarDay, CalendarMonth, CalendarView, CalendarWeek, DateRange};
use crate::calendar_event::CalendarEvent;
use crate::date;
use chrono::{prelude::*, Duration};
use itertools::Itertools;
use std::collections::HashMap;

/// Rolls a date back to the Sunday on or before it.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// The Saturday on or after `date`, i.e. the end of its week.
pub fn week_end_of(date: NaiveDate) -> NaiveDate {
    week_start_of(date) + Duration::days(6)
}

pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.ymd(date.year(), date.month(), date.day()).and_hms(0, 0, 0)
}

pub fn day_end(date: NaiveDate) -> DateTime<Utc> {
    Utc.ymd(date.year(), date.month(), date.day())
        .and_hms_milli(23, 59, 59, 999)
}

/// The instant range a view covers around its reference date. The month range
/// is extended to whole weeks on both ends so that it tiles the month grid.
pub fn date_range_for(reference: NaiveDate, view: CalendarView) -> DateRange {
    match view {
        CalendarView::Month => {
            let first = NaiveDate::from_ymd(reference.year(), reference.month(), 1);
            let last = NaiveDate::from_ymd(
                reference.year(),
                reference.month(),
                date::get_month_length(reference.year(), reference.month()),
            );
            DateRange {
                start: day_start(week_start_of(first)),
                end: day_end(week_end_of(last)),
            }
        }
        CalendarView::Week => {
            let start = week_start_of(reference);
            DateRange {
                start: day_start(start),
                end: day_end(start + Duration::days(6)),
            }
        }
        CalendarView::Day => DateRange {
            start: day_start(reference),
            end: day_end(reference),
        },
    }
}

pub fn is_same_day(a: &DateTime<Utc>, b: &DateTime<Utc>) -> bool {
    a.date() == b.date()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

/// Day-of-year week numbering: week 1 starts on January 1st and weeks roll
/// over on Sundays. Not ISO-8601; the displayed numbers depend on this exact
/// formula.
pub fn week_number(date: NaiveDate) -> u32 {
    let jan1 = NaiveDate::from_ymd(date.year(), 1, 1);
    let offset = jan1.weekday().num_days_from_sunday();
    (date.ordinal() + offset + 6) / 7
}

/// Groups events onto the given days. An event lands on a day iff its start
/// falls on that UTC calendar date. Events within a day are ordered by start.
pub fn bucket_events_by_day(
    events: &[CalendarEvent],
    days: &[NaiveDate],
) -> HashMap<NaiveDate, Vec<CalendarEvent>> {
    days.iter()
        .map(|day| {
            let on_day = events
                .iter()
                .filter(|e| e.start.naive_utc().date() == *day)
                .cloned()
                .sorted_by_key(|e| e.start)
                .collect::<Vec<_>>();
            (*day, on_day)
        })
        .collect()
}

fn build_days(
    dates: Vec<NaiveDate>,
    reference: NaiveDate,
    events: &[CalendarEvent],
    today: NaiveDate,
) -> Vec<CalendarDay> {
    let mut buckets = bucket_events_by_day(events, &dates);
    dates
        .into_iter()
        .map(|d| CalendarDay {
            date: d,
            is_today: is_today(d, today),
            is_current_month: d.year() == reference.year() && d.month() == reference.month(),
            is_weekend: is_weekend(d),
            events: buckets.remove(&d).unwrap_or_default(),
        })
        .collect()
}

fn week_of(
    start: NaiveDate,
    reference: NaiveDate,
    events: &[CalendarEvent],
    today: NaiveDate,
) -> CalendarWeek {
    let dates = (0..7).map(|i| start + Duration::days(i)).collect::<Vec<_>>();
    CalendarWeek {
        week_number: week_number(start),
        days: build_days(dates, reference, events, today),
    }
}

pub fn build_day(reference: NaiveDate, events: &[CalendarEvent], today: NaiveDate) -> CalendarDay {
    build_days(vec![reference], reference, events, today)
        .pop()
        .unwrap()
}

pub fn build_week(reference: NaiveDate, events: &[CalendarEvent], today: NaiveDate) -> CalendarWeek {
    week_of(week_start_of(reference), reference, events, today)
}

/// Tiles the month of `reference` with whole Sunday-to-Saturday weeks. The
/// first week starts on or before the 1st, the last week ends on or after the
/// last day of the month, and every day belongs to exactly one week.
pub fn build_month(
    reference: NaiveDate,
    events: &[CalendarEvent],
    today: NaiveDate,
) -> CalendarMonth {
    let first = NaiveDate::from_ymd(reference.year(), reference.month(), 1);
    let last = NaiveDate::from_ymd(
        reference.year(),
        reference.month(),
        date::get_month_length(reference.year(), reference.month()),
    );

    let mut weeks = Vec::new();
    let mut cursor = week_start_of(first);
    loop {
        weeks.push(week_of(cursor, reference, events, today));
        if cursor + Duration::days(6) >= last {
            break;
        }
        cursor = cursor + Duration::days(7);
    }
    CalendarMonth { weeks }
}

/// Header label for the navigation bar. The formats are a display contract
/// with the presentation layer.
pub fn format_range_label(reference: NaiveDate, view: CalendarView) -> String {
    match view {
        CalendarView::Month => reference.format("%B %Y").to_string(),
        CalendarView::Week => {
            let start = week_start_of(reference);
            let end = start + Duration::days(6);
            format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
        }
        CalendarView::Day => reference.format("%A, %B %-d, %Y").to_string(),
    }
}

/// Moves the reference date by one unit of the view. Month steps keep the
/// day-of-month, clipped to the target month's length.
pub fn shift_reference(reference: NaiveDate, view: CalendarView, delta: i32) -> NaiveDate {
    match view {
        CalendarView::Month => date::add_months(reference, delta),
        CalendarView::Week => reference + Duration::days(7 * delta as i64),
        CalendarView::Day => reference + Duration::days(delta as i64),
    }
}
