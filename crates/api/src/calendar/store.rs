use crate::calendar::load_events::{LoadCalendarEventsUseCase, UseCaseErrors};
use crate::shared::usecase::execute;
use chrono::{DateTime, NaiveDate, Utc};
use postpilot_domain::{calendar::engine, CalendarEvent, CalendarGrid, CalendarView, ID};
use postpilot_infra::Context;
use std::sync::Mutex;

/// The calendar's single piece of mutable state: the current view, the
/// reference date and the events loaded for them. Only two paths mutate the
/// event list: a completed `load_events` refresh and the reschedule
/// coordinator's post-confirmation commit.
pub struct CalendarEventStore {
    state: Mutex<StoreState>,
}

#[derive(Debug, Clone)]
struct StoreState {
    view: CalendarView,
    reference_date: NaiveDate,
    events: Vec<CalendarEvent>,
}

impl CalendarEventStore {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            state: Mutex::new(StoreState {
                view: CalendarView::Month,
                reference_date: today,
                events: Vec::new(),
            }),
        }
    }

    pub fn view(&self) -> CalendarView {
        self.state.lock().unwrap().view
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.state.lock().unwrap().reference_date
    }

    pub fn events(&self) -> Vec<CalendarEvent> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn set_view(&self, view: CalendarView) {
        self.state.lock().unwrap().view = view;
    }

    pub fn set_reference_date(&self, date: NaiveDate) {
        self.state.lock().unwrap().reference_date = date;
    }

    pub fn navigate_next(&self) {
        self.shift(1);
    }

    pub fn navigate_previous(&self) {
        self.shift(-1);
    }

    /// Resets the reference date to today. The view is untouched.
    pub fn navigate_today(&self, today: NaiveDate) {
        self.state.lock().unwrap().reference_date = today;
    }

    fn shift(&self, delta: i32) {
        let mut state = self.state.lock().unwrap();
        state.reference_date = engine::shift_reference(state.reference_date, state.view, delta);
    }

    /// Refreshes the event list from the posts service. The range is
    /// snapshotted before the fetch and the result replaces the list when the
    /// fetch completes, so overlapping refreshes resolve to whichever
    /// finished last.
    pub async fn load_events(&self, ctx: &Context) -> Result<Vec<CalendarEvent>, UseCaseErrors> {
        let range = {
            let state = self.state.lock().unwrap();
            engine::date_range_for(state.reference_date, state.view)
        };

        let events = execute(LoadCalendarEventsUseCase { range }, ctx).await?;
        self.state.lock().unwrap().events = events.clone();
        Ok(events)
    }

    /// Applies a confirmed reschedule to the in-memory event. Only the
    /// coordinator calls this, and only after the server accepted the change.
    pub fn commit_event_move(&self, event_id: &ID, start: DateTime<Utc>, end: DateTime<Utc>) {
        let mut state = self.state.lock().unwrap();
        if let Some(event) = state.events.iter_mut().find(|e| e.id == *event_id) {
            event.start = start;
            event.end = end;
        }
    }

    pub fn find_event(&self, event_id: &ID) -> Option<CalendarEvent> {
        self.state
            .lock()
            .unwrap()
            .events
            .iter()
            .find(|e| e.id == *event_id)
            .cloned()
    }

    /// Projects the current state onto the view's grid.
    pub fn project(&self, today: NaiveDate) -> CalendarGrid {
        let state = self.state.lock().unwrap();
        match state.view {
            CalendarView::Month => CalendarGrid::Month(engine::build_month(
                state.reference_date,
                &state.events,
                today,
            )),
            CalendarView::Week => CalendarGrid::Week(engine::build_week(
                state.reference_date,
                &state.events,
                today,
            )),
            CalendarView::Day => CalendarGrid::Day(engine::build_day(
                state.reference_date,
                &state.events,
                today,
            )),
        }
    }

    pub fn range_label(&self) -> String {
        let state = self.state.lock().unwrap();
        engine::format_range_label(state.reference_date, state.view)
    }
}
