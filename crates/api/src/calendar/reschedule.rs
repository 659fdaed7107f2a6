use crate::calendar::store::CalendarEventStore;
use crate::shared::usecase::{execute, UseCase};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use postpilot_domain::{CalendarEvent, PostStatus, Schedule, ID};
use postpilot_infra::Context;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum RescheduleError {
    #[error("The calendar event with id: {0} was not found. The calendar is out of date.")]
    EventNotFound(ID),
    #[error("The event with id: {0} is already being rescheduled")]
    AlreadyInFlight(ID),
    #[error("Failed to look up the schedule for post: {0}")]
    ScheduleResolution(ID),
    #[error("Failed to create a schedule for post: {0}")]
    ScheduleCreate(ID),
    #[error("Failed to update the schedule for post: {0}")]
    ScheduleUpdate(ID),
}

/// Events moved onto a time grid get a fixed one hour display duration.
const TIME_GRID_EVENT_DURATION_HOURS: i64 = 1;

/// Drives one drag-drop or slot-click reschedule: resolve the post's schedule
/// record, write the new run time, and only then touch the local event list.
/// Nothing is mutated before the server confirms, so a failed reschedule
/// leaves the calendar exactly as it was.
///
/// Reschedules of the same event must not overlap; a second call while one is
/// in flight is rejected. Different events reschedule independently.
pub struct RescheduleCoordinator {
    store: Arc<CalendarEventStore>,
    in_flight: Mutex<HashSet<ID>>,
}

impl RescheduleCoordinator {
    pub fn new(store: Arc<CalendarEventStore>) -> Self {
        Self {
            store,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub async fn reschedule(
        &self,
        ctx: &Context,
        event_id: &ID,
        target_date: NaiveDate,
        target_hour: Option<u32>,
    ) -> Result<CalendarEvent, RescheduleError> {
        let event = self
            .store
            .find_event(event_id)
            .ok_or_else(|| RescheduleError::EventNotFound(event_id.clone()))?;

        let _guard = self.begin(event_id)?;

        let new_run_at = new_run_at_for(&event, target_date, target_hour);

        let usecase = RescheduleEventUseCase {
            post_id: event.post_id.clone(),
            new_run_at,
        };
        let schedule = execute(usecase, ctx).await.map_err(|e| match e {
            UseCaseErrors::ScheduleResolution => {
                RescheduleError::ScheduleResolution(event.post_id.clone())
            }
            UseCaseErrors::ScheduleCreate => RescheduleError::ScheduleCreate(event.post_id.clone()),
            UseCaseErrors::ScheduleUpdate => RescheduleError::ScheduleUpdate(event.post_id.clone()),
        })?;

        let new_end = if target_hour.is_some() {
            schedule.run_at + Duration::hours(TIME_GRID_EVENT_DURATION_HOURS)
        } else {
            schedule.run_at + (event.end - event.start)
        };
        self.store
            .commit_event_move(event_id, schedule.run_at, new_end);

        // Reconcile against the source of truth. The commit above stands even
        // if the refresh fails; the next successful load converges.
        if self.store.load_events(ctx).await.is_err() {
            warn!(
                "Failed to reload calendar events after rescheduling event: {}",
                event_id
            );
        }

        let mut updated = event;
        updated.start = schedule.run_at;
        updated.end = new_end;
        Ok(updated)
    }

    fn begin(&self, event_id: &ID) -> Result<InFlightGuard<'_>, RescheduleError> {
        let mut in_flight = self.in_flight.lock().unwrap();
        if !in_flight.insert(event_id.clone()) {
            return Err(RescheduleError::AlreadyInFlight(event_id.clone()));
        }
        Ok(InFlightGuard {
            coordinator: self,
            event_id: event_id.clone(),
        })
    }
}

struct InFlightGuard<'a> {
    coordinator: &'a RescheduleCoordinator,
    event_id: ID,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.coordinator
            .in_flight
            .lock()
            .unwrap()
            .remove(&self.event_id);
    }
}

/// Month-view drops carry only a date: the event keeps its time-of-day.
/// Week and day view drops target an hour slot: the minute resets to zero.
fn new_run_at_for(
    event: &CalendarEvent,
    target_date: NaiveDate,
    target_hour: Option<u32>,
) -> DateTime<Utc> {
    let time = match target_hour {
        Some(hour) => NaiveTime::from_hms(hour.min(23), 0, 0),
        None => event.start.time(),
    };
    DateTime::from_utc(target_date.and_time(time), Utc)
}

/// Fetch-or-create against the schedules service: a post with a schedule gets
/// a PATCH keeping its stored timezone, a post without one gets a fresh UTC
/// schedule. Resource absence is control flow here, not an error.
#[derive(Debug)]
pub struct RescheduleEventUseCase {
    pub post_id: ID,
    pub new_run_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    ScheduleResolution,
    ScheduleCreate,
    ScheduleUpdate,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RescheduleEventUseCase {
    type Response = Schedule;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Errors> {
        let existing = ctx
            .apis
            .schedules
            .find_by_post(&self.post_id)
            .await
            .map_err(|_| UseCaseErrors::ScheduleResolution)?;

        match existing {
            Some(schedule) => ctx
                .apis
                .schedules
                .update(&schedule.id, self.new_run_at, schedule.timezone)
                .await
                .map_err(|_| UseCaseErrors::ScheduleUpdate),
            None => {
                let schedule = ctx
                    .apis
                    .schedules
                    .create(&self.post_id, self.new_run_at, chrono_tz::UTC)
                    .await
                    .map_err(|_| UseCaseErrors::ScheduleCreate)?;

                // Newly scheduled posts move to SCHEDULED. Best effort, the
                // schedule write already succeeded.
                if let Err(e) = ctx
                    .apis
                    .posts
                    .patch_status(&self.post_id, PostStatus::Scheduled)
                    .await
                {
                    warn!("Failed to mark post: {} as scheduled: {:?}", self.post_id, e);
                }

                Ok(schedule)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{scheduled_post, setup_test_context, unscheduled_post};
    use chrono::TimeZone;
    use postpilot_infra::{IPostsApi, ScheduleRequest};
    use tokio::sync::Notify;

    async fn loaded_store(ctx: &Context) -> Arc<CalendarEventStore> {
        let store = Arc::new(CalendarEventStore::new(NaiveDate::from_ymd(2024, 6, 1)));
        store.load_events(ctx).await.expect("To load events");
        store
    }

    #[tokio::test]
    async fn a_post_without_a_schedule_gets_a_created_one() {
        let (ctx, apis) = setup_test_context();

        let mut post = unscheduled_post("Fresh");
        // Visible on the calendar through an embedded schedule on the posts
        // side, but unknown to the schedules service.
        post.schedule = Some(postpilot_domain::Schedule::new(
            post.id.clone(),
            Utc.ymd(2024, 6, 10).and_hms(9, 0, 0),
            chrono_tz::UTC,
        ));
        let post_id = post.id.clone();
        apis.posts.insert(post);

        let store = loaded_store(&ctx).await;
        let coordinator = RescheduleCoordinator::new(store);

        let updated = coordinator
            .reschedule(
                &ctx,
                &post_id,
                NaiveDate::from_ymd(2024, 6, 15),
                Some(14),
            )
            .await
            .expect("To reschedule");

        assert_eq!(updated.start, Utc.ymd(2024, 6, 15).and_hms(14, 0, 0));
        assert_eq!(updated.end, Utc.ymd(2024, 6, 15).and_hms(15, 0, 0));

        let requests = apis.schedules.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0],
            ScheduleRequest::Create {
                post_id: post_id.clone(),
                run_at: Utc.ymd(2024, 6, 15).and_hms(14, 0, 0),
                timezone: chrono_tz::UTC,
            }
        );

        // The create path also marks the post as scheduled
        let post = apis.posts.find(&post_id).await.unwrap().unwrap();
        assert_eq!(post.status, PostStatus::Scheduled);
    }

    #[tokio::test]
    async fn a_month_view_drop_keeps_the_time_of_day() {
        let (ctx, apis) = setup_test_context();

        let post = scheduled_post("Existing", Utc.ymd(2024, 6, 1).and_hms(9, 0, 0));
        let post_id = post.id.clone();
        let schedule = post.schedule.clone().unwrap();
        apis.posts.insert(post);
        apis.schedules.insert(schedule.clone());

        let store = loaded_store(&ctx).await;
        let coordinator = RescheduleCoordinator::new(store);

        let updated = coordinator
            .reschedule(&ctx, &post_id, NaiveDate::from_ymd(2024, 6, 20), None)
            .await
            .expect("To reschedule");

        assert_eq!(updated.start, Utc.ymd(2024, 6, 20).and_hms(9, 0, 0));
        assert_eq!(updated.end, Utc.ymd(2024, 6, 20).and_hms(9, 0, 0));
        assert_eq!(
            apis.schedules.requests(),
            vec![ScheduleRequest::Update {
                schedule_id: schedule.id.clone(),
                run_at: Utc.ymd(2024, 6, 20).and_hms(9, 0, 0),
                timezone: chrono_tz::UTC,
            }]
        );
    }

    #[tokio::test]
    async fn an_unknown_event_is_a_stale_calendar() {
        let (ctx, _apis) = setup_test_context();
        let store = loaded_store(&ctx).await;
        let coordinator = RescheduleCoordinator::new(store);

        let res = coordinator
            .reschedule(
                &ctx,
                &Default::default(),
                NaiveDate::from_ymd(2024, 6, 15),
                None,
            )
            .await;
        assert!(matches!(res, Err(RescheduleError::EventNotFound(_))));
    }

    #[tokio::test]
    async fn a_failed_write_leaves_the_calendar_untouched() {
        let (ctx, apis) = setup_test_context();

        let post = scheduled_post("Sticky", Utc.ymd(2024, 6, 1).and_hms(9, 0, 0));
        let post_id = post.id.clone();
        apis.schedules.insert(post.schedule.clone().unwrap());
        apis.posts.insert(post);

        let store = loaded_store(&ctx).await;
        let coordinator = RescheduleCoordinator::new(store.clone());

        apis.schedules.set_fail_writes(true);
        let res = coordinator
            .reschedule(&ctx, &post_id, NaiveDate::from_ymd(2024, 6, 20), None)
            .await;
        assert!(matches!(res, Err(RescheduleError::ScheduleUpdate(_))));

        let event = store.find_event(&post_id).expect("Event to exist");
        assert_eq!(event.start, Utc.ymd(2024, 6, 1).and_hms(9, 0, 0));
    }

    #[tokio::test]
    async fn a_failed_lookup_maps_to_schedule_resolution() {
        let (ctx, apis) = setup_test_context();

        let post = scheduled_post("Unreachable", Utc.ymd(2024, 6, 1).and_hms(9, 0, 0));
        let post_id = post.id.clone();
        apis.posts.insert(post);

        let store = loaded_store(&ctx).await;
        let coordinator = RescheduleCoordinator::new(store);

        apis.schedules.set_fail_lookups(true);
        let res = coordinator
            .reschedule(&ctx, &post_id, NaiveDate::from_ymd(2024, 6, 20), None)
            .await;
        assert!(matches!(res, Err(RescheduleError::ScheduleResolution(_))));
    }

    #[tokio::test]
    async fn a_second_reschedule_of_the_same_event_is_rejected() {
        let (ctx, apis) = setup_test_context();

        let post = scheduled_post("Contended", Utc.ymd(2024, 6, 1).and_hms(9, 0, 0));
        let post_id = post.id.clone();
        apis.schedules.insert(post.schedule.clone().unwrap());
        apis.posts.insert(post);

        let store = loaded_store(&ctx).await;
        let coordinator = RescheduleCoordinator::new(store);

        let gate = Arc::new(Notify::new());
        apis.schedules.set_write_gate(gate.clone());

        let first = coordinator.reschedule(&ctx, &post_id, NaiveDate::from_ymd(2024, 6, 20), Some(10));
        let second = async {
            tokio::task::yield_now().await;
            let res = coordinator
                .reschedule(&ctx, &post_id, NaiveDate::from_ymd(2024, 6, 21), Some(11))
                .await;
            assert!(matches!(res, Err(RescheduleError::AlreadyInFlight(_))));
            gate.notify_one();
        };

        let (first_res, _) = tokio::join!(first, second);
        assert!(first_res.is_ok());

        // Only the first call reached the schedules service
        assert_eq!(apis.schedules.requests().len(), 1);
    }
}
