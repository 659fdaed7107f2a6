use crate::shared::usecase::UseCase;
use postpilot_domain::{CalendarEvent, DateRange};
use postpilot_infra::Context;

/// Fetches all posts and projects the ones scheduled inside the range onto
/// the calendar. The posts service offers no range filter, so filtering
/// happens client-side.
#[derive(Debug)]
pub struct LoadCalendarEventsUseCase {
    pub range: DateRange,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    PostsUnavailable,
}

#[async_trait::async_trait(?Send)]
impl UseCase for LoadCalendarEventsUseCase {
    type Response = Vec<CalendarEvent>;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Errors> {
        let posts = ctx
            .apis
            .posts
            .list()
            .await
            .map_err(|_| UseCaseErrors::PostsUnavailable)?;

        let mut events = posts
            .iter()
            .filter_map(|post| {
                post.schedule.as_ref().and_then(|schedule| {
                    if self.range.contains(schedule.run_at) {
                        Some(CalendarEvent::from_post(post, schedule))
                    } else {
                        None
                    }
                })
            })
            .collect::<Vec<_>>();
        events.sort_by_key(|e| e.start);

        Ok(events)
    }
}
