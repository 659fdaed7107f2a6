pub mod load_events;
mod reschedule;
mod store;

pub use reschedule::{RescheduleCoordinator, RescheduleError, RescheduleEventUseCase};
pub use store::CalendarEventStore;

use crate::error::PostpilotError;
use actix_web::{web, HttpResponse};
use postpilot_api_structs::{
    get_calendar_view, navigate_calendar, reschedule_event, CalendarViewResponse,
};
use postpilot_infra::Context;
use std::sync::Arc;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/calendar/view", web::get().to(get_calendar_view_controller));
    cfg.route(
        "/calendar/navigate",
        web::post().to(navigate_calendar_controller),
    );
    cfg.route(
        "/calendar/reschedule",
        web::post().to(reschedule_event_controller),
    );
}

async fn current_view_response(
    store: &CalendarEventStore,
    ctx: &Context,
) -> Result<CalendarViewResponse, PostpilotError> {
    store
        .load_events(ctx)
        .await
        .map_err(|_| PostpilotError::InternalError)?;
    Ok(CalendarViewResponse::new(
        store.range_label(),
        store.project(ctx.sys.today()),
    ))
}

pub async fn get_calendar_view_controller(
    query_params: web::Query<get_calendar_view::QueryParams>,
    store: web::Data<Arc<CalendarEventStore>>,
    ctx: web::Data<Context>,
) -> Result<HttpResponse, PostpilotError> {
    if let Some(view) = query_params.view {
        store.set_view(view);
    }
    if let Some(date) = query_params.date {
        store.set_reference_date(date);
    }

    let res = current_view_response(&store, &ctx).await?;
    Ok(HttpResponse::Ok().json(res))
}

pub async fn navigate_calendar_controller(
    body: web::Json<navigate_calendar::RequestBody>,
    store: web::Data<Arc<CalendarEventStore>>,
    ctx: web::Data<Context>,
) -> Result<HttpResponse, PostpilotError> {
    match body.direction {
        navigate_calendar::Direction::Next => store.navigate_next(),
        navigate_calendar::Direction::Previous => store.navigate_previous(),
        navigate_calendar::Direction::Today => store.navigate_today(ctx.sys.today()),
    }

    let res = current_view_response(&store, &ctx).await?;
    Ok(HttpResponse::Ok().json(res))
}

fn handle_reschedule_error(e: RescheduleError) -> PostpilotError {
    match e {
        RescheduleError::EventNotFound(event_id) => PostpilotError::NotFound(format!(
            "The calendar event with id: {}, was not found.",
            event_id
        )),
        RescheduleError::AlreadyInFlight(event_id) => PostpilotError::Conflict(format!(
            "The event with id: {} is already being rescheduled.",
            event_id
        )),
        RescheduleError::ScheduleResolution(_)
        | RescheduleError::ScheduleCreate(_)
        | RescheduleError::ScheduleUpdate(_) => PostpilotError::InternalError,
    }
}

pub async fn reschedule_event_controller(
    body: web::Json<reschedule_event::RequestBody>,
    coordinator: web::Data<Arc<RescheduleCoordinator>>,
    ctx: web::Data<Context>,
) -> Result<HttpResponse, PostpilotError> {
    let body = body.0;

    if let Some(hour) = body.target_hour {
        if hour > 23 {
            return Err(PostpilotError::BadClientData(format!(
                "Invalid target hour: {}",
                hour
            )));
        }
    }

    coordinator
        .reschedule(&ctx, &body.event_id, body.target_date, body.target_hour)
        .await
        .map(|event| HttpResponse::Ok().json(reschedule_event::APIResponse::new(event)))
        .map_err(handle_reschedule_error)
}
