mod dispatcher;

pub use dispatcher::{NotificationDispatcher, NotifyError};

use actix_web::{web, HttpResponse};
use postpilot_api_structs::{inbound_message, notify_approval, send_approval_requests};
use postpilot_infra::Context;
use std::sync::Arc;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/notify-approval", web::post().to(notify_approval_controller));
    cfg.route(
        "/messages/inbound",
        web::post().to(inbound_message_controller),
    );
    cfg.route(
        "/approval-requests",
        web::post().to(send_approval_requests_controller),
    );
}

pub async fn notify_approval_controller(
    body: web::Json<notify_approval::RequestBody>,
    dispatcher: web::Data<Arc<NotificationDispatcher>>,
    ctx: web::Data<Context>,
) -> HttpResponse {
    let body = body.0;
    match dispatcher
        .notify_approval(&ctx, &body.post_id, &body.title, &body.message)
        .await
    {
        Ok(_) => HttpResponse::Ok().json(notify_approval::APIResponse::ok()),
        Err(e) => {
            HttpResponse::InternalServerError().json(notify_approval::APIResponse::err(e.to_string()))
        }
    }
}

pub async fn inbound_message_controller(
    body: web::Json<inbound_message::RequestBody>,
    dispatcher: web::Data<Arc<NotificationDispatcher>>,
    ctx: web::Data<Context>,
) -> HttpResponse {
    let body = body.0;
    dispatcher.handle_message(&ctx, &body.sender, &body.text).await;
    HttpResponse::Ok().json(inbound_message::APIResponse::ok())
}

pub async fn send_approval_requests_controller(
    body: web::Json<send_approval_requests::RequestBody>,
    dispatcher: web::Data<Arc<NotificationDispatcher>>,
    ctx: web::Data<Context>,
) -> HttpResponse {
    let body = body.0;
    let dispatcher = dispatcher.get_ref().clone();
    let ctx = ctx.get_ref().clone();

    // Bulk blasts run for minutes because of the deliberate double-pacing;
    // the request only acknowledges that the batch started.
    actix_web::rt::spawn(async move {
        dispatcher
            .send_bulk_approval_requests(&ctx, &body.post_ids, &body.recipients)
            .await;
    });

    HttpResponse::Ok().json(send_approval_requests::APIResponse::ok())
}
