mod calendar;
mod error;
mod notification;
mod shared;
mod status;

pub use calendar::{CalendarEventStore, RescheduleCoordinator, RescheduleError};
pub use error::PostpilotError;
pub use notification::{NotificationDispatcher, NotifyError};

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use postpilot_infra::{Context, RateLimiter};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    calendar::configure_routes(cfg);
    notification::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: Context) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context).await?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(context: Context) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr().unwrap().port();

        let store = Arc::new(CalendarEventStore::new(context.sys.today()));
        let coordinator = Arc::new(RescheduleCoordinator::new(store.clone()));
        let dispatcher = Arc::new(NotificationDispatcher::new(RateLimiter::new(
            context.config.message_base_delay_ms,
            context.config.message_jitter_range_ms,
        )));

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .app_data(web::Data::new(store.clone()))
                .app_data(web::Data::new(coordinator.clone()))
                .app_data(web::Data::new(dispatcher.clone()))
                .service(web::scope("/api/v1").configure(|cfg| configure_server_api(cfg)))
                .configure(|cfg| status::configure_routes(cfg))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
