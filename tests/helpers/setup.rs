use postpilot_api::Application;
use postpilot_infra::{
    Apis, Config, Context, InMemoryApprovalApi, InMemoryPostsApi, InMemorySchedulesApi,
    InMemoryTransport,
};
use std::sync::Arc;

pub struct TestApp {
    pub posts: Arc<InMemoryPostsApi>,
    pub schedules: Arc<InMemorySchedulesApi>,
    pub approvals: Arc<InMemoryApprovalApi>,
    pub transport: Arc<InMemoryTransport>,
    pub config: Config,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, String) {
    let posts = Arc::new(InMemoryPostsApi::new());
    let schedules = Arc::new(InMemorySchedulesApi::new());
    let approvals = Arc::new(InMemoryApprovalApi::new());
    let transport = Arc::new(InMemoryTransport::new());

    let mut config = Config::new();
    config.port = 0; // Random port
    // Zero pacing keeps the end-to-end flows fast
    config.message_base_delay_ms = 0;
    config.message_jitter_range_ms = 0;
    config.approval_recipients = vec!["approver-1".to_string()];

    let apis = Apis {
        posts: posts.clone(),
        schedules: schedules.clone(),
        approvals: approvals.clone(),
        transport: transport.clone(),
    };
    let ctx = Context::create(apis, config.clone());

    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        posts,
        schedules,
        approvals,
        transport,
        config,
    };
    (app, address)
}
