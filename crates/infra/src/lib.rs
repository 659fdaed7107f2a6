mod clients;
mod config;
mod rate_limiter;
mod system;
mod transport;

pub use clients::{
    format_run_at, Apis, ApprovalRequest, HttpApprovalApi, HttpPostsApi, HttpSchedulesApi,
    IApprovalApi, IPostsApi, ISchedulesApi, InMemoryApprovalApi, InMemoryPostsApi,
    InMemorySchedulesApi, RestClient, ScheduleRequest,
};
pub use config::Config;
pub use rate_limiter::{
    RateLimiter, RateLimiterStats, DEFAULT_BASE_DELAY_MS, DEFAULT_JITTER_RANGE_MS,
};
pub use system::{ISys, RealSys};
pub use transport::{IMessageTransport, InMemoryTransport, WebhookTransport, TRANSPORT_KEY_HEADER};

use std::sync::Arc;

#[derive(Clone)]
pub struct Context {
    pub apis: Apis,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl Context {
    pub fn create(apis: Apis, config: Config) -> Self {
        Self {
            apis,
            config,
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> Context {
    let config = Config::new();
    let apis = Apis::create_http(&config);
    Context::create(apis, config)
}

/// Context wired to the in-memory collaborators. Used by tests.
pub fn setup_context_inmemory() -> Context {
    Context::create(Apis::create_inmemory(), Config::new())
}
