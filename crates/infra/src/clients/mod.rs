mod approvals;
mod posts;
mod schedules;
mod shared;

pub use approvals::{ApprovalRequest, HttpApprovalApi, IApprovalApi, InMemoryApprovalApi};
pub use posts::{HttpPostsApi, IPostsApi, InMemoryPostsApi};
pub use schedules::{
    format_run_at, HttpSchedulesApi, ISchedulesApi, InMemorySchedulesApi, ScheduleRequest,
};
pub use shared::RestClient;

use crate::config::Config;
use crate::transport::{IMessageTransport, InMemoryTransport, WebhookTransport};
use std::sync::Arc;
use tracing::warn;

/// The external collaborators the core talks to. All of them are owned by
/// other services; swapping in the in-memory variants gives a fully local
/// test double of the world.
#[derive(Clone)]
pub struct Apis {
    pub posts: Arc<dyn IPostsApi>,
    pub schedules: Arc<dyn ISchedulesApi>,
    pub approvals: Arc<dyn IApprovalApi>,
    pub transport: Arc<dyn IMessageTransport>,
}

impl Apis {
    pub fn create_http(config: &Config) -> Self {
        let rest = RestClient::new(config.content_api_url.clone(), config.external_api_timeout);

        let transport: Arc<dyn IMessageTransport> = match &config.transport_webhook_url {
            Some(url) => Arc::new(WebhookTransport::new(
                url.clone(),
                config.transport_webhook_key.clone(),
                config.external_api_timeout,
            )),
            None => {
                warn!("No TRANSPORT_WEBHOOK_URL configured. Outbound messages stay in memory.");
                Arc::new(InMemoryTransport::new())
            }
        };

        Self {
            posts: Arc::new(HttpPostsApi::new(rest.clone())),
            schedules: Arc::new(HttpSchedulesApi::new(rest.clone())),
            approvals: Arc::new(HttpApprovalApi::new(rest)),
            transport,
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            posts: Arc::new(InMemoryPostsApi::new()),
            schedules: Arc::new(InMemorySchedulesApi::new()),
            approvals: Arc::new(InMemoryApprovalApi::new()),
            transport: Arc::new(InMemoryTransport::new()),
        }
    }
}
