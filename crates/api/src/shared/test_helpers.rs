use chrono::{DateTime, Utc};
use postpilot_domain::{Post, PostStatus, Schedule};
use postpilot_infra::{
    Apis, Config, Context, InMemoryApprovalApi, InMemoryPostsApi, InMemorySchedulesApi,
    InMemoryTransport,
};
use std::sync::Arc;

/// Handles onto the in-memory collaborators backing a test context.
pub struct TestApis {
    pub posts: Arc<InMemoryPostsApi>,
    pub schedules: Arc<InMemorySchedulesApi>,
    pub approvals: Arc<InMemoryApprovalApi>,
    pub transport: Arc<InMemoryTransport>,
}

pub fn setup_test_context() -> (Context, TestApis) {
    let posts = Arc::new(InMemoryPostsApi::new());
    let schedules = Arc::new(InMemorySchedulesApi::new());
    let approvals = Arc::new(InMemoryApprovalApi::new());
    let transport = Arc::new(InMemoryTransport::new());

    let apis = Apis {
        posts: posts.clone(),
        schedules: schedules.clone(),
        approvals: approvals.clone(),
        transport: transport.clone(),
    };
    let ctx = Context::create(apis, Config::new());

    (
        ctx,
        TestApis {
            posts,
            schedules,
            approvals,
            transport,
        },
    )
}

pub fn scheduled_post(title: &str, run_at: DateTime<Utc>) -> Post {
    let mut post = Post::new(Default::default(), title);
    post.status = PostStatus::Scheduled;
    post.schedule = Some(Schedule::new(post.id.clone(), run_at, chrono_tz::UTC));
    post
}

pub fn unscheduled_post(title: &str) -> Post {
    let mut post = Post::new(Default::default(), title);
    post.status = PostStatus::PendingApproval;
    post
}
