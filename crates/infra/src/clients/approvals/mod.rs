mod http;
mod inmemory;

pub use http::HttpApprovalApi;
pub use inmemory::{ApprovalRequest, InMemoryApprovalApi};

use postpilot_domain::{ApprovalOutcome, PostPreview, ID};

/// Approval workflow collaborator. Mutations return the affected post's title
/// and new status so replies can echo them.
#[async_trait::async_trait]
pub trait IApprovalApi: Send + Sync {
    async fn approve(&self, post_id: &ID) -> anyhow::Result<ApprovalOutcome>;
    async fn request_change(&self, post_id: &ID, feedback: &str) -> anyhow::Result<ApprovalOutcome>;
    async fn pause(&self, post_id: &ID) -> anyhow::Result<ApprovalOutcome>;
    async fn reject(&self, post_id: &ID, feedback: Option<&str>) -> anyhow::Result<ApprovalOutcome>;
    async fn get_post_preview(&self, post_id: &ID) -> anyhow::Result<PostPreview>;
}
