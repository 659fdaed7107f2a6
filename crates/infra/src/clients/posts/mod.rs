mod http;
mod inmemory;

pub use http::HttpPostsApi;
pub use inmemory::InMemoryPostsApi;

use postpilot_domain::{Post, PostStatus, ID};

/// Posts service collaborator. The content service owns the records; this
/// side only reads them and patches lifecycle status.
#[async_trait::async_trait]
pub trait IPostsApi: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Post>>;
    async fn find(&self, post_id: &ID) -> anyhow::Result<Option<Post>>;
    async fn patch_status(&self, post_id: &ID, status: PostStatus) -> anyhow::Result<Post>;
}
