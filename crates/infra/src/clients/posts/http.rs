use super::IPostsApi;
use crate::clients::shared::RestClient;
use postpilot_domain::{Post, PostStatus, ID};
use serde::Serialize;

pub struct HttpPostsApi {
    api: RestClient,
}

impl HttpPostsApi {
    pub fn new(api: RestClient) -> Self {
        Self { api }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PatchPostRequest {
    status: PostStatus,
}

#[async_trait::async_trait]
impl IPostsApi for HttpPostsApi {
    async fn list(&self) -> anyhow::Result<Vec<Post>> {
        self.api
            .get::<Vec<Post>>("posts")
            .await?
            .ok_or_else(|| anyhow::Error::msg("Posts collection not found"))
    }

    async fn find(&self, post_id: &ID) -> anyhow::Result<Option<Post>> {
        self.api.get(&format!("posts/{}", post_id)).await
    }

    async fn patch_status(&self, post_id: &ID, status: PostStatus) -> anyhow::Result<Post> {
        self.api
            .patch(&PatchPostRequest { status }, &format!("posts/{}", post_id))
            .await
    }
}
