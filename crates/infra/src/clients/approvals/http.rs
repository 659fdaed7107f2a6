use super::IApprovalApi;
use crate::clients::shared::RestClient;
use postpilot_domain::{ApprovalOutcome, PostPreview, ID};
use serde::Serialize;

pub struct HttpApprovalApi {
    api: RestClient,
}

impl HttpApprovalApi {
    pub fn new(api: RestClient) -> Self {
        Self { api }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApprovalActionRequest {
    post_id: ID,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestChangeRequest {
    post_id: ID,
    feedback: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RejectRequest {
    feedback: Option<String>,
}

#[async_trait::async_trait]
impl IApprovalApi for HttpApprovalApi {
    async fn approve(&self, post_id: &ID) -> anyhow::Result<ApprovalOutcome> {
        let body = ApprovalActionRequest {
            post_id: post_id.clone(),
        };
        self.api.post(&body, "approvals/approve").await
    }

    async fn request_change(&self, post_id: &ID, feedback: &str) -> anyhow::Result<ApprovalOutcome> {
        let body = RequestChangeRequest {
            post_id: post_id.clone(),
            feedback: feedback.to_string(),
        };
        self.api.post(&body, "approvals/request-change").await
    }

    async fn pause(&self, post_id: &ID) -> anyhow::Result<ApprovalOutcome> {
        let body = ApprovalActionRequest {
            post_id: post_id.clone(),
        };
        self.api.post(&body, "approvals/pause").await
    }

    async fn reject(&self, post_id: &ID, feedback: Option<&str>) -> anyhow::Result<ApprovalOutcome> {
        let body = RejectRequest {
            feedback: feedback.map(|f| f.to_string()),
        };
        self.api
            .post(&body, &format!("approvals/reject/{}", post_id))
            .await
    }

    async fn get_post_preview(&self, post_id: &ID) -> anyhow::Result<PostPreview> {
        self.api
            .get(&format!("posts/{}/preview", post_id))
            .await?
            .ok_or_else(|| anyhow::Error::msg(format!("Post preview not found: {}", post_id)))
    }
}
