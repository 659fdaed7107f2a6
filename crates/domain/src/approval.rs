use crate::{
    post::{PostStatus, SocialPlatform},
    shared::entity::ID,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of an approval-lifecycle mutation as reported by the content API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalOutcome {
    pub post_id: ID,
    pub title: String,
    pub status: PostStatus,
}

/// Everything needed to render an approval-request card in a chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPreview {
    pub id: ID,
    pub title: String,
    pub brand_name: String,
    pub status: PostStatus,
    pub hook: String,
    pub body: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<SocialPlatform>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
}
