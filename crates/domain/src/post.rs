use crate::{
    schedule::Schedule,
    shared::entity::{Entity, ID},
};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a post, as owned by the external content service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    Draft,
    PendingApproval,
    Scheduled,
    Published,
    Failed,
    Paused,
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Draft => "DRAFT",
            Self::PendingApproval => "PENDING_APPROVAL",
            Self::Scheduled => "SCHEDULED",
            Self::Published => "PUBLISHED",
            Self::Failed => "FAILED",
            Self::Paused => "PAUSED",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Instagram,
    Facebook,
    LinkedIn,
    Twitter,
    TikTok,
}

impl std::fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::LinkedIn => "linkedin",
            Self::Twitter => "twitter",
            Self::TikTok => "tiktok",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostContent {
    pub hook: String,
    pub body: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<SocialPlatform>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: ID,
    pub brand_id: ID,
    pub title: String,
    pub content: PostContent,
    pub status: PostStatus,
    /// At most one schedule per post. `None` means unscheduled.
    #[serde(default)]
    pub schedule: Option<Schedule>,
}

impl Post {
    pub fn new(brand_id: ID, title: &str) -> Self {
        Self {
            id: Default::default(),
            brand_id,
            title: title.to_string(),
            content: Default::default(),
            status: PostStatus::Draft,
            schedule: None,
        }
    }
}

impl Entity for Post {
    fn id(&self) -> &ID {
        &self.id
    }
}
