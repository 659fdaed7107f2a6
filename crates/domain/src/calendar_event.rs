use crate::{
    post::{Post, PostContent, PostStatus, SocialPlatform},
    schedule::Schedule,
    shared::entity::{Entity, ID},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Amber,
    Blue,
    Green,
    Red,
    Gray,
}

impl EventColor {
    pub fn from_status(status: PostStatus) -> Self {
        match status {
            PostStatus::Draft => Self::Amber,
            PostStatus::Scheduled => Self::Blue,
            PostStatus::Published => Self::Green,
            PostStatus::Failed => Self::Red,
            _ => Self::Gray,
        }
    }

    pub fn as_hex(&self) -> &'static str {
        match self {
            Self::Amber => "#f59e0b",
            Self::Blue => "#3b82f6",
            Self::Green => "#10b981",
            Self::Red => "#ef4444",
            Self::Gray => "#6b7280",
        }
    }
}

/// A scheduled post projected onto the calendar. Recomputed on every load,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: ID,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub color: EventColor,
    pub post_id: ID,
    pub brand_id: ID,
    pub status: PostStatus,
    pub platforms: Vec<SocialPlatform>,
    pub summary: String,
}

impl CalendarEvent {
    /// One event per post, so the event id is the post id.
    pub fn from_post(post: &Post, schedule: &Schedule) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            start: schedule.run_at,
            // Posts have no duration concept, the end defaults to the start.
            end: schedule.run_at,
            color: EventColor::from_status(post.status),
            post_id: post.id.clone(),
            brand_id: post.brand_id.clone(),
            status: post.status,
            platforms: post.content.platforms.clone(),
            summary: summarize(&post.content),
        }
    }
}

impl Entity for CalendarEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}

const SUMMARY_MAX_LEN: usize = 80;

fn summarize(content: &PostContent) -> String {
    if !content.hook.is_empty() {
        return content.hook.clone();
    }
    if content.body.chars().count() <= SUMMARY_MAX_LEN {
        content.body.clone()
    } else {
        let truncated: String = content.body.chars().take(SUMMARY_MAX_LEN).collect();
        format!("{}...", truncated.trim_end())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn it_derives_color_from_status() {
        assert_eq!(EventColor::from_status(PostStatus::Draft), EventColor::Amber);
        assert_eq!(
            EventColor::from_status(PostStatus::Scheduled),
            EventColor::Blue
        );
        assert_eq!(
            EventColor::from_status(PostStatus::Published),
            EventColor::Green
        );
        assert_eq!(EventColor::from_status(PostStatus::Failed), EventColor::Red);
        assert_eq!(
            EventColor::from_status(PostStatus::PendingApproval),
            EventColor::Gray
        );
        assert_eq!(EventColor::from_status(PostStatus::Paused), EventColor::Gray);
    }

    #[test]
    fn it_projects_a_scheduled_post() {
        let mut post = Post::new(Default::default(), "Summer launch");
        post.status = PostStatus::Scheduled;
        post.content.hook = "Big news this week".into();
        post.content.platforms = vec![SocialPlatform::Instagram, SocialPlatform::LinkedIn];

        let run_at = Utc.ymd(2024, 6, 15).and_hms(9, 0, 0);
        let schedule = Schedule::new(post.id.clone(), run_at, chrono_tz::UTC);

        let event = CalendarEvent::from_post(&post, &schedule);
        assert_eq!(event.id, post.id);
        assert_eq!(event.post_id, post.id);
        assert_eq!(event.start, run_at);
        assert_eq!(event.end, run_at);
        assert_eq!(event.color, EventColor::Blue);
        assert_eq!(event.summary, "Big news this week");
    }

    #[test]
    fn it_truncates_long_summaries() {
        let mut post = Post::new(Default::default(), "Long body");
        post.content.body = "a".repeat(200);

        let schedule = Schedule::new(
            post.id.clone(),
            Utc.ymd(2024, 6, 15).and_hms(9, 0, 0),
            chrono_tz::UTC,
        );
        let event = CalendarEvent::from_post(&post, &schedule);
        assert_eq!(event.summary.chars().count(), SUMMARY_MAX_LEN + 3);
        assert!(event.summary.ends_with("..."));
    }
}
