use postpilot_domain::{Command, PostPreview, ID};
use postpilot_infra::{Context, RateLimiter};
use std::time::Duration;
use thiserror::Error;
use tracing::error;

/// Fixed extra pause after every bulk send, on top of the rate limiter's own
/// pacing. Bulk blasts are deliberately double-paced.
const BULK_SEND_DELAY: Duration = Duration::from_secs(2);

const HELP_TEXT: &str = "Commands:\n  approve:<postId>\n  change:<postId>:<feedback>\n  pause:<postId>\n  reject:<postId>";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to fetch the preview for post: {0}")]
    Preview(ID),
    #[error("Failed to deliver the message to recipient: {0}")]
    Delivery(String),
}

/// Reacts to inbound approval commands and pushes notifications out through
/// the messaging transport. Every outbound message is paced per recipient by
/// the rate limiter. Command handling converts every failure into a chat
/// reply; an error escaping into the transport's message loop would stall it.
pub struct NotificationDispatcher {
    rate_limiter: RateLimiter,
}

enum ApprovalAction {
    Approve,
    RequestChange(String),
    Pause,
    Reject,
}

impl NotificationDispatcher {
    pub fn new(rate_limiter: RateLimiter) -> Self {
        Self { rate_limiter }
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Entry point for inbound chat messages. Always answers `sender` with a
    /// reply, whatever happened underneath.
    pub async fn handle_message(&self, ctx: &Context, sender: &str, text: &str) {
        let reply = self.handle_command(ctx, Command::parse(text)).await;
        if let Err(e) = self.paced_send(ctx, sender, &reply).await {
            error!("Failed to deliver reply to recipient: {}: {:?}", sender, e);
        }
    }

    async fn handle_command(&self, ctx: &Context, command: Command) -> String {
        match command {
            Command::Approve { post_id } => {
                self.approval_action(ctx, &post_id, ApprovalAction::Approve)
                    .await
            }
            Command::RequestChange { post_id, feedback } => match feedback {
                Some(feedback) => {
                    self.approval_action(ctx, &post_id, ApprovalAction::RequestChange(feedback))
                        .await
                }
                None => format!(
                    "Please include feedback, e.g. change:{}:move the CTA up",
                    post_id
                ),
            },
            Command::Pause { post_id } => {
                self.approval_action(ctx, &post_id, ApprovalAction::Pause)
                    .await
            }
            Command::Reject { post_id } => {
                self.approval_action(ctx, &post_id, ApprovalAction::Reject)
                    .await
            }
            Command::Unknown { .. } => HELP_TEXT.to_string(),
        }
    }

    async fn approval_action(
        &self,
        ctx: &Context,
        raw_post_id: &str,
        action: ApprovalAction,
    ) -> String {
        let post_id = match raw_post_id.parse::<ID>() {
            Ok(id) => id,
            Err(_) => return format!("Unknown post id: {}", raw_post_id),
        };

        let (verb, result) = match &action {
            ApprovalAction::Approve => ("approve", ctx.apis.approvals.approve(&post_id).await),
            ApprovalAction::RequestChange(feedback) => (
                "request changes for",
                ctx.apis.approvals.request_change(&post_id, feedback).await,
            ),
            ApprovalAction::Pause => ("pause", ctx.apis.approvals.pause(&post_id).await),
            ApprovalAction::Reject => ("reject", ctx.apis.approvals.reject(&post_id, None).await),
        };

        match result {
            Ok(outcome) => match action {
                ApprovalAction::Approve => {
                    format!("✅ Approved: *{}*\nStatus: {}", outcome.title, outcome.status)
                }
                ApprovalAction::RequestChange(_) => format!(
                    "📝 Change requested for: *{}*\nStatus: {}",
                    outcome.title, outcome.status
                ),
                ApprovalAction::Pause => {
                    format!("⏸ Paused: *{}*\nStatus: {}", outcome.title, outcome.status)
                }
                ApprovalAction::Reject => {
                    format!("🚫 Rejected: *{}*\nStatus: {}", outcome.title, outcome.status)
                }
            },
            Err(e) => {
                error!("Failed to {} post: {}: {:?}", verb, post_id, e);
                format!(
                    "❌ Could not {} post {}. Please try again later.",
                    verb, raw_post_id
                )
            }
        }
    }

    /// Rate limit, then deliver. The limiter gates the message, never the API
    /// call that produced it.
    async fn paced_send(&self, ctx: &Context, recipient: &str, text: &str) -> anyhow::Result<()> {
        self.rate_limiter.wait_for_rate_limit(recipient).await;
        ctx.apis.transport.send(recipient, text).await
    }

    /// Sends the full approval card for one post. Unlike the reply paths this
    /// propagates failures; batch and administrative callers need to know.
    pub async fn send_approval_request(
        &self,
        ctx: &Context,
        post_id: &ID,
        recipient: &str,
    ) -> Result<(), NotifyError> {
        let preview = ctx
            .apis
            .approvals
            .get_post_preview(post_id)
            .await
            .map_err(|_| NotifyError::Preview(post_id.clone()))?;

        let card = format_approval_card(&preview);
        self.paced_send(ctx, recipient, &card)
            .await
            .map_err(|_| NotifyError::Delivery(recipient.to_string()))
    }

    /// Full cross-product of posts x recipients, sent sequentially. Per-send
    /// failures are logged and skipped, the batch always runs to the end.
    pub async fn send_bulk_approval_requests(
        &self,
        ctx: &Context,
        post_ids: &[ID],
        recipients: &[String],
    ) {
        for post_id in post_ids {
            for recipient in recipients {
                if let Err(e) = self.send_approval_request(ctx, post_id, recipient).await {
                    error!(
                        "Skipping failed approval request for post: {} to recipient: {}: {:?}",
                        post_id, recipient, e
                    );
                }
                tokio::time::sleep(BULK_SEND_DELAY).await;
            }
        }
    }

    /// Ingress-triggered alert: fans the message out to every configured
    /// approver, sequentially and rate limited per recipient.
    pub async fn notify_approval(
        &self,
        ctx: &Context,
        post_id: &str,
        title: &str,
        message: &str,
    ) -> Result<(), NotifyError> {
        let text = format_approval_alert(post_id, title, message);
        for recipient in &ctx.config.approval_recipients {
            self.paced_send(ctx, recipient, &text)
                .await
                .map_err(|_| NotifyError::Delivery(recipient.clone()))?;
        }
        Ok(())
    }
}

fn format_approval_alert(post_id: &str, title: &str, message: &str) -> String {
    format!(
        "🔔 *{}*\n\n{}\n\nReply with:\n  approve:{}\n  change:{}:<feedback>\n  reject:{}",
        title, message, post_id, post_id, post_id
    )
}

fn format_approval_card(preview: &PostPreview) -> String {
    let mut lines = vec![
        "📋 *Approval Request*".to_string(),
        String::new(),
        format!("*{}*", preview.title),
        format!("Brand: {}", preview.brand_name),
        format!("Status: {}", preview.status),
    ];
    if let Some(scheduled_at) = &preview.scheduled_at {
        lines.push(format!(
            "Scheduled: {}",
            scheduled_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    if !preview.platforms.is_empty() {
        lines.push(format!(
            "Platforms: {}",
            preview
                .platforms
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    if !preview.hashtags.is_empty() {
        lines.push(format!("Hashtags: {}", preview.hashtags.join(" ")));
    }
    if !preview.hook.is_empty() {
        lines.push(String::new());
        lines.push(preview.hook.clone());
    }
    if !preview.body.is_empty() {
        lines.push(String::new());
        lines.push(preview.body.clone());
    }
    lines.push(String::new());
    lines.push(format!(
        "Reply with:\n  approve:{}\n  change:{}:<feedback>\n  reject:{}",
        preview.id, preview.id, preview.id
    ));
    lines.join("\n")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::setup_test_context;
    use chrono::TimeZone;
    use chrono::Utc;
    use postpilot_domain::{PostStatus, SocialPlatform};
    use postpilot_infra::ApprovalRequest;

    fn preview(title: &str) -> PostPreview {
        PostPreview {
            id: Default::default(),
            title: title.to_string(),
            brand_name: "Acme".into(),
            status: PostStatus::PendingApproval,
            hook: "The hook".into(),
            body: "The body".into(),
            hashtags: vec!["#launch".into()],
            platforms: vec![SocialPlatform::Instagram, SocialPlatform::LinkedIn],
            scheduled_at: Some(Utc.ymd(2024, 6, 15).and_hms(9, 0, 0)),
        }
    }

    fn dispatcher() -> NotificationDispatcher {
        NotificationDispatcher::new(RateLimiter::new(12_000, 3_000))
    }

    #[tokio::test(start_paused = true)]
    async fn approve_commands_call_the_api_and_reply() {
        let (ctx, apis) = setup_test_context();
        let preview = preview("Summer launch");
        let post_id = preview.id.clone();
        apis.approvals.insert_preview(preview);

        dispatcher()
            .handle_message(&ctx, "approver-1", &format!("approve:{}", post_id))
            .await;

        assert_eq!(
            apis.approvals.requests(),
            vec![ApprovalRequest::Approve {
                post_id: post_id.clone()
            }]
        );

        let sent = apis.transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "approver-1");
        assert!(sent[0].1.contains("Approved"));
        assert!(sent[0].1.contains("Summer launch"));
        assert!(sent[0].1.contains("SCHEDULED"));
    }

    #[tokio::test(start_paused = true)]
    async fn change_without_feedback_asks_for_feedback_and_skips_the_api() {
        let (ctx, apis) = setup_test_context();

        dispatcher()
            .handle_message(&ctx, "approver-1", "change:post123")
            .await;

        assert!(apis.approvals.requests().is_empty());

        let sent = apis.transport.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.contains("feedback"));
    }

    #[tokio::test(start_paused = true)]
    async fn change_with_feedback_reaches_the_api() {
        let (ctx, apis) = setup_test_context();
        let preview = preview("Headline post");
        let post_id = preview.id.clone();
        apis.approvals.insert_preview(preview);

        dispatcher()
            .handle_message(
                &ctx,
                "approver-1",
                &format!("change:{}:please fix the headline", post_id),
            )
            .await;

        assert_eq!(
            apis.approvals.requests(),
            vec![ApprovalRequest::RequestChange {
                post_id,
                feedback: "please fix the headline".into()
            }]
        );
        assert_eq!(apis.transport.sent().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn api_failures_still_produce_a_paced_reply() {
        let (ctx, apis) = setup_test_context();
        let preview = preview("Unreachable");
        let post_id = preview.id.clone();
        apis.approvals.insert_preview(preview);
        apis.approvals.set_fail_calls(true);

        dispatcher()
            .handle_message(&ctx, "approver-1", &format!("approve:{}", post_id))
            .await;

        // The command reached the API and failed there
        assert_eq!(apis.approvals.requests().len(), 1);

        let sent = apis.transport.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.contains("Could not approve"));
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_messages_get_the_command_hints() {
        let (ctx, apis) = setup_test_context();

        dispatcher()
            .handle_message(&ctx, "approver-1", "hello there")
            .await;

        assert!(apis.approvals.requests().is_empty());
        let sent = apis.transport.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.contains("approve:<postId>"));
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_post_ids_never_reach_the_api() {
        let (ctx, apis) = setup_test_context();

        dispatcher()
            .handle_message(&ctx, "approver-1", "approve:not-a-real-id")
            .await;

        assert!(apis.approvals.requests().is_empty());
        let sent = apis.transport.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.contains("Unknown post id"));
    }

    #[tokio::test(start_paused = true)]
    async fn approval_cards_carry_the_reply_commands() {
        let (ctx, apis) = setup_test_context();
        let preview = preview("Card post");
        let post_id = preview.id.clone();
        apis.approvals.insert_preview(preview);

        dispatcher()
            .send_approval_request(&ctx, &post_id, "approver-1")
            .await
            .expect("To send the card");

        let sent = apis.transport.sent();
        assert_eq!(sent.len(), 1);
        let card = &sent[0].1;
        assert!(card.contains("Card post"));
        assert!(card.contains("Brand: Acme"));
        assert!(card.contains("instagram, linkedin"));
        assert!(card.contains("#launch"));
        assert!(card.contains(&format!("approve:{}", post_id)));
    }

    #[tokio::test(start_paused = true)]
    async fn a_missing_preview_propagates_to_the_caller() {
        let (ctx, _apis) = setup_test_context();

        let res = dispatcher()
            .send_approval_request(&ctx, &Default::default(), "approver-1")
            .await;
        assert!(matches!(res, Err(NotifyError::Preview(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn bulk_requests_cover_the_cross_product_and_skip_failures() {
        let (ctx, apis) = setup_test_context();
        let first = preview("First");
        let second = preview("Second");
        let first_id = first.id.clone();
        let second_id = second.id.clone();
        apis.approvals.insert_preview(first);
        apis.approvals.insert_preview(second);

        // A post without a preview fails mid-batch and is skipped
        let missing_id = Default::default();
        let recipients = vec!["approver-1".to_string(), "approver-2".to_string()];

        dispatcher()
            .send_bulk_approval_requests(
                &ctx,
                &[first_id, missing_id, second_id],
                &recipients,
            )
            .await;

        let sent = apis.transport.sent();
        assert_eq!(sent.len(), 4);
        assert!(sent[0].1.contains("First"));
        assert!(sent[3].1.contains("Second"));
    }

    #[tokio::test(start_paused = true)]
    async fn notify_approval_alerts_every_configured_recipient() {
        let (mut ctx, apis) = setup_test_context();
        ctx.config.approval_recipients = vec!["approver-1".into(), "approver-2".into()];

        dispatcher()
            .notify_approval(&ctx, "post123", "New post", "A post is waiting for review")
            .await
            .expect("To notify approvers");

        let sent = apis.transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, "approver-1");
        assert_eq!(sent[1].0, "approver-2");
        assert!(sent[0].1.contains("New post"));
        assert!(sent[0].1.contains("approve:post123"));
    }

    #[tokio::test(start_paused = true)]
    async fn replies_share_one_pacing_key_per_sender() {
        let (ctx, apis) = setup_test_context();

        let dispatcher = dispatcher();
        let started = tokio::time::Instant::now();
        dispatcher.handle_message(&ctx, "approver-1", "hi").await;
        dispatcher.handle_message(&ctx, "approver-1", "hi again").await;
        let elapsed = tokio::time::Instant::now() - started;

        assert_eq!(apis.transport.sent().len(), 2);
        // The second reply waited out the limiter
        assert!(elapsed >= Duration::from_millis(9_000));
    }
}
