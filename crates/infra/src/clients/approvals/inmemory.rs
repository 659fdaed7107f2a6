use super::IApprovalApi;
use postpilot_domain::{ApprovalOutcome, PostPreview, PostStatus, ID};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Calls observed by the fake, for assertions on dispatcher behavior.
#[derive(Debug, Clone, PartialEq)]
pub enum ApprovalRequest {
    Approve { post_id: ID },
    RequestChange { post_id: ID, feedback: String },
    Pause { post_id: ID },
    Reject { post_id: ID, feedback: Option<String> },
}

pub struct InMemoryApprovalApi {
    previews: Mutex<Vec<PostPreview>>,
    requests: Mutex<Vec<ApprovalRequest>>,
    fail_calls: AtomicBool,
}

impl InMemoryApprovalApi {
    pub fn new() -> Self {
        Self {
            previews: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            fail_calls: AtomicBool::new(false),
        }
    }

    pub fn insert_preview(&self, preview: PostPreview) {
        self.previews.lock().unwrap().push(preview);
    }

    pub fn requests(&self) -> Vec<ApprovalRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn set_fail_calls(&self, fail: bool) {
        self.fail_calls.store(fail, Ordering::SeqCst);
    }

    fn outcome(&self, post_id: &ID, status: PostStatus) -> anyhow::Result<ApprovalOutcome> {
        if self.fail_calls.load(Ordering::SeqCst) {
            return Err(anyhow::Error::msg("Approval API unavailable"));
        }
        let mut previews = self.previews.lock().unwrap();
        match previews.iter_mut().find(|p| p.id == *post_id) {
            Some(preview) => {
                preview.status = status;
                Ok(ApprovalOutcome {
                    post_id: post_id.clone(),
                    title: preview.title.clone(),
                    status,
                })
            }
            None => Err(anyhow::Error::msg(format!("Post not found: {}", post_id))),
        }
    }
}

impl Default for InMemoryApprovalApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IApprovalApi for InMemoryApprovalApi {
    async fn approve(&self, post_id: &ID) -> anyhow::Result<ApprovalOutcome> {
        self.requests.lock().unwrap().push(ApprovalRequest::Approve {
            post_id: post_id.clone(),
        });
        self.outcome(post_id, PostStatus::Scheduled)
    }

    async fn request_change(&self, post_id: &ID, feedback: &str) -> anyhow::Result<ApprovalOutcome> {
        self.requests
            .lock()
            .unwrap()
            .push(ApprovalRequest::RequestChange {
                post_id: post_id.clone(),
                feedback: feedback.to_string(),
            });
        self.outcome(post_id, PostStatus::Draft)
    }

    async fn pause(&self, post_id: &ID) -> anyhow::Result<ApprovalOutcome> {
        self.requests.lock().unwrap().push(ApprovalRequest::Pause {
            post_id: post_id.clone(),
        });
        self.outcome(post_id, PostStatus::Paused)
    }

    async fn reject(&self, post_id: &ID, feedback: Option<&str>) -> anyhow::Result<ApprovalOutcome> {
        self.requests.lock().unwrap().push(ApprovalRequest::Reject {
            post_id: post_id.clone(),
            feedback: feedback.map(|f| f.to_string()),
        });
        self.outcome(post_id, PostStatus::Draft)
    }

    async fn get_post_preview(&self, post_id: &ID) -> anyhow::Result<PostPreview> {
        if self.fail_calls.load(Ordering::SeqCst) {
            return Err(anyhow::Error::msg("Approval API unavailable"));
        }
        self.previews
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == *post_id)
            .cloned()
            .ok_or_else(|| anyhow::Error::msg(format!("Post preview not found: {}", post_id)))
    }
}
