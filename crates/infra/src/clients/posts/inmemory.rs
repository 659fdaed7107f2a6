use super::IPostsApi;
use postpilot_domain::{Post, PostStatus, ID};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub struct InMemoryPostsApi {
    posts: Mutex<Vec<Post>>,
    fail_calls: AtomicBool,
}

impl InMemoryPostsApi {
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            fail_calls: AtomicBool::new(false),
        }
    }

    pub fn insert(&self, post: Post) {
        self.posts.lock().unwrap().push(post);
    }

    pub fn set_fail_calls(&self, fail: bool) {
        self.fail_calls.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> anyhow::Result<()> {
        if self.fail_calls.load(Ordering::SeqCst) {
            return Err(anyhow::Error::msg("Posts API unavailable"));
        }
        Ok(())
    }
}

impl Default for InMemoryPostsApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IPostsApi for InMemoryPostsApi {
    async fn list(&self) -> anyhow::Result<Vec<Post>> {
        self.check_available()?;
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn find(&self, post_id: &ID) -> anyhow::Result<Option<Post>> {
        self.check_available()?;
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == *post_id)
            .cloned())
    }

    async fn patch_status(&self, post_id: &ID, status: PostStatus) -> anyhow::Result<Post> {
        self.check_available()?;
        let mut posts = self.posts.lock().unwrap();
        match posts.iter_mut().find(|p| p.id == *post_id) {
            Some(post) => {
                post.status = status;
                Ok(post.clone())
            }
            None => Err(anyhow::Error::msg(format!("Post not found: {}", post_id))),
        }
    }
}
