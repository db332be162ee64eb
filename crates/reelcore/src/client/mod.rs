//! Profile client: the capability contract and its HTTP implementation.

mod instagram;

pub use instagram::{ClientOptions, InstagramClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

use async_trait::async_trait;

use crate::error::ProfileResult;
use crate::types::{Post, Story, UserId};

/// Number of posts requested when the caller does not choose one.
pub const DEFAULT_POST_COUNT: u32 = 10;

/// Read operations against a user profile.
///
/// Implementations hold their credentials and are otherwise stateless per
/// call, so one instance can be shared behind an `Arc` by every chat session.
/// The bot only sees this trait, which lets tests swap in a fake.
#[async_trait]
pub trait ProfileClient: Send + Sync {
    /// Resolve a username to the platform's user id.
    async fn resolve_user_id(&self, username: &str) -> ProfileResult<UserId>;

    /// Active stories of a user, in platform order. Empty when there are none.
    async fn list_stories(&self, user_id: &UserId) -> ProfileResult<Vec<Story>>;

    /// Up to `count` recent posts, in platform order (newest first).
    async fn list_posts(&self, user_id: &UserId, count: u32) -> ProfileResult<Vec<Post>>;

    /// [`list_posts`](Self::list_posts) with [`DEFAULT_POST_COUNT`].
    async fn list_latest_posts(&self, user_id: &UserId) -> ProfileResult<Vec<Post>> {
        self.list_posts(user_id, DEFAULT_POST_COUNT).await
    }
}
