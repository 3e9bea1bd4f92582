use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDetails};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) is_private: bool,
    pub(crate) profile_id: Uuid,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    /// Non-private posts, newest first.
    async fn get_public_posts(&self) -> Result<Vec<Post>, DomainError>;
    async fn post_exists(&self, id: Uuid) -> Result<bool, DomainError>;
    /// Post with its owning profile populated.
    async fn get_post_details(&self, id: Uuid) -> Result<Option<PostDetails>, DomainError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError>;
    async fn create(&self, input: NewPost) -> Result<Post, DomainError>;
    /// Persists the editable fields of `post` and returns the stored row.
    async fn save(&self, post: &Post) -> Result<Post, DomainError>;
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
    async fn get_posts_by_profile(
        &self,
        profile_id: Uuid,
        include_private: bool,
    ) -> Result<Vec<Post>, DomainError>;
}
