//! In-memory repositories for service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::data::profile_repository::ProfileRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDetails};
use crate::domain::profile::Profile;

#[derive(Clone)]
pub(crate) struct FakeProfileRepo {
    profiles: Arc<Mutex<Vec<Profile>>>,
}

impl FakeProfileRepo {
    pub(crate) fn with(profiles: &[Profile]) -> Self {
        Self {
            profiles: Arc::new(Mutex::new(profiles.to_vec())),
        }
    }

    fn find(&self, pred: impl Fn(&Profile) -> bool) -> Option<Profile> {
        self.profiles
            .lock()
            .expect("profiles mutex poisoned")
            .iter()
            .find(|profile| pred(profile))
            .cloned()
    }
}

#[async_trait]
impl ProfileRepository for FakeProfileRepo {
    async fn profile_exists(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.find(|profile| profile.id == id).is_some())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Profile>, DomainError> {
        Ok(self.find(|profile| profile.id == id))
    }

    async fn get_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, DomainError> {
        Ok(self.find(|profile| profile.user_id == user_id))
    }
}

#[derive(Clone)]
pub(crate) struct FakePostRepo {
    posts: Arc<Mutex<Vec<Post>>>,
    owners: FakeProfileRepo,
    created_input: Arc<Mutex<Option<NewPost>>>,
    saved: Arc<Mutex<Vec<Post>>>,
    deleted: Arc<Mutex<Vec<Uuid>>>,
    broken: Arc<Mutex<bool>>,
}

impl FakePostRepo {
    pub(crate) fn new(owners: FakeProfileRepo) -> Self {
        Self {
            posts: Arc::new(Mutex::new(Vec::new())),
            owners,
            created_input: Arc::new(Mutex::new(None)),
            saved: Arc::new(Mutex::new(Vec::new())),
            deleted: Arc::new(Mutex::new(Vec::new())),
            broken: Arc::new(Mutex::new(false)),
        }
    }

    pub(crate) fn insert(&self, post: Post) {
        self.posts.lock().expect("posts mutex poisoned").push(post);
    }

    pub(crate) fn find(&self, id: Uuid) -> Option<Post> {
        self.posts
            .lock()
            .expect("posts mutex poisoned")
            .iter()
            .find(|post| post.id == id)
            .cloned()
    }

    /// Every following call fails like a dropped database connection.
    pub(crate) fn break_connection(&self) {
        *self.broken.lock().expect("broken mutex poisoned") = true;
    }

    pub(crate) fn created_input(&self) -> Option<NewPost> {
        self.created_input
            .lock()
            .expect("created_input mutex poisoned")
            .clone()
    }

    pub(crate) fn saved(&self) -> Vec<Post> {
        self.saved.lock().expect("saved mutex poisoned").clone()
    }

    pub(crate) fn deleted(&self) -> Vec<Uuid> {
        self.deleted.lock().expect("deleted mutex poisoned").clone()
    }

    fn check_broken(&self) -> Result<(), DomainError> {
        if *self.broken.lock().expect("broken mutex poisoned") {
            return Err(DomainError::Unexpected("connection reset".to_string()));
        }
        Ok(())
    }

    fn filtered(&self, pred: impl Fn(&Post) -> bool) -> Vec<Post> {
        self.posts
            .lock()
            .expect("posts mutex poisoned")
            .iter()
            .filter(|post| pred(post))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PostRepository for FakePostRepo {
    async fn get_public_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.check_broken()?;
        Ok(self.filtered(|post| !post.is_private))
    }

    async fn post_exists(&self, id: Uuid) -> Result<bool, DomainError> {
        self.check_broken()?;
        Ok(self.find(id).is_some())
    }

    async fn get_post_details(&self, id: Uuid) -> Result<Option<PostDetails>, DomainError> {
        self.check_broken()?;
        let Some(post) = self.find(id) else {
            return Ok(None);
        };
        let owner = self
            .owners
            .get_by_id(post.profile_id)
            .await?
            .ok_or_else(|| DomainError::Unexpected("dangling owner".to_string()))?;
        Ok(Some(PostDetails { post, owner }))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        self.check_broken()?;
        Ok(self.find(id))
    }

    async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        self.check_broken()?;
        *self
            .created_input
            .lock()
            .expect("created_input mutex poisoned") = Some(input.clone());

        let now = Utc::now();
        let post = Post::new(
            Uuid::new_v4(),
            input.title,
            input.description,
            input.is_private,
            input.profile_id,
            now,
            now,
        )?;
        self.insert(post.clone());
        Ok(post)
    }

    async fn save(&self, post: &Post) -> Result<Post, DomainError> {
        self.check_broken()?;
        self.saved
            .lock()
            .expect("saved mutex poisoned")
            .push(post.clone());

        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        let stored = posts
            .iter_mut()
            .find(|stored| stored.id == post.id)
            .ok_or_else(|| DomainError::NotFound(format!("post id: {}", post.id)))?;
        *stored = post.clone();
        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.check_broken()?;
        self.deleted.lock().expect("deleted mutex poisoned").push(id);

        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        let before = posts.len();
        posts.retain(|post| post.id != id);
        Ok(posts.len() != before)
    }

    async fn get_posts_by_profile(
        &self,
        profile_id: Uuid,
        include_private: bool,
    ) -> Result<Vec<Post>, DomainError> {
        self.check_broken()?;
        Ok(self.filtered(|post| {
            post.profile_id == profile_id && (include_private || !post.is_private)
        }))
    }
}
