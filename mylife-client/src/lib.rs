//! Client library for the MyLife posts API.
//!
//! `MyLifeClient` keeps the JWT returned by `register`/`login` and attaches it
//! to the operations that need a caller. Every server answer is an envelope
//! `{message, isSuccess, statusCode, ..}`; unsuccessful ones surface as
//! [`ClientError`] variants.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{ClientError, ClientResult};
pub use models::{
    AuthResponse, PostDetail, PostInput, PostSummary, ProfileDetail, ProfileSummary, User,
};
pub use uuid::Uuid;

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Token-aware client over the REST API.
pub struct MyLifeClient {
    http: HttpClient,
    token: Option<String>,
}

impl MyLifeClient {
    /// Creates a client for a server base URL, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
            token: None,
        })
    }

    /// Sets the JWT manually, e.g. one restored from disk.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Current JWT, if any.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Forgets the stored JWT.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Registers an account (and its profile) and keeps the issued token.
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
        bio: Option<&str>,
    ) -> ClientResult<AuthResponse> {
        let result = self.http.register(username, email, password, bio).await?;
        self.token = Some(result.access_token.clone());
        Ok(result)
    }

    /// Logs in and keeps the issued token.
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<AuthResponse> {
        let result = self.http.login(username, password).await?;
        self.token = Some(result.access_token.clone());
        Ok(result)
    }

    /// All public posts, newest first.
    pub async fn list_posts(&self) -> ClientResult<Vec<PostSummary>> {
        self.http.list_posts().await
    }

    /// One post with its owner profile.
    pub async fn get_post(&self, id: Uuid) -> ClientResult<PostDetail> {
        self.http.get_post(id).await
    }

    /// Creates a post owned by the caller and returns its id. Requires a token.
    pub async fn create_post(&self, input: &PostInput) -> ClientResult<Uuid> {
        let token = self.require_token()?;
        self.http.create_post(token, input).await
    }

    /// Replaces title, description and privacy of a post the caller created.
    /// Requires a token.
    pub async fn update_post(&self, id: Uuid, input: &PostInput) -> ClientResult<Uuid> {
        let token = self.require_token()?;
        self.http.update_post(token, id, input).await
    }

    /// Deletes a post the caller created. Requires a token.
    pub async fn delete_post(&self, id: Uuid) -> ClientResult<()> {
        let token = self.require_token()?;
        self.http.delete_post(token, id).await
    }

    /// A profile with its public posts.
    pub async fn get_profile(&self, id: Uuid) -> ClientResult<ProfileDetail> {
        self.http.get_profile(id).await
    }

    /// The caller's own profile, private posts included. Requires a token.
    pub async fn my_profile(&self) -> ClientResult<ProfileDetail> {
        let token = self.require_token()?;
        self.http.my_profile(token).await
    }

    fn require_token(&self) -> ClientResult<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| ClientError::Unauthorized("no token; register or login first".into()))
    }
}
