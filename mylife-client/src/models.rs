use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Registered account.
pub struct User {
    /// User id.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Lowercased email.
    pub email: String,
    /// Registration time (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Returned by register and login.
pub struct AuthResponse {
    /// JWT access token.
    pub access_token: String,
    /// The authenticated user.
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Post as it appears in listings.
pub struct PostSummary {
    /// Post id.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Hidden from public listings when set.
    pub is_private: bool,
    /// Owning profile.
    pub profile_id: Uuid,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Public part of a profile.
pub struct ProfileSummary {
    /// Profile id.
    pub id: Uuid,
    /// Owner's username.
    pub username: String,
    /// Optional bio.
    pub bio: Option<String>,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A single post with its owner.
pub struct PostDetail {
    /// Post id.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Privacy flag.
    pub is_private: bool,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Last update time (UTC).
    pub updated_at: DateTime<Utc>,
    /// Owning profile.
    pub profile: ProfileSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A profile with its posts.
pub struct ProfileDetail {
    /// The profile.
    pub profile: ProfileSummary,
    /// Its posts; private ones only when viewing your own profile.
    pub posts: Vec<PostSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
/// Fields sent when creating or updating a post.
pub struct PostInput {
    /// Title, 1..=255 chars.
    pub title: String,
    /// Body text, non-empty.
    pub description: String,
    /// Hide from public listings.
    pub is_private: bool,
}
