use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostSummaryDto {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) is_private: bool,
    pub(crate) profile_id: Uuid,
    pub(crate) created_at: DateTime<Utc>,
}

/// Payload of the public listing.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub(crate) struct PostsPayload {
    pub(crate) posts: Vec<PostSummaryDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileSummaryDto {
    pub(crate) id: Uuid,
    pub(crate) username: String,
    pub(crate) bio: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDetailDto {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) is_private: bool,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) profile: ProfileSummaryDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub(crate) struct PostIdDto {
    pub(crate) id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub(crate) struct ProfileDetailDto {
    pub(crate) profile: ProfileSummaryDto,
    pub(crate) posts: Vec<PostSummaryDto>,
}
