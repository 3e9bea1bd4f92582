use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;
use super::profile::Profile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) is_private: bool,
    pub(crate) profile_id: Uuid,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// A post loaded together with the profile that owns it.
#[derive(Debug, Clone)]
pub(crate) struct PostDetails {
    pub(crate) post: Post,
    pub(crate) owner: Profile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) is_private: bool,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            description: normalize_description(&self.description)?,
            is_private: self.is_private,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) is_private: bool,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            description: normalize_description(&self.description)?,
            is_private: self.is_private,
        })
    }
}

impl Post {
    pub(crate) fn new(
        id: Uuid,
        title: impl Into<String>,
        description: impl Into<String>,
        is_private: bool,
        profile_id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_id("id", id)?;
        validate_id("profile_id", profile_id)?;
        let title = normalize_title(&title.into())?;
        let description = normalize_description(&description.into())?;

        if updated_at < created_at {
            return Err(DomainError::Validation {
                field: "updated_at",
                message: "must be >= created_at",
            });
        }

        Ok(Self {
            id,
            title,
            description,
            is_private,
            profile_id,
            created_at,
            updated_at,
        })
    }

    pub(crate) fn is_owned_by(&self, profile: &Profile) -> bool {
        self.profile_id == profile.id
    }

    /// Copies the editable fields of an already validated request onto the post.
    pub(crate) fn apply_update(&mut self, req: UpdatePostRequest) {
        self.title = req.title;
        self.description = req.description;
        self.is_private = req.is_private;
    }
}

pub(crate) fn validate_id(field: &'static str, value: Uuid) -> Result<(), DomainError> {
    if value.is_nil() {
        return Err(DomainError::Validation {
            field,
            message: "must not be nil",
        });
    }
    Ok(())
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 255 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_description(description: &str) -> Result<String, DomainError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(DomainError::Validation {
            field: "description",
            message: "must not be empty",
        });
    }
    Ok(description.to_string())
}
