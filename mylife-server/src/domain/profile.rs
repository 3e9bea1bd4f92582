use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::DomainError;
use super::post::validate_id;

/// Application-level identity wrapping a user account; owns posts.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Profile {
    pub(crate) id: Uuid,
    pub(crate) user_id: Uuid,
    pub(crate) username: String,
    pub(crate) bio: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl Profile {
    pub(crate) fn new(
        id: Uuid,
        user_id: Uuid,
        username: impl Into<String>,
        bio: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_id("id", id)?;
        validate_id("user_id", user_id)?;

        let username = username.into().trim().to_string();
        if username.is_empty() {
            return Err(DomainError::Validation {
                field: "username",
                message: "must not be empty",
            });
        }

        let bio = bio
            .map(|bio| bio.trim().to_string())
            .filter(|bio| !bio.is_empty());

        Ok(Self {
            id,
            user_id,
            username,
            bio,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::Profile;

    #[test]
    fn profile_new_rejects_nil_user_id() {
        let result = Profile::new(Uuid::new_v4(), Uuid::nil(), "someone", None, Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn blank_bio_is_dropped() {
        let profile = Profile::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            " someone ",
            Some("   ".to_string()),
            Utc::now(),
        )
        .expect("profile must be valid");

        assert_eq!(profile.username, "someone");
        assert!(profile.bio.is_none());
    }
}
