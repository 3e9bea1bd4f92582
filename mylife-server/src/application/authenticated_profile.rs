use uuid::Uuid;

use crate::data::profile_repository::ProfileRepository;
use crate::domain::error::DomainError;
use crate::domain::profile::Profile;

/// Resolves the profile behind an authenticated caller.
pub(crate) struct AuthenticatedProfileService<R: ProfileRepository> {
    repo: R,
}

impl<R: ProfileRepository> AuthenticatedProfileService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn get_authenticated_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Profile, DomainError> {
        self.repo
            .get_by_user_id(user_id)
            .await?
            .ok_or(DomainError::Unauthenticated)
    }
}
