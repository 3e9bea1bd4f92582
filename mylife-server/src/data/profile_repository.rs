use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::profile::Profile;

#[async_trait]
pub(crate) trait ProfileRepository: Send + Sync {
    async fn profile_exists(&self, id: Uuid) -> Result<bool, DomainError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Profile>, DomainError>;
    async fn get_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, DomainError>;
}
