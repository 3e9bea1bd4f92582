use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::data::profile_repository::ProfileRepository;
use crate::domain::error::DomainError;
use crate::domain::profile::Profile;

#[derive(Debug, Clone)]
pub(crate) struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    username: String,
    bio: Option<String>,
    created_at: DateTime<Utc>,
}

const PROFILE_SELECT: &str = r#"
    SELECT pr.id, pr.user_id, u.username, pr.bio, pr.created_at
    FROM profiles pr
    JOIN users u ON u.id = pr.user_id
"#;

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn profile_exists(&self, id: Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM profiles WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!("{PROFILE_SELECT} WHERE pr.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        row.map(map_row_to_profile).transpose()
    }

    async fn get_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, DomainError> {
        let row =
            sqlx::query_as::<_, ProfileRow>(&format!("{PROFILE_SELECT} WHERE pr.user_id = $1"))
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        row.map(map_row_to_profile).transpose()
    }
}

fn map_row_to_profile(row: ProfileRow) -> Result<Profile, DomainError> {
    Profile::new(row.id, row.user_id, row.username, row.bio, row.created_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}
