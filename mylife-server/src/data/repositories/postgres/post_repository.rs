use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDetails};
use crate::domain::profile::Profile;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    description: String,
    is_private: bool,
    profile_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct PostDetailsRow {
    id: Uuid,
    title: String,
    description: String,
    is_private: bool,
    profile_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_user_id: Uuid,
    owner_username: String,
    owner_bio: Option<String>,
    owner_created_at: DateTime<Utc>,
}

const POST_COLUMNS: &str =
    "id, title, description, is_private, profile_id, created_at, updated_at";

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn get_public_posts(&self) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE is_private = FALSE
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn post_exists(&self, id: Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_post_db_error)
    }

    async fn get_post_details(&self, id: Uuid) -> Result<Option<PostDetails>, DomainError> {
        let row = sqlx::query_as::<_, PostDetailsRow>(
            r#"
            SELECT
                p.id,
                p.title,
                p.description,
                p.is_private,
                p.profile_id,
                p.created_at,
                p.updated_at,
                pr.user_id AS owner_user_id,
                u.username AS owner_username,
                pr.bio AS owner_bio,
                pr.created_at AS owner_created_at
            FROM posts p
            JOIN profiles pr ON pr.id = p.profile_id
            JOIN users u ON u.id = pr.user_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_details).transpose()
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            INSERT INTO posts (title, description, is_private, profile_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.is_private)
        .bind(input.profile_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn save(&self, post: &Post) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            UPDATE posts
            SET title = $2,
                description = $3,
                is_private = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.description)
        .bind(post.is_private)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        match row {
            Some(row) => map_row_to_post(row),
            None => Err(DomainError::NotFound(format!("post id: {}", post.id))),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_posts_by_profile(
        &self,
        profile_id: Uuid,
        include_private: bool,
    ) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE profile_id = $1
              AND ($2 OR is_private = FALSE)
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(profile_id)
        .bind(include_private)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Post::new(
        row.id,
        row.title,
        row.description,
        row.is_private,
        row.profile_id,
        row.created_at,
        row.updated_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_row_to_details(row: PostDetailsRow) -> Result<PostDetails, DomainError> {
    let owner = Profile::new(
        row.profile_id,
        row.owner_user_id,
        row.owner_username,
        row.owner_bio,
        row.owner_created_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))?;

    let post = map_row_to_post(PostRow {
        id: row.id,
        title: row.title,
        description: row.description,
        is_private: row.is_private,
        profile_id: row.profile_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })?;

    Ok(PostDetails { post, owner })
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("profile".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
