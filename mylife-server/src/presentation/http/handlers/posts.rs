use axum::extract::State;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::application::dto::{PostDetailDto, PostIdDto, PostsPayload};
use crate::application::outcome::Envelope;
use crate::domain::post::{CreatePostRequest, UpdatePostRequest};
use crate::presentation::http::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::extract::{IdPath, ValidJson};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

// Title rules (blank, over 255 chars after trimming) are left to the domain, which answers
// with a 400 envelope.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePostDto {
    pub(crate) title: String,
    #[validate(length(max = 20000))]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) is_private: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePostDto {
    pub(crate) title: String,
    #[validate(length(max = 20000))]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) is_private: bool,
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses(
        (status = 200, description = "Envelope with every public post, newest first", body = PostsPayload),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(State(state): State<AppState>) -> AppResult<Envelope<PostsPayload>> {
    Ok(state.post_service.get_public_posts().await?.into_envelope())
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = Uuid, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Envelope with the post and its owner profile", body = PostDetailDto),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Envelope<PostDetailDto>> {
    Ok(state.post_service.get_post_by_id(id).await?.into_envelope())
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Envelope with the new post id", body = PostIdDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ValidJson(dto): ValidJson<CreatePostDto>,
) -> AppResult<Envelope<PostIdDto>> {
    let req = CreatePostRequest {
        title: dto.title,
        description: dto.description,
        is_private: dto.is_private,
    };

    Ok(state
        .post_service
        .create_post(auth.user_id, req)
        .await?
        .into_envelope())
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = Uuid, Path, description = "Post id")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Envelope with the updated post id", body = PostIdDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not the post creator"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    IdPath(id): IdPath,
    ValidJson(dto): ValidJson<UpdatePostDto>,
) -> AppResult<Envelope<PostIdDto>> {
    let req = UpdatePostRequest {
        title: dto.title,
        description: dto.description,
        is_private: dto.is_private,
    };

    Ok(state
        .post_service
        .update_post(auth.user_id, id, req)
        .await?
        .into_envelope())
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = Uuid, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not the post creator"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    IdPath(id): IdPath,
) -> AppResult<Envelope<()>> {
    Ok(state
        .post_service
        .delete_post(auth.user_id, id)
        .await?
        .into_envelope())
}
