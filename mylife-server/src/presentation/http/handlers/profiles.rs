use axum::extract::State;
use tracing::debug;

use crate::application::dto::ProfileDetailDto;
use crate::application::outcome::Envelope;
use crate::presentation::http::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::extract::IdPath;
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/api/profiles/me",
    tag = "profiles",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Envelope with the caller's profile and all of its posts", body = ProfileDetailDto),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_my_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<Envelope<ProfileDetailDto>> {
    debug!(username = %auth.username, "loading own profile");
    Ok(state
        .profile_service
        .get_my_profile(auth.user_id)
        .await?
        .into_envelope())
}

#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    tag = "profiles",
    params(
        ("id" = Uuid, Path, description = "Profile id")
    ),
    responses(
        (status = 200, description = "Envelope with the profile and its public posts", body = ProfileDetailDto),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Profile not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_profile(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Envelope<ProfileDetailDto>> {
    Ok(state.profile_service.get_profile(id).await?.into_envelope())
}
