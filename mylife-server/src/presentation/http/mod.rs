use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use sqlx::PgPool;
use tracing::warn;

use crate::application::auth_service::AuthService;
use crate::application::outcome::Envelope;
use crate::application::post_service::PostService;
use crate::application::profile_service::ProfileService;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::profile_repository::PostgresProfileRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod app_error;
pub(crate) mod envelope;
pub(crate) mod extract;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

type PgPostService = PostService<PostgresPostRepository, PostgresProfileRepository>;
type PgProfileService = ProfileService<PostgresPostRepository, PostgresProfileRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) pool: PgPool,
    pub(crate) auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub(crate) post_service: Arc<PgPostService>,
    pub(crate) profile_service: Arc<PgProfileService>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn new(
        pool: PgPool,
        auth_service: Arc<AuthService<PostgresUserRepository>>,
        post_service: Arc<PgPostService>,
        profile_service: Arc<PgProfileService>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            pool,
            auth_service,
            post_service,
            profile_service,
            jwt,
        }
    }
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .merge(routes::router(state.clone()))
        .fallback(route_not_found)
        .with_state(state)
}

async fn route_not_found() -> Envelope<()> {
    Envelope::failure(StatusCode::NOT_FOUND.as_u16(), "route not found")
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
    database: &'static str,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthzResponse> {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "ok",
        Err(err) => {
            warn!(error = %err, "database health check failed");
            "unavailable"
        }
    };

    Json(HealthzResponse {
        status: "ok",
        database,
    })
}
