use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::AuthService;
use application::authenticated_profile::AuthenticatedProfileService;
use application::post_service::PostService;
use application::profile_service::ProfileService;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::profile_repository::PostgresProfileRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::http::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env().context("failed to load settings")?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url, settings.db_max_connections).await?;
    run_migrations(&pool).await?;

    let post_repo = PostgresPostRepository::new(pool.clone());
    let profile_repo = PostgresProfileRepository::new(pool.clone());
    let user_repo = PostgresUserRepository::new(pool.clone());

    let auth_service = AuthService::new(
        user_repo,
        JwtService::new(&settings.jwt_secret, settings.jwt_ttl_seconds),
    );
    let post_service = PostService::new(
        post_repo.clone(),
        AuthenticatedProfileService::new(profile_repo.clone()),
    );
    let profile_service = ProfileService::new(post_repo, profile_repo);
    let jwt = JwtService::new(&settings.jwt_secret, settings.jwt_ttl_seconds);

    let state = AppState::new(
        pool,
        Arc::new(auth_service),
        Arc::new(post_service),
        Arc::new(profile_service),
        Arc::new(jwt),
    );

    info!("starting mylife-server");
    server::run_http(&settings, state).await
}
