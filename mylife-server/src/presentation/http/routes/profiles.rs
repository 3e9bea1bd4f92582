use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::presentation::http::AppState;
use crate::presentation::http::handlers::profiles::{get_my_profile, get_profile};
use crate::presentation::http::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/{id}", get(get_profile));

    let protected = Router::new()
        .route("/me", get(get_my_profile))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(protected)
}
