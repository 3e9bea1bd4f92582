use std::time::Duration;

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower::{ServiceBuilder, limit::GlobalConcurrencyLimitLayer, timeout::TimeoutLayer};
use tracing::{error, warn};

use crate::application::outcome::Envelope;

#[derive(Debug, Clone, Copy)]
pub(crate) struct HttpLimits {
    pub(crate) body_limit_bytes: usize,
    pub(crate) concurrency_limit: usize,
    pub(crate) request_timeout: Duration,
}

pub(crate) fn apply_limits(router: Router, limits: HttpLimits) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_layer_error))
            .layer(TimeoutLayer::new(limits.request_timeout))
            // one semaphore for every route
            .layer(GlobalConcurrencyLimitLayer::new(limits.concurrency_limit))
            // enforced by the body extractors, which reject with a 413 envelope
            .layer(DefaultBodyLimit::max(limits.body_limit_bytes)),
    )
}

async fn handle_layer_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        warn!("request timed out");
        return Envelope::failure(StatusCode::REQUEST_TIMEOUT.as_u16(), "request timed out")
            .into_response();
    }

    error!(error = %err, "unhandled middleware error");
    Envelope::failure(
        StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        "internal error",
    )
    .into_response()
}
