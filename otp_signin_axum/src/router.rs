//! Combined router for the sign-in endpoints

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Create a combined router for the sign-in endpoints.
///
/// Mount it under [`OTP_ROUTE_PREFIX`](otp_signin::OTP_ROUTE_PREFIX); the
/// endpoints become:
/// - {OTP_ROUTE_PREFIX}/signin (page), /signin/start, /signin/verify
/// - {OTP_ROUTE_PREFIX}/user/info, /user/logout
pub fn otp_signin_router() -> Router {
    otp_signin_router_no_trace().layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(true),
            )
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// The same router without the HTTP tracing middleware, for applications
/// that bring their own
pub fn otp_signin_router_no_trace() -> Router {
    Router::new()
        .nest("/signin", super::signin::router())
        .nest("/user", super::user::router())
}
