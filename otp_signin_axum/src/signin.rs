use askama::Template;
use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;

use otp_signin::{
    OTP_ROUTE_PREFIX, StartSignInResponse, VerifySignInResponse, handle_start_signin_core,
    handle_verify_code_core,
};

use crate::config::OTP_REDIRECT_USER;
use crate::error::IntoResponseError;
use crate::session::AuthUser;

pub(crate) fn router() -> Router {
    Router::new()
        .route("/", get(signin_page))
        .route("/start", post(start_signin))
        .route("/verify", post(verify_code))
        .route("/signin.js", get(serve_signin_js))
}

#[derive(Template)]
#[template(path = "signin.j2")]
struct SignInTemplate<'a> {
    message: &'a str,
    otp_route_prefix: &'a str,
}

/// The two-step sign-in page. Signed-in users are sent on their way.
async fn signin_page(user: Option<AuthUser>) -> Result<Response, (StatusCode, String)> {
    match user {
        Some(_) => Ok(Redirect::to(OTP_REDIRECT_USER.as_str()).into_response()),
        None => {
            let template = SignInTemplate {
                message: "Sign in with a one-time code",
                otp_route_prefix: OTP_ROUTE_PREFIX.as_str(),
            };
            let html = Html(
                template
                    .render()
                    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?,
            );
            Ok(html.into_response())
        }
    }
}

#[derive(Deserialize)]
struct StartRequest {
    identifier: String,
}

/// Step one: take the identifier and have a code delivered
async fn start_signin(
    Json(request): Json<StartRequest>,
) -> Result<Json<StartSignInResponse>, (StatusCode, String)> {
    let response = handle_start_signin_core(&request.identifier)
        .await
        .into_response_error()?;
    Ok(Json(response))
}

#[derive(Deserialize)]
struct VerifyRequest {
    signin_id: String,
    code: String,
}

/// Step two: submit the code. On success the response carries the
/// session Set-Cookie header.
async fn verify_code(
    Json(request): Json<VerifyRequest>,
) -> Result<(HeaderMap, Json<VerifySignInResponse>), (StatusCode, String)> {
    let (headers, response) = handle_verify_code_core(&request.signin_id, &request.code)
        .await
        .into_response_error()?;
    Ok((headers, Json(response)))
}

async fn serve_signin_js() -> Response {
    let js_content = include_str!("../static/signin.js");
    ([(CONTENT_TYPE, "application/javascript")], js_content).into_response()
}
