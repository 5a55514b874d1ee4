use axum::{
    Json, Router,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::{TypedHeader, headers};
use http::StatusCode;
use serde_json::json;

use otp_signin::handle_logout_core;

use crate::config::OTP_REDIRECT_ANON;
use crate::error::IntoResponseError;
use crate::session::AuthUser;

pub(crate) fn router() -> Router {
    Router::new()
        .route("/info", get(user_info))
        .route("/logout", get(logout))
}

/// The signed-in user's account details as JSON
async fn user_info(user: AuthUser) -> Json<serde_json::Value> {
    Json(json!({
        "id": user.id,
        "identifier": user.identifier,
        "email": user.email,
        "phone_number": user.phone_number,
        "created_at": user.created_at,
        "updated_at": user.updated_at,
    }))
}

/// Drop the session and send the user back to the anonymous page
async fn logout(
    cookies: TypedHeader<headers::Cookie>,
) -> Result<Response, (StatusCode, String)> {
    let headers = handle_logout_core(cookies.0).await.into_response_error()?;
    Ok((headers, Redirect::to(OTP_REDIRECT_ANON.as_str())).into_response())
}
