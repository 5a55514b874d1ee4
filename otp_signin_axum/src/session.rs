use axum::{
    RequestPartsExt,
    extract::{FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::{TypedHeader, headers};
use chrono::{DateTime, Utc};
use http::{Method, StatusCode, request::Parts};

use super::config::OTP_REDIRECT_ANON;
use otp_signin::{SESSION_COOKIE_NAME, SessionUser, get_user_from_session};

/// Rejection for unauthenticated requests: GETs are redirected to the
/// sign-in page, everything else gets a plain 401.
pub struct AuthRedirect {
    method: Method,
}

impl AuthRedirect {
    fn new(method: Method) -> Self {
        Self { method }
    }

    fn into_response_with_method(self) -> Response {
        if self.method == Method::GET {
            tracing::debug!("Redirecting to {}", OTP_REDIRECT_ANON.as_str());
            Redirect::temporary(OTP_REDIRECT_ANON.as_str()).into_response()
        } else {
            tracing::debug!("Unauthorized");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        self.into_response_with_method()
    }
}

/// Signed-in user information, available as an Axum extractor.
///
/// Extraction checks for a valid session cookie; handlers taking
/// `AuthUser` only run for signed-in users, handlers taking
/// `Option<AuthUser>` run for everyone.
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// Unique user identifier
    pub id: String,
    /// The identifier the user signs in with
    pub identifier: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SessionUser> for AuthUser {
    fn from(session_user: SessionUser) -> Self {
        AuthUser {
            id: session_user.id,
            identifier: session_user.identifier,
            email: session_user.email,
            phone_number: session_user.phone_number,
            created_at: session_user.created_at,
            updated_at: session_user.updated_at,
        }
    }
}

impl<B> FromRequestParts<B> for AuthUser
where
    B: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, _: &B) -> Result<Self, Self::Rejection> {
        let method = parts.method.clone();
        let cookies: TypedHeader<headers::Cookie> = parts.extract().await.map_err(|_| {
            tracing::debug!("Failed to extract cookies");
            AuthRedirect::new(method.clone())
        })?;

        let session_cookie = cookies.get(SESSION_COOKIE_NAME.as_str()).ok_or_else(|| {
            tracing::debug!("No session cookie '{}' present", SESSION_COOKIE_NAME.as_str());
            AuthRedirect::new(method.clone())
        })?;

        let session_user = get_user_from_session(session_cookie).await.map_err(|_| {
            tracing::debug!("Session cookie did not resolve to a user");
            AuthRedirect::new(method.clone())
        })?;

        Ok(AuthUser::from(session_user))
    }
}

impl<B> OptionalFromRequestParts<B> for AuthUser
where
    B: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &B,
    ) -> Result<Option<Self>, Self::Rejection> {
        let result: Result<Self, Self::Rejection> =
            <AuthUser as FromRequestParts<B>>::from_request_parts(parts, state).await;
        Ok(result.ok())
    }
}
