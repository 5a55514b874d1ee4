//! Coordination of the stateless sign-in endpoints.
//!
//! The HTTP layer is stateless, so the pending challenge session is
//! parked in the cache between the start and verify requests, keyed by a
//! random sign-in id handed to the client. The id rotates on every retry
//! round along with the provider's session token.

use http::header::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::challenge::OTP_CHALLENGE_TIMEOUT;
use crate::identity::{IDENTITY_PROVIDER, IdentityError, SignInSession};
use crate::session::{new_session_header, prepare_logout_response};
use crate::signin::{SignInError, SignInFlow, SignInStep, attributes_for};
use crate::storage::{CacheData, GENERIC_CACHE_STORE};
use crate::userdb::{User, UserStore};
use crate::utils::gen_random_string;

use super::errors::CoordinationError;

const PENDING_PREFIX: &str = "pending_signin";
const SIGNIN_ID_LENGTH: usize = 32;

/// Response to a start-sign-in request
#[derive(Debug, Serialize, Deserialize)]
pub struct StartSignInResponse {
    /// Opaque handle the client presents with the code
    pub signin_id: String,
    /// Where the code was sent, for display
    pub destination: Option<String>,
}

/// Response to a code submission
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerifySignInResponse {
    /// The code was accepted and a session was established
    SignedIn { identifier: String },
    /// The code was wrong; retry with the rotated sign-in id
    CodeRetry { signin_id: String },
}

async fn park_pending(session: &SignInSession) -> Result<String, CoordinationError> {
    let signin_id = gen_random_string(SIGNIN_ID_LENGTH)?;
    park_pending_as(&signin_id, session).await?;
    Ok(signin_id)
}

async fn park_pending_as(
    signin_id: &str,
    session: &SignInSession,
) -> Result<(), CoordinationError> {
    let data = CacheData {
        value: serde_json::to_string(session)?,
    };
    GENERIC_CACHE_STORE
        .lock()
        .await
        .put_with_ttl(PENDING_PREFIX, signin_id, data, *OTP_CHALLENGE_TIMEOUT)
        .await?;
    Ok(())
}

async fn take_pending(signin_id: &str) -> Result<SignInSession, CoordinationError> {
    let mut store = GENERIC_CACHE_STORE.lock().await;
    let data = store.get(PENDING_PREFIX, signin_id).await?.ok_or_else(|| {
        CoordinationError::ResourceNotFound {
            resource_type: "pending sign-in".to_string(),
            resource_id: signin_id.to_string(),
        }
        .log()
    })?;
    store.remove(PENDING_PREFIX, signin_id).await?;
    drop(store);
    Ok(serde_json::from_str(&data.value)?)
}

/// Start a sign-in attempt and have a passcode delivered.
///
/// Registers unknown identifiers just in time, then parks the pending
/// challenge session under a fresh sign-in id.
pub async fn handle_start_signin_core(
    identifier: &str,
) -> Result<StartSignInResponse, CoordinationError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(CoordinationError::Coordination(
            "Identifier must not be empty".to_string(),
        )
        .log());
    }

    let mut flow = SignInFlow::new(IDENTITY_PROVIDER.clone());
    flow.send_code(identifier).await?;

    let session = flow.session().ok_or_else(|| {
        CoordinationError::Coordination("Flow did not produce a session".to_string()).log()
    })?;
    let destination = session.destination().map(|d| d.to_string());
    let signin_id = park_pending(session).await?;

    tracing::info!("Sign-in started for {}", identifier);
    Ok(StartSignInResponse {
        signin_id,
        destination,
    })
}

/// Submit the code for a pending sign-in attempt.
///
/// On success the local session cookie is established; the returned
/// headers carry the Set-Cookie. A wrong code within the attempt budget
/// re-parks the rotated session under a new sign-in id. A failure that
/// carries no verdict re-parks the session under the same sign-in id; only
/// an expired session or the attempt limit consumes the entry.
pub async fn handle_verify_code_core(
    signin_id: &str,
    code: &str,
) -> Result<(HeaderMap, VerifySignInResponse), CoordinationError> {
    let session = take_pending(signin_id).await?;
    let identifier = session.username().to_string();

    let mut flow = SignInFlow::resume(IDENTITY_PROVIDER.clone(), session);
    match flow.confirm_code(code.trim()).await {
        Ok(SignInStep::Completed) => {
            let user = ensure_local_user(&identifier).await?;
            let headers = new_session_header(&user.id).await?;
            tracing::info!("Sign-in completed for {}", identifier);
            Ok((headers, VerifySignInResponse::SignedIn { identifier }))
        }
        Ok(_) => {
            let session = flow.session().ok_or_else(|| {
                CoordinationError::Coordination("Retry without a session".to_string()).log()
            })?;
            let signin_id = park_pending(session).await?;
            Ok((
                HeaderMap::new(),
                VerifySignInResponse::CodeRetry { signin_id },
            ))
        }
        Err(SignInError::Identity(
            IdentityError::SessionExpired | IdentityError::NotAuthorized(_),
        )) => Err(CoordinationError::Unauthorized.log()),
        Err(e) => {
            // No verdict was reached; keep the attempt addressable so the
            // client can submit again with the same sign-in id
            if let Some(session) = flow.session() {
                park_pending_as(signin_id, session).await?;
            }
            Err(e.into())
        }
    }
}

/// Log out: expire the session cookie and drop the stored session
pub async fn handle_logout_core(cookies: headers::Cookie) -> Result<HeaderMap, CoordinationError> {
    let headers = prepare_logout_response(cookies).await?;
    Ok(headers)
}

/// The cookie session references a row in the local user table. In remote
/// provider mode the directory lives elsewhere, so the row is mirrored on
/// first successful sign-in.
async fn ensure_local_user(identifier: &str) -> Result<User, CoordinationError> {
    if let Some(user) = UserStore::get_user_by_identifier(identifier).await? {
        return Ok(user);
    }
    let user = User::new(
        uuid::Uuid::new_v4().to_string(),
        identifier.to_string(),
        attributes_for(identifier),
    );
    let user = UserStore::upsert_user(user).await?;
    tracing::debug!("Mirrored user row for {}", identifier);
    Ok(user)
}
