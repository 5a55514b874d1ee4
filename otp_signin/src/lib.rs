//! otp-signin - Passwordless one-time passcode sign-in.
//!
//! A user enters an email address or phone number, receives a short
//! numeric code over that channel and enters the code to sign in. The
//! flow is backed by a custom challenge protocol: an identity provider
//! presents a challenge, the user answers it, and a wrong answer within
//! the attempt budget re-presents the same code.
//!
//! Two providers ship with the crate: [`RemoteProvider`] speaks the
//! managed user-pool wire protocol over HTTPS, [`LocalProvider`] runs the
//! whole flow in process against a local user table, which also makes the
//! crate testable without a network.

mod challenge;
mod config;
mod coordination;
mod delivery;
mod identity;
mod session;
mod signin;
mod storage;
mod token;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

pub use coordination::{
    CoordinationError, StartSignInResponse, VerifySignInResponse, handle_logout_core,
    handle_start_signin_core, handle_verify_code_core,
};

pub use challenge::ChallengeError;
pub use config::OTP_ROUTE_PREFIX;
pub use delivery::{CodeSender, DeliveryError, TracingSender, WebhookSender};
pub use identity::{
    AnswerOutcome, AuthTokens, IdentityError, IdentityProvider, InitiateOutcome, LocalProvider,
    RemoteProvider, SignInSession, UserAttributes,
};
pub use session::{
    SESSION_COOKIE_NAME, SessionError, SessionUser, get_user_from_headers,
    get_user_from_session, prepare_logout_response,
};
pub use signin::{
    IdentifierKind, SignInError, SignInFlow, SignInStep, classify_identifier, verify_code,
};
pub use token::{TokenClaims, TokenError, verify_token};
pub use userdb::{User, UserError, UserStore};

/// Initialize the sign-in layer: the cache, the database pool and the
/// user table
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await?;
    userdb::init().await?;
    Ok(())
}
