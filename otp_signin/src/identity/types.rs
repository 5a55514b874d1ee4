use serde::{Deserialize, Serialize};

/// Opaque handle for an in-progress authentication attempt.
///
/// Returned by `initiate_sign_in` when the provider issues a custom
/// challenge, and required to answer it. The handle lives only as long as
/// the exchange; dropping it (or starting a new sign-in) abandons the
/// attempt. `Debug` redacts the session token.
#[derive(Clone, Serialize, Deserialize)]
pub struct SignInSession {
    /// Provider session token, passed back verbatim when answering
    pub(crate) session_token: String,
    /// The principal the challenge was issued for
    pub(crate) username: String,
    /// Public challenge parameters (e.g. the masked delivery destination)
    pub(crate) destination: Option<String>,
}

impl SignInSession {
    pub(crate) fn new(session_token: String, username: String, destination: Option<String>) -> Self {
        Self {
            session_token,
            username,
            destination,
        }
    }

    /// The sign-in principal this session belongs to
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Masked destination the code was delivered to, when the provider
    /// published one
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }
}

impl std::fmt::Debug for SignInSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInSession")
            .field("session_token", &"<redacted>")
            .field("username", &self.username)
            .field("destination", &self.destination)
            .finish()
    }
}

/// Tokens issued once a challenge is answered correctly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub id_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Attributes classified from a sign-in identifier at registration time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAttributes {
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

/// Result of initiating a sign-in
#[derive(Debug)]
pub enum InitiateOutcome {
    /// A custom challenge is pending; answer it with the session handle
    Challenge(SignInSession),
    /// The provider resolved the sign-in without a challenge
    SignedIn(AuthTokens),
}

/// Result of answering a challenge
#[derive(Debug)]
pub enum AnswerOutcome {
    /// The answer was correct; tokens were issued
    SignedIn(AuthTokens),
    /// The answer was wrong but attempts remain; retry with the new handle
    Retry(SignInSession),
}
