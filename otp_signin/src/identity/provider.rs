use async_trait::async_trait;

use super::errors::IdentityError;
use super::types::{AnswerOutcome, InitiateOutcome, SignInSession, UserAttributes};

/// Narrow capability interface over an identity provider's passwordless
/// sign-in primitives.
///
/// UI and coordination code depend only on this trait, so the flow logic is
/// testable with a substitute implementation and never touches the network
/// directly. Exactly three operations exist: initiate a sign-in, answer the
/// resulting challenge, and register a new user.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Start a passwordless sign-in for the given identifier.
    ///
    /// On success the provider either issues a custom challenge (the usual
    /// path) or resolves the sign-in directly.
    async fn initiate_sign_in(&self, identifier: &str) -> Result<InitiateOutcome, IdentityError>;

    /// Answer a pending custom challenge with the code the user received
    /// out-of-band. A wrong answer with attempts remaining yields
    /// [`AnswerOutcome::Retry`] carrying a refreshed session handle.
    async fn answer_challenge(
        &self,
        session: SignInSession,
        code: &str,
    ) -> Result<AnswerOutcome, IdentityError>;

    /// Register a new user with a throwaway password and the attributes
    /// classified from the identifier.
    async fn register(
        &self,
        identifier: &str,
        password: &str,
        attributes: UserAttributes,
    ) -> Result<(), IdentityError>;
}
