//! In-process identity provider.
//!
//! Runs the whole custom challenge flow against the local user table and
//! cache instead of a remote user-pool service. Pending challenges are
//! parked in the cache under a random session token; the token rotates on
//! every retry round, the way the remote service rotates its session.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::challenge::{
    ChallengeAttempt, ChallengeDecision, OTP_CHALLENGE_TIMEOUT, create_auth_challenge,
    define_auth_challenge, verify_auth_challenge,
};
use crate::delivery::CODE_SENDER;
use crate::storage::{CacheData, GENERIC_CACHE_STORE};
use crate::token::issue_token_pair;
use crate::userdb::{User, UserStore};
use crate::utils::gen_random_string;

use super::errors::IdentityError;
use super::provider::IdentityProvider;
use super::types::{
    AnswerOutcome, AuthTokens, InitiateOutcome, SignInSession, UserAttributes,
};

const CHALLENGE_PREFIX: &str = "signin_challenge";
const SESSION_TOKEN_LENGTH: usize = 32;

/// Pending sign-in attempt parked in the cache between rounds
#[derive(Serialize, Deserialize)]
struct PendingChallenge {
    user_id: String,
    identifier: String,
    passcode: String,
    transcript: Vec<ChallengeAttempt>,
}

pub struct LocalProvider;

impl LocalProvider {
    pub fn new() -> Self {
        Self
    }

    async fn park(&self, pending: &PendingChallenge) -> Result<String, IdentityError> {
        let session_token = gen_random_string(SESSION_TOKEN_LENGTH)?;
        let data = CacheData {
            value: serde_json::to_string(pending)?,
        };
        GENERIC_CACHE_STORE
            .lock()
            .await
            .put_with_ttl(CHALLENGE_PREFIX, &session_token, data, *OTP_CHALLENGE_TIMEOUT)
            .await?;
        Ok(session_token)
    }

    async fn take(&self, session_token: &str) -> Result<PendingChallenge, IdentityError> {
        let mut store = GENERIC_CACHE_STORE.lock().await;
        let data = store
            .get(CHALLENGE_PREFIX, session_token)
            .await?
            .ok_or(IdentityError::SessionExpired)?;
        store.remove(CHALLENGE_PREFIX, session_token).await?;
        drop(store);
        Ok(serde_json::from_str(&data.value)?)
    }
}

impl Default for LocalProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for LocalProvider {
    async fn initiate_sign_in(&self, identifier: &str) -> Result<InitiateOutcome, IdentityError> {
        let user = UserStore::get_user_by_identifier(identifier).await?;
        define_auth_challenge(user.is_some(), &[])?;
        let user = user.ok_or(IdentityError::UserNotFound)?;

        let material = create_auth_challenge(&[])?;
        let destination = user.code_destination().to_string();
        if material.fresh {
            CODE_SENDER
                .send_code(&destination, &material.passcode)
                .await?;
        }

        let pending = PendingChallenge {
            user_id: user.id.clone(),
            identifier: identifier.to_string(),
            passcode: material.passcode,
            transcript: Vec::new(),
        };
        let session_token = self.park(&pending).await?;
        tracing::debug!("Presented a challenge for {}", identifier);

        Ok(InitiateOutcome::Challenge(SignInSession::new(
            session_token,
            identifier.to_string(),
            Some(destination),
        )))
    }

    async fn answer_challenge(
        &self,
        session: SignInSession,
        code: &str,
    ) -> Result<AnswerOutcome, IdentityError> {
        let mut pending = self.take(&session.session_token).await?;

        let passed = verify_auth_challenge(&pending.passcode, code);
        pending.transcript.push(ChallengeAttempt {
            metadata: Some(format!("CODE-{}", pending.passcode)),
            passed,
        });

        match define_auth_challenge(true, &pending.transcript)? {
            ChallengeDecision::IssueTokens => {
                let (access_token, id_token, expires_in) = issue_token_pair(&pending.user_id)?;
                tracing::debug!("Sign-in completed for {}", pending.identifier);
                Ok(AnswerOutcome::SignedIn(AuthTokens {
                    access_token,
                    id_token,
                    token_type: "Bearer".to_string(),
                    expires_in: expires_in as u64,
                }))
            }
            ChallengeDecision::Present => {
                // Reuses the outstanding passcode, nothing to deliver
                let material = create_auth_challenge(&pending.transcript)?;
                pending.passcode = material.passcode;
                let session_token = self.park(&pending).await?;
                tracing::debug!(
                    "Wrong answer {} of {} for {}",
                    pending.transcript.len(),
                    *crate::challenge::OTP_MAX_ATTEMPTS,
                    pending.identifier
                );
                Ok(AnswerOutcome::Retry(SignInSession::new(
                    session_token,
                    pending.identifier,
                    session.destination,
                )))
            }
        }
    }

    async fn register(
        &self,
        identifier: &str,
        _password: &str,
        attributes: UserAttributes,
    ) -> Result<(), IdentityError> {
        if UserStore::get_user_by_identifier(identifier)
            .await?
            .is_some()
        {
            return Err(IdentityError::UserExists);
        }

        let user = User::new(
            uuid::Uuid::new_v4().to_string(),
            identifier.to_string(),
            attributes,
        );
        UserStore::upsert_user(user).await?;
        tracing::debug!("Registered {}", identifier);
        Ok(())
    }
}
