use std::sync::Arc;

use crate::identity::{
    AnswerOutcome, AuthTokens, IdentityError, IdentityProvider, InitiateOutcome, SignInSession,
};
use crate::utils::gen_random_string;

use super::classify::attributes_for;
use super::errors::SignInError;

/// Throwaway password handed to just-in-time registration. The account is
/// passwordless, the directory merely requires one at creation.
const JIT_PASSWORD_LENGTH: usize = 8;

/// Where a sign-in attempt currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInStep {
    /// Waiting for the user to enter an email address or phone number
    AwaitingIdentifier,
    /// A code was sent, waiting for the user to enter it
    AwaitingCode,
    /// The code was accepted and tokens were issued
    Completed,
}

/// Two-step one-time passcode sign-in.
///
/// Drives an [`IdentityProvider`] through the custom challenge flow:
/// [`send_code`](Self::send_code) takes the identifier and has a passcode
/// delivered, [`confirm_code`](Self::confirm_code) submits the user's
/// answer. Unknown identifiers are registered just in time and the
/// sign-in retried once.
pub struct SignInFlow {
    provider: Arc<dyn IdentityProvider>,
    step: SignInStep,
    session: Option<SignInSession>,
    tokens: Option<AuthTokens>,
}

impl SignInFlow {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            step: SignInStep::AwaitingIdentifier,
            session: None,
            tokens: None,
        }
    }

    /// Resume a flow at the code step with a previously issued session,
    /// e.g. one parked in a cache between stateless requests
    pub fn resume(provider: Arc<dyn IdentityProvider>, session: SignInSession) -> Self {
        Self {
            provider,
            step: SignInStep::AwaitingCode,
            session: Some(session),
            tokens: None,
        }
    }

    pub fn step(&self) -> SignInStep {
        self.step
    }

    /// The pending challenge session, while a code is awaited
    pub fn session(&self) -> Option<&SignInSession> {
        self.session.as_ref()
    }

    /// Tokens issued on completion
    pub fn tokens(&self) -> Option<&AuthTokens> {
        self.tokens.as_ref()
    }

    pub fn take_tokens(&mut self) -> Option<AuthTokens> {
        self.tokens.take()
    }

    /// Start a sign-in attempt for `identifier` and have a passcode
    /// delivered.
    ///
    /// If the identifier is unknown, the account is registered with
    /// attributes derived from the identifier's shape and the sign-in is
    /// retried exactly once. Any other initiation error is returned as is.
    pub async fn send_code(&mut self, identifier: &str) -> Result<SignInStep, SignInError> {
        if self.step != SignInStep::AwaitingIdentifier {
            return Err(SignInError::InvalidState(
                "A code was already sent; confirm it or start over".to_string(),
            ));
        }

        let outcome = match self.provider.initiate_sign_in(identifier).await {
            Ok(outcome) => outcome,
            Err(IdentityError::UserNotFound) => {
                tracing::debug!("Unknown identifier, registering just in time");
                let password = gen_random_string(JIT_PASSWORD_LENGTH)
                    .map_err(IdentityError::Utils)?;
                self.provider
                    .register(identifier, &password, attributes_for(identifier))
                    .await?;
                self.provider.initiate_sign_in(identifier).await?
            }
            Err(e) => return Err(e.into()),
        };

        match outcome {
            InitiateOutcome::Challenge(session) => {
                self.session = Some(session);
                self.step = SignInStep::AwaitingCode;
                Ok(self.step)
            }
            InitiateOutcome::SignedIn(_) => {
                tracing::warn!("Expected a custom challenge, got tokens");
                Err(SignInError::UnexpectedChallenge)
            }
        }
    }

    /// Submit the code the user received.
    ///
    /// A wrong code keeps the flow on [`SignInStep::AwaitingCode`] with a
    /// rotated session so it can be retried. An expired or closed attempt
    /// (attempt limit reached) resets the flow to the identifier step; any
    /// other failure leaves the step and the held session untouched so the
    /// same code entry can be retried.
    pub async fn confirm_code(&mut self, code: &str) -> Result<SignInStep, SignInError> {
        if self.step != SignInStep::AwaitingCode {
            return Err(SignInError::InvalidState(
                "No code is awaited; send one first".to_string(),
            ));
        }
        let session = self
            .session
            .take()
            .ok_or_else(|| SignInError::InvalidState("No pending session".to_string()))?;
        let held = session.clone();

        match self.provider.answer_challenge(session, code).await {
            Ok(AnswerOutcome::SignedIn(tokens)) => {
                self.tokens = Some(tokens);
                self.step = SignInStep::Completed;
                Ok(self.step)
            }
            Ok(AnswerOutcome::Retry(next)) => {
                self.session = Some(next);
                Ok(self.step)
            }
            Err(e @ (IdentityError::SessionExpired | IdentityError::NotAuthorized(_))) => {
                // The provider closed the attempt; it must start over
                self.step = SignInStep::AwaitingIdentifier;
                Err(e.into())
            }
            Err(e) => {
                self.session = Some(held);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::identity::UserAttributes;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Initiate(String),
        Answer(String, String),
        Register(String),
    }

    /// Scripted provider that records every call it receives
    struct ScriptedProvider {
        calls: Mutex<Vec<Call>>,
        known_user: Mutex<Option<String>>,
        register_fails: bool,
        passcode: String,
        rounds_before_lockout: Mutex<usize>,
        unreachable: Mutex<bool>,
    }

    impl ScriptedProvider {
        fn with_known_user(identifier: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                known_user: Mutex::new(Some(identifier.to_string())),
                register_fails: false,
                passcode: "246810".to_string(),
                rounds_before_lockout: Mutex::new(3),
                unreachable: Mutex::new(false),
            }
        }

        fn with_no_users() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                known_user: Mutex::new(None),
                register_fails: false,
                passcode: "246810".to_string(),
                rounds_before_lockout: Mutex::new(3),
                unreachable: Mutex::new(false),
            }
        }

        fn set_unreachable(&self, down: bool) {
            *self.unreachable.lock().unwrap() = down;
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn tokens() -> AuthTokens {
            AuthTokens {
                access_token: "at".to_string(),
                id_token: "it".to_string(),
                token_type: "Bearer".to_string(),
                expires_in: 3600,
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for ScriptedProvider {
        async fn initiate_sign_in(
            &self,
            identifier: &str,
        ) -> Result<InitiateOutcome, IdentityError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Initiate(identifier.to_string()));
            let known = self.known_user.lock().unwrap().clone();
            if known.as_deref() != Some(identifier) {
                return Err(IdentityError::UserNotFound);
            }
            Ok(InitiateOutcome::Challenge(SignInSession::new(
                "session-1".to_string(),
                identifier.to_string(),
                None,
            )))
        }

        async fn answer_challenge(
            &self,
            session: SignInSession,
            code: &str,
        ) -> Result<AnswerOutcome, IdentityError> {
            self.calls.lock().unwrap().push(Call::Answer(
                session.username().to_string(),
                code.to_string(),
            ));
            if *self.unreachable.lock().unwrap() {
                return Err(IdentityError::Network("connection refused".to_string()));
            }
            if code == self.passcode {
                return Ok(AnswerOutcome::SignedIn(Self::tokens()));
            }
            let mut rounds = self.rounds_before_lockout.lock().unwrap();
            *rounds -= 1;
            if *rounds == 0 {
                return Err(IdentityError::NotAuthorized("Invalid OTP".to_string()));
            }
            Ok(AnswerOutcome::Retry(SignInSession::new(
                format!("{}-next", session.session_token),
                session.username().to_string(),
                None,
            )))
        }

        async fn register(
            &self,
            identifier: &str,
            _password: &str,
            _attributes: UserAttributes,
        ) -> Result<(), IdentityError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Register(identifier.to_string()));
            if self.register_fails {
                return Err(IdentityError::InvalidParameter(
                    "Invalid identifier".to_string(),
                ));
            }
            *self.known_user.lock().unwrap() = Some(identifier.to_string());
            Ok(())
        }
    }

    /// A known identifier initiates exactly once and never registers
    #[tokio::test]
    async fn test_known_user_initiates_once() {
        let provider = Arc::new(ScriptedProvider::with_known_user("user@example.com"));
        let mut flow = SignInFlow::new(provider.clone());

        let step = flow.send_code("user@example.com").await.expect("Failed");
        assert_eq!(step, SignInStep::AwaitingCode);
        assert!(flow.session().is_some());
        assert_eq!(
            provider.calls(),
            vec![Call::Initiate("user@example.com".to_string())]
        );
    }

    /// An unknown identifier registers once, then retries the sign-in once
    #[tokio::test]
    async fn test_unknown_user_registers_then_retries() {
        let provider = Arc::new(ScriptedProvider::with_no_users());
        let mut flow = SignInFlow::new(provider.clone());

        let step = flow.send_code("new@example.com").await.expect("Failed");
        assert_eq!(step, SignInStep::AwaitingCode);
        assert_eq!(
            provider.calls(),
            vec![
                Call::Initiate("new@example.com".to_string()),
                Call::Register("new@example.com".to_string()),
                Call::Initiate("new@example.com".to_string()),
            ]
        );
    }

    /// A failed registration propagates and does not retry the sign-in
    #[tokio::test]
    async fn test_failed_registration_does_not_retry() {
        let provider = Arc::new(ScriptedProvider {
            register_fails: true,
            ..ScriptedProvider::with_no_users()
        });
        let mut flow = SignInFlow::new(provider.clone());

        let result = flow.send_code("bad identifier").await;
        assert!(matches!(
            result,
            Err(SignInError::Identity(IdentityError::InvalidParameter(_)))
        ));
        assert_eq!(flow.step(), SignInStep::AwaitingIdentifier);
        assert_eq!(
            provider.calls(),
            vec![
                Call::Initiate("bad identifier".to_string()),
                Call::Register("bad identifier".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_correct_code_completes_the_flow() {
        let provider = Arc::new(ScriptedProvider::with_known_user("user@example.com"));
        let mut flow = SignInFlow::new(provider.clone());

        flow.send_code("user@example.com").await.expect("Failed");
        let step = flow.confirm_code("246810").await.expect("Failed");
        assert_eq!(step, SignInStep::Completed);
        let tokens = flow.tokens().expect("Tokens should be present");
        assert_eq!(tokens.token_type, "Bearer");
    }

    /// A wrong code stays on the code step with a rotated session
    #[tokio::test]
    async fn test_wrong_code_stays_on_code_step() {
        let provider = Arc::new(ScriptedProvider::with_known_user("user@example.com"));
        let mut flow = SignInFlow::new(provider.clone());

        flow.send_code("user@example.com").await.expect("Failed");
        let step = flow.confirm_code("000000").await.expect("Retry expected");
        assert_eq!(step, SignInStep::AwaitingCode);
        assert!(flow.tokens().is_none());

        // The retry uses the rotated session and can still succeed
        let step = flow.confirm_code("246810").await.expect("Failed");
        assert_eq!(step, SignInStep::Completed);
    }

    /// A failure that carries no verdict on the code keeps the flow on the
    /// code step with the session intact, so the entry can be retried
    #[tokio::test]
    async fn test_unreachable_provider_keeps_the_code_step() {
        let provider = Arc::new(ScriptedProvider::with_known_user("user@example.com"));
        let mut flow = SignInFlow::new(provider.clone());

        flow.send_code("user@example.com").await.expect("Failed");
        provider.set_unreachable(true);

        let result = flow.confirm_code("246810").await;
        assert!(matches!(
            result,
            Err(SignInError::Identity(IdentityError::Network(_)))
        ));
        assert_eq!(flow.step(), SignInStep::AwaitingCode);
        assert!(flow.session().is_some());

        // Once the provider is back the same session still completes
        provider.set_unreachable(false);
        let step = flow.confirm_code("246810").await.expect("Failed");
        assert_eq!(step, SignInStep::Completed);
    }

    /// A closed attempt resets the flow to the identifier step
    #[tokio::test]
    async fn test_lockout_resets_the_flow() {
        let provider = Arc::new(ScriptedProvider {
            rounds_before_lockout: Mutex::new(1),
            ..ScriptedProvider::with_known_user("user@example.com")
        });
        let mut flow = SignInFlow::new(provider.clone());

        flow.send_code("user@example.com").await.expect("Failed");
        let result = flow.confirm_code("000000").await;
        assert!(matches!(
            result,
            Err(SignInError::Identity(IdentityError::NotAuthorized(_)))
        ));
        assert_eq!(flow.step(), SignInStep::AwaitingIdentifier);
        assert!(flow.session().is_none());
    }

    #[tokio::test]
    async fn test_operations_outside_their_step_are_rejected() {
        let provider = Arc::new(ScriptedProvider::with_known_user("user@example.com"));
        let mut flow = SignInFlow::new(provider.clone());

        let result = flow.confirm_code("246810").await;
        assert!(matches!(result, Err(SignInError::InvalidState(_))));

        flow.send_code("user@example.com").await.expect("Failed");
        let result = flow.send_code("user@example.com").await;
        assert!(matches!(result, Err(SignInError::InvalidState(_))));
        // The rejected call never reached the provider
        assert_eq!(
            provider.calls(),
            vec![Call::Initiate("user@example.com".to_string())]
        );
    }
}
