use std::sync::Arc;

use crate::identity::{AnswerOutcome, IdentityError, IdentityProvider, SignInSession};

/// Submit a one-time code against a pending challenge session, outside of
/// a [`SignInFlow`](super::SignInFlow).
///
/// For callers that carry the session themselves, e.g. when the code
/// arrives over a different channel than the one that started the
/// attempt.
pub async fn verify_code(
    provider: Arc<dyn IdentityProvider>,
    session: SignInSession,
    code: &str,
) -> Result<AnswerOutcome, IdentityError> {
    provider.answer_challenge(session, code).await
}
