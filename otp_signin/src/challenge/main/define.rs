use super::super::config::OTP_MAX_ATTEMPTS;
use super::super::errors::ChallengeError;
use super::super::types::{ChallengeAttempt, ChallengeDecision};

/// Decide what the next step of a sign-in attempt is, from the transcript
/// of rounds so far.
///
/// A correct answer in the latest round issues tokens. A wrong answer with
/// the attempt budget used up fails the attempt outright. Anything else,
/// including an empty transcript, presents the challenge again.
pub(crate) fn define_auth_challenge(
    user_found: bool,
    transcript: &[ChallengeAttempt],
) -> Result<ChallengeDecision, ChallengeError> {
    if !user_found {
        tracing::debug!("Sign-in attempted for a nonexistent user");
        return Err(ChallengeError::UserNotFound);
    }

    match transcript.last() {
        Some(last) if last.passed => {
            tracing::debug!("The user provided the right answer to the challenge");
            Ok(ChallengeDecision::IssueTokens)
        }
        Some(last) if !last.passed && transcript.len() >= *OTP_MAX_ATTEMPTS => {
            tracing::debug!(
                "Failed authentication: wrong answer {} times",
                transcript.len()
            );
            Err(ChallengeError::TooManyAttempts)
        }
        _ => Ok(ChallengeDecision::Present),
    }
}
