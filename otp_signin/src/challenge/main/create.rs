use super::super::config::OTP_CODE_LENGTH;
use super::super::errors::ChallengeError;
use super::super::types::{ChallengeAttempt, ChallengeMaterial};
use crate::utils::gen_passcode;

/// Prepare the challenge for the next round.
///
/// The first round generates a fresh passcode. Later rounds recover the
/// outstanding passcode from the previous round's `CODE-{passcode}`
/// metadata so a retry does not race a second delivery.
pub(crate) fn create_auth_challenge(
    transcript: &[ChallengeAttempt],
) -> Result<ChallengeMaterial, ChallengeError> {
    match transcript.last() {
        None => {
            let passcode = gen_passcode(*OTP_CODE_LENGTH)?;
            let metadata = format!("CODE-{passcode}");
            tracing::debug!("Generated a fresh passcode for a new sign-in attempt");
            Ok(ChallengeMaterial {
                passcode,
                metadata,
                fresh: true,
            })
        }
        Some(previous) => {
            let metadata = previous.metadata.as_deref().ok_or_else(|| {
                ChallengeError::Metadata("Previous round has no metadata".to_string())
            })?;
            let passcode = metadata
                .strip_prefix("CODE-")
                .ok_or_else(|| {
                    ChallengeError::Metadata(format!("Unrecognized metadata: {metadata}"))
                })?
                .to_string();
            Ok(ChallengeMaterial {
                passcode,
                metadata: metadata.to_string(),
                fresh: false,
            })
        }
    }
}
