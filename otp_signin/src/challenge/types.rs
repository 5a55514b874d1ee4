use serde::{Deserialize, Serialize};

/// One completed challenge round, recorded in the sign-in transcript.
///
/// The transcript plays the role of the session history the user-pool
/// service passes between its challenge triggers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub(crate) struct ChallengeAttempt {
    /// `CODE-{passcode}` marker so a retry reuses the outstanding code
    pub(crate) metadata: Option<String>,
    /// Whether the answer given in this round was correct
    pub(crate) passed: bool,
}

/// What the next step of the sign-in attempt should be
#[derive(Debug, PartialEq)]
pub(crate) enum ChallengeDecision {
    /// Present (or re-present) the custom challenge
    Present,
    /// The last answer was correct, issue tokens
    IssueTokens,
}

/// A prepared challenge round
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChallengeMaterial {
    /// The expected answer
    pub(crate) passcode: String,
    /// Transcript marker carrying the passcode for later rounds
    pub(crate) metadata: String,
    /// True when the passcode was newly generated and must be delivered
    pub(crate) fresh: bool,
}
