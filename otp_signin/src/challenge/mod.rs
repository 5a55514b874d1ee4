//! Custom challenge engine for one-time passcode sign-in.
//!
//! Three small pure functions mirror the define/create/verify trigger trio
//! of a managed user pool's custom auth flow, driven off a transcript of
//! completed rounds instead of a service-managed session.

mod config;
mod errors;
mod main;
mod types;

pub use errors::ChallengeError;

pub(crate) use config::{OTP_CHALLENGE_TIMEOUT, OTP_MAX_ATTEMPTS};
pub(crate) use main::{create_auth_challenge, define_auth_challenge, verify_auth_challenge};
pub(crate) use types::{ChallengeAttempt, ChallengeDecision};
