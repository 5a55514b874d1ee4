//! Identity providers for the one-time passcode sign-in flow.
//!
//! [`IdentityProvider`] is the seam between the flow logic and whatever
//! backs the user directory. [`RemoteProvider`] speaks the managed
//! user-pool wire protocol; [`LocalProvider`] runs the same custom
//! challenge flow in process against the local user table.

pub(crate) mod config;

mod errors;
mod local;
mod provider;
mod remote;
mod types;

pub use errors::IdentityError;
pub use local::LocalProvider;
pub use provider::IdentityProvider;
pub use remote::RemoteProvider;
pub use types::{AnswerOutcome, AuthTokens, InitiateOutcome, SignInSession, UserAttributes};

pub(crate) use config::IDENTITY_PROVIDER;
