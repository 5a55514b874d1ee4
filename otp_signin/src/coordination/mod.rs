//! Sign-in coordination module
//!
//! High-level functions behind the HTTP endpoints: starting a sign-in
//! attempt, verifying the submitted code and logging out. They tie the
//! flow logic to the cache, the user table and the cookie session.

mod errors;
mod signin;

pub use errors::CoordinationError;
pub use signin::{
    StartSignInResponse, VerifySignInResponse, handle_logout_core, handle_start_signin_core,
    handle_verify_code_core,
};
