//! Cookie-backed sessions for users who completed the sign-in flow.

mod config;
mod errors;
mod main;
mod types;

pub use config::SESSION_COOKIE_NAME;
pub use errors::SessionError;
pub use main::{get_user_from_headers, get_user_from_session, prepare_logout_response};
pub use types::User as SessionUser;

pub(crate) use main::new_session_header;
