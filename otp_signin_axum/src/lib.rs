//! Axum integration for the otp-signin passwordless sign-in library.
//!
//! Provides a mountable router with the sign-in page and endpoints, an
//! [`AuthUser`] extractor for protected handlers and the error-to-status
//! mapping glue.

mod config;
mod error;
mod router;
mod session;
mod signin;
mod user;

pub use config::{OTP_REDIRECT_ANON, OTP_REDIRECT_USER, OTP_SIGNIN_URL};
pub use router::{otp_signin_router, otp_signin_router_no_trace};
pub use session::{AuthRedirect, AuthUser};

// Re-export the route prefix and initialization function from otp_signin
pub use otp_signin::{OTP_ROUTE_PREFIX, init};
