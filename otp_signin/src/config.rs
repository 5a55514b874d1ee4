//! Central configuration for the otp_signin crate

use std::sync::LazyLock;

/// Route prefix for all otp_signin endpoints
///
/// This is the main prefix under which all sign-in endpoints will be mounted.
/// Default: "/otp"
pub static OTP_ROUTE_PREFIX: LazyLock<String> =
    LazyLock::new(|| std::env::var("OTP_ROUTE_PREFIX").unwrap_or_else(|_| "/otp".to_string()));
