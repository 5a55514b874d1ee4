//! Central configuration for the otp_signin_axum crate

use std::sync::LazyLock;

use otp_signin::OTP_ROUTE_PREFIX;

/// URL of the sign-in page
/// Default: "/otp/signin"
pub static OTP_SIGNIN_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("OTP_SIGNIN_URL").unwrap_or_else(|_| format!("{}/signin", *OTP_ROUTE_PREFIX))
});

/// Where anonymous users are redirected when a page requires a session
pub static OTP_REDIRECT_ANON: LazyLock<String> =
    LazyLock::new(|| std::env::var("OTP_REDIRECT_ANON").unwrap_or_else(|_| "/".to_string()));

/// Where signed-in users are redirected from the sign-in page
pub static OTP_REDIRECT_USER: LazyLock<String> =
    LazyLock::new(|| std::env::var("OTP_REDIRECT_USER").unwrap_or_else(|_| "/".to_string()));
