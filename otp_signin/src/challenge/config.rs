use std::{env, sync::LazyLock};

/// Number of digits in a generated passcode
pub(crate) static OTP_CODE_LENGTH: LazyLock<usize> = LazyLock::new(|| {
    env::var("OTP_CODE_LENGTH")
        .map(|v| v.parse::<usize>().unwrap_or(6))
        .unwrap_or(6)
});

/// Wrong answers allowed before the sign-in attempt is failed outright
pub(crate) static OTP_MAX_ATTEMPTS: LazyLock<usize> = LazyLock::new(|| {
    env::var("OTP_MAX_ATTEMPTS")
        .map(|v| v.parse::<usize>().unwrap_or(3))
        .unwrap_or(3)
});

/// Seconds a pending challenge stays answerable
pub(crate) static OTP_CHALLENGE_TIMEOUT: LazyLock<usize> = LazyLock::new(|| {
    env::var("OTP_CHALLENGE_TIMEOUT")
        .map(|v| v.parse::<usize>().unwrap_or(300))
        .unwrap_or(300)
});
