use std::{env, sync::LazyLock};

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "__Host-OtpSignInId".to_string())
});

/// Session lifetime in seconds
pub(crate) static SESSION_COOKIE_MAX_AGE: LazyLock<u64> = LazyLock::new(|| {
    env::var("SESSION_COOKIE_MAX_AGE")
        .map(|v| v.parse::<u64>().unwrap_or(600))
        .unwrap_or(600)
});
