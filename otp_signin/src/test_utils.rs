//! Shared test initialization.
//!
//! Tests run against the in-memory cache, the local identity provider and
//! a throwaway SQLite file. The file-backed database matters: a
//! `sqlite::memory:` pool hands every connection its own database, so
//! table creation and later queries would not see each other.

use std::sync::Once;

/// Centralized test initialization for all tests across the crate.
///
/// Sets the test environment variables once, removes any database file
/// left over from a previous run, then initializes the stores.
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        let db_path = std::env::temp_dir().join("otp_signin_test.db");
        let _ = std::fs::remove_file(&db_path);

        // Defaults for variables .env_test does not set. Must happen
        // before any LazyLock config static is touched.
        set_default("AUTH_REGION", "us-east-1");
        set_default("AUTH_USER_POOL_ID", "us-east-1_testpool");
        set_default("AUTH_CLIENT_ID", "test-client-id");
        set_default("AUTH_CLIENT_SECRET", "test-client-secret");
        set_default("IDENTITY_PROVIDER_TYPE", "local");
        set_default("OTP_SENDER_TYPE", "tracing");
        set_default("GENERIC_CACHE_STORE_TYPE", "memory");
        set_default("GENERIC_CACHE_STORE_URL", "memory://");
        set_default("GENERIC_DATA_STORE_TYPE", "sqlite");
        set_default(
            "GENERIC_DATA_STORE_URL",
            &format!("sqlite://{}", db_path.display()),
        );
    });

    ensure_stores_initialized().await;
}

fn set_default(key: &str, value: &str) {
    if std::env::var(key).is_err() {
        unsafe { std::env::set_var(key, value) };
    }
}

async fn ensure_stores_initialized() {
    use crate::userdb::UserStore;

    if let Err(e) = crate::storage::init().await {
        eprintln!("Warning: Failed to initialize storage: {e}");
    }
    if let Err(e) = UserStore::init().await {
        eprintln!("Warning: Failed to initialize UserStore: {e}");
    }
}
