use std::{
    env,
    sync::{Arc, LazyLock},
};

use super::local::LocalProvider;
use super::provider::IdentityProvider;
use super::remote::RemoteProvider;

/// Region of the managed user pool
pub(crate) static AUTH_REGION: LazyLock<String> =
    LazyLock::new(|| env::var("AUTH_REGION").expect("AUTH_REGION must be set"));

/// User-pool directory identifier
pub(crate) static AUTH_USER_POOL_ID: LazyLock<String> =
    LazyLock::new(|| env::var("AUTH_USER_POOL_ID").expect("AUTH_USER_POOL_ID must be set"));

/// App client identifier registered with the user pool
pub(crate) static AUTH_CLIENT_ID: LazyLock<String> =
    LazyLock::new(|| env::var("AUTH_CLIENT_ID").expect("AUTH_CLIENT_ID must be set"));

/// Optional app client secret; enables the SECRET_HASH request parameter
/// and signs locally issued tokens
pub(crate) static AUTH_CLIENT_SECRET: LazyLock<Option<String>> =
    LazyLock::new(|| env::var("AUTH_CLIENT_SECRET").ok());

/// Endpoint override, mainly for tests against a stub server. Defaults to
/// the regional identity-provider endpoint.
pub(crate) static AUTH_ENDPOINT_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("AUTH_ENDPOINT_URL")
        .unwrap_or_else(|_| format!("https://cognito-idp.{}.amazonaws.com/", AUTH_REGION.as_str()))
});

static IDENTITY_PROVIDER_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("IDENTITY_PROVIDER_TYPE").unwrap_or_else(|_| "remote".to_string())
});

/// Process-wide identity provider, selected by IDENTITY_PROVIDER_TYPE
pub(crate) static IDENTITY_PROVIDER: LazyLock<Arc<dyn IdentityProvider>> = LazyLock::new(|| {
    tracing::info!("Using identity provider: {}", *IDENTITY_PROVIDER_TYPE);
    match IDENTITY_PROVIDER_TYPE.as_str() {
        "remote" => Arc::new(RemoteProvider::new()),
        "local" => Arc::new(LocalProvider::new()),
        t => panic!("Unsupported identity provider type: {t}"),
    }
});
