//! Local issuance and verification of sign-in tokens.
//!
//! Used by the in-process identity provider. HS256 with the configured
//! client secret, or an ephemeral per-process key when no secret is set.

use std::sync::LazyLock;

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::config::{
    AUTH_CLIENT_ID, AUTH_CLIENT_SECRET, AUTH_ENDPOINT_URL, AUTH_USER_POOL_ID,
};
use crate::utils::gen_random_string;

/// Seconds an issued token stays valid
static OTP_TOKEN_TTL: LazyLock<i64> = LazyLock::new(|| {
    std::env::var("OTP_TOKEN_TTL")
        .map(|v| v.parse::<i64>().unwrap_or(3600))
        .unwrap_or(3600)
});

static SIGNING_KEY: LazyLock<Vec<u8>> = LazyLock::new(|| match AUTH_CLIENT_SECRET.as_ref() {
    Some(secret) => secret.as_bytes().to_vec(),
    None => gen_random_string(32)
        .expect("Failed to generate an ephemeral signing key")
        .into_bytes(),
});

static ISSUER: LazyLock<String> =
    LazyLock::new(|| format!("{}{}", *AUTH_ENDPOINT_URL, *AUTH_USER_POOL_ID));

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token encoding error: {0}")]
    Encode(String),

    #[error("Invalid token: {0}")]
    Invalid(String),
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    /// Subject, the user id
    pub sub: String,
    pub iss: String,
    pub aud: String,
    /// "access" or "id"
    pub token_use: String,
    pub iat: i64,
    pub exp: i64,
}

fn issue_token(user_id: &str, token_use: &str, ttl: i64) -> Result<String, TokenError> {
    let now = Utc::now().timestamp();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        iss: ISSUER.clone(),
        aud: AUTH_CLIENT_ID.clone(),
        token_use: token_use.to_string(),
        iat: now,
        exp: now + ttl,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&SIGNING_KEY),
    )
    .map_err(|e| TokenError::Encode(e.to_string()))
}

/// Issue the access/id token pair handed out on successful sign-in
pub(crate) fn issue_token_pair(user_id: &str) -> Result<(String, String, i64), TokenError> {
    let ttl = *OTP_TOKEN_TTL;
    let access = issue_token(user_id, "access", ttl)?;
    let id = issue_token(user_id, "id", ttl)?;
    Ok((access, id, ttl))
}

/// Verify a locally issued token and return its claims
pub fn verify_token(token: &str) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[AUTH_CLIENT_ID.as_str()]);
    validation.set_issuer(&[ISSUER.as_str()]);

    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(&SIGNING_KEY),
        &validation,
    )
    .map_err(|e| TokenError::Invalid(e.to_string()))?;
    Ok(data.claims)
}
