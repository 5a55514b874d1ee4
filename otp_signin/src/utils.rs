use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use http::header::{HeaderMap, SET_COOKIE};
use ring::rand::SecureRandom;
use thiserror::Error;

/// Errors from shared utility operations
#[derive(Debug, Error)]
pub enum UtilError {
    /// Error in cryptographic operations (e.g., random generation)
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Error with improperly formatted data
    #[error("Invalid format: {0}")]
    Format(String),

    /// Error building a cookie header
    #[error("Cookie error: {0}")]
    Cookie(String),
}

pub(crate) fn base64url_encode(input: Vec<u8>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Generate a base64url-encoded random string from `len` random bytes.
///
/// Used for session identifiers, pending sign-in identifiers and throwaway
/// passwords during just-in-time registration.
pub fn gen_random_string(len: usize) -> Result<String, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random string".to_string()))?;
    Ok(base64url_encode(bytes))
}

/// Generate a numeric one-time passcode of `digits` decimal digits.
///
/// The first digit is never zero so the code keeps its length when read
/// back as a number by a human or an SMS gateway.
pub fn gen_passcode(digits: usize) -> Result<String, UtilError> {
    if digits == 0 {
        return Err(UtilError::Format(
            "Passcode length must be at least one digit".to_string(),
        ));
    }
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; digits];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate passcode".to_string()))?;

    let mut code = String::with_capacity(digits);
    for (i, b) in bytes.iter().enumerate() {
        let d = if i == 0 {
            1 + (*b as u32 % 9) // 1..=9
        } else {
            *b as u32 % 10
        };
        code.push(char::from_digit(d, 10).unwrap_or('0'));
    }
    Ok(code)
}

pub(crate) fn header_set_cookie(
    headers: &mut HeaderMap,
    name: String,
    value: String,
    _expires_at: DateTime<Utc>,
    max_age: i64,
) -> Result<&HeaderMap, UtilError> {
    let cookie =
        format!("{name}={value}; SameSite=Lax; Secure; HttpOnly; Path=/; Max-Age={max_age}");
    headers.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| UtilError::Cookie("Failed to parse cookie".to_string()))?,
    );
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_random_string_length_and_uniqueness() {
        // Given two generated strings of the same byte length
        let s1 = gen_random_string(32).expect("Failed to generate random string");
        let s2 = gen_random_string(32).expect("Failed to generate random string");

        // Then they should be base64url of 32 bytes (43 chars, no padding)
        assert_eq!(s1.len(), 43);
        assert_eq!(s2.len(), 43);

        // And they should not collide
        assert_ne!(s1, s2);
    }

    #[test]
    fn test_gen_passcode_six_digits() {
        // When generating the default six digit passcode
        let code = gen_passcode(6).expect("Failed to generate passcode");

        // Then it should be exactly six decimal digits
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        // And the first digit should never be zero
        assert_ne!(code.chars().next(), Some('0'));
    }

    #[test]
    fn test_gen_passcode_zero_length_rejected() {
        let result = gen_passcode(0);
        assert!(matches!(result, Err(UtilError::Format(_))));
    }

    #[test]
    fn test_header_set_cookie_format() {
        // Given an empty header map
        let mut headers = HeaderMap::new();

        // When setting a session cookie
        header_set_cookie(
            &mut headers,
            "TestCookie".to_string(),
            "abc123".to_string(),
            Utc::now(),
            600,
        )
        .expect("Failed to set cookie");

        // Then the Set-Cookie header should carry the security attributes
        let cookie = headers
            .get(SET_COOKIE)
            .expect("No Set-Cookie header")
            .to_str()
            .expect("Invalid header value");
        assert!(cookie.starts_with("TestCookie=abc123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=600"));
    }
}
