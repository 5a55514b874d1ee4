//! HTTP client for the managed user-pool service.
//!
//! The service speaks JSON over POST to a single regional endpoint; the
//! operation is selected with an `X-Amz-Target` header and the body is
//! `application/x-amz-json-1.1`. Sign-in uses the `CUSTOM_AUTH` flow and
//! the `CUSTOM_CHALLENGE` response type.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::collections::HashMap;

use async_trait::async_trait;

use super::config::{AUTH_CLIENT_ID, AUTH_CLIENT_SECRET, AUTH_ENDPOINT_URL};
use super::errors::IdentityError;
use super::provider::IdentityProvider;
use super::types::{AnswerOutcome, AuthTokens, InitiateOutcome, SignInSession, UserAttributes};

const TARGET_INITIATE_AUTH: &str = "AWSCognitoIdentityProviderService.InitiateAuth";
const TARGET_RESPOND_TO_CHALLENGE: &str =
    "AWSCognitoIdentityProviderService.RespondToAuthChallenge";
const TARGET_SIGN_UP: &str = "AWSCognitoIdentityProviderService.SignUp";

const AMZ_JSON: &str = "application/x-amz-json-1.1";
const CUSTOM_CHALLENGE: &str = "CUSTOM_CHALLENGE";

/// Identity provider backed by the managed user-pool HTTP API
pub struct RemoteProvider {
    client: reqwest::Client,
}

impl RemoteProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
        }
    }

    async fn post<B: Serialize>(
        &self,
        target: &str,
        body: &B,
    ) -> Result<serde_json::Value, IdentityError> {
        let response = self
            .client
            .post(AUTH_ENDPOINT_URL.as_str())
            .header("X-Amz-Target", target)
            .header(http::header::CONTENT_TYPE, AMZ_JSON)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let response_body = response.text().await?;

        if status.is_success() {
            tracing::debug!("{} succeeded", target);
            return Ok(serde_json::from_str(&response_body)?);
        }

        let service_error: ServiceErrorBody =
            serde_json::from_str(&response_body).unwrap_or_else(|_| ServiceErrorBody {
                error_type: format!("Http{}", status.as_u16()),
                message: response_body.clone(),
            });
        tracing::debug!(
            "{} failed: {} ({})",
            target,
            service_error.error_type,
            service_error.message
        );
        Err(map_service_error(service_error))
    }
}

impl Default for RemoteProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for RemoteProvider {
    async fn initiate_sign_in(&self, identifier: &str) -> Result<InitiateOutcome, IdentityError> {
        let mut auth_parameters = HashMap::new();
        auth_parameters.insert("USERNAME".to_string(), identifier.to_string());
        if let Some(hash) = secret_hash(identifier) {
            auth_parameters.insert("SECRET_HASH".to_string(), hash);
        }

        let request = InitiateAuthRequest {
            auth_flow: "CUSTOM_AUTH",
            client_id: AUTH_CLIENT_ID.as_str(),
            auth_parameters,
        };

        let value = self.post(TARGET_INITIATE_AUTH, &request).await?;
        let response: ChallengeResponseBody = serde_json::from_value(value)?;
        challenge_outcome(identifier, response)
    }

    async fn answer_challenge(
        &self,
        session: SignInSession,
        code: &str,
    ) -> Result<AnswerOutcome, IdentityError> {
        let mut challenge_responses = HashMap::new();
        challenge_responses.insert("USERNAME".to_string(), session.username.clone());
        challenge_responses.insert("ANSWER".to_string(), code.to_string());
        if let Some(hash) = secret_hash(&session.username) {
            challenge_responses.insert("SECRET_HASH".to_string(), hash);
        }

        let request = RespondToChallengeRequest {
            challenge_name: CUSTOM_CHALLENGE,
            client_id: AUTH_CLIENT_ID.as_str(),
            session: &session.session_token,
            challenge_responses,
        };

        let value = self.post(TARGET_RESPOND_TO_CHALLENGE, &request).await?;
        let response: ChallengeResponseBody = serde_json::from_value(value)?;

        match challenge_outcome(&session.username, response)? {
            InitiateOutcome::SignedIn(tokens) => Ok(AnswerOutcome::SignedIn(tokens)),
            InitiateOutcome::Challenge(next) => Ok(AnswerOutcome::Retry(next)),
        }
    }

    async fn register(
        &self,
        identifier: &str,
        password: &str,
        attributes: UserAttributes,
    ) -> Result<(), IdentityError> {
        let mut user_attributes = Vec::new();
        if let Some(email) = &attributes.email {
            user_attributes.push(AttributeEntry {
                name: "email",
                value: email.clone(),
            });
        }
        if let Some(phone) = &attributes.phone_number {
            user_attributes.push(AttributeEntry {
                name: "phone_number",
                value: phone.clone(),
            });
        }

        let request = SignUpRequest {
            client_id: AUTH_CLIENT_ID.as_str(),
            username: identifier,
            password,
            secret_hash: secret_hash(identifier),
            user_attributes,
        };

        self.post(TARGET_SIGN_UP, &request).await?;
        Ok(())
    }
}

/// SECRET_HASH = base64(HMAC-SHA256(client secret, username + client id)),
/// required when the app client has a secret configured
fn secret_hash(username: &str) -> Option<String> {
    let secret = AUTH_CLIENT_SECRET.as_ref()?;
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(username.as_bytes());
    mac.update(AUTH_CLIENT_ID.as_bytes());
    Some(STANDARD.encode(mac.finalize().into_bytes()))
}

fn challenge_outcome(
    username: &str,
    response: ChallengeResponseBody,
) -> Result<InitiateOutcome, IdentityError> {
    if let Some(result) = response.authentication_result {
        return Ok(InitiateOutcome::SignedIn(AuthTokens {
            access_token: result.access_token,
            id_token: result.id_token,
            token_type: result.token_type,
            expires_in: result.expires_in,
        }));
    }

    match response.challenge_name.as_deref() {
        Some(CUSTOM_CHALLENGE) => {
            let session_token = response.session.ok_or_else(|| {
                IdentityError::Serde("Challenge response without session token".to_string())
            })?;
            let destination = response
                .challenge_parameters
                .as_ref()
                .and_then(|p| p.get("phone").or_else(|| p.get("email")))
                .cloned();
            Ok(InitiateOutcome::Challenge(SignInSession::new(
                session_token,
                username.to_string(),
                destination,
            )))
        }
        Some(other) => Err(IdentityError::Service {
            code: "UnexpectedChallenge".to_string(),
            message: other.to_string(),
        }),
        None => Err(IdentityError::Serde(
            "Response carried neither tokens nor a challenge".to_string(),
        )),
    }
}

/// Exhaustive mapping of service `__type` codes onto the closed taxonomy
fn map_service_error(body: ServiceErrorBody) -> IdentityError {
    let code = body
        .error_type
        .rsplit('#')
        .next()
        .unwrap_or(body.error_type.as_str());
    match code {
        "UserNotFoundException" => IdentityError::UserNotFound,
        "UsernameExistsException" => IdentityError::UserExists,
        "CodeMismatchException" => IdentityError::CodeMismatch,
        "ExpiredCodeException" => IdentityError::SessionExpired,
        "NotAuthorizedException" => IdentityError::NotAuthorized(body.message),
        "TooManyRequestsException" | "LimitExceededException" => IdentityError::TooManyRequests,
        "InvalidParameterException" => IdentityError::InvalidParameter(body.message),
        _ => IdentityError::Service {
            code: code.to_string(),
            message: body.message,
        },
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthRequest<'a> {
    auth_flow: &'a str,
    client_id: &'a str,
    auth_parameters: HashMap<String, String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct RespondToChallengeRequest<'a> {
    challenge_name: &'a str,
    client_id: &'a str,
    session: &'a str,
    challenge_responses: HashMap<String, String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpRequest<'a> {
    client_id: &'a str,
    username: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_hash: Option<String>,
    user_attributes: Vec<AttributeEntry<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AttributeEntry<'a> {
    name: &'a str,
    value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ChallengeResponseBody {
    challenge_name: Option<String>,
    session: Option<String>,
    challenge_parameters: Option<HashMap<String, String>>,
    authentication_result: Option<AuthenticationResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    access_token: String,
    id_token: String,
    token_type: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct ServiceErrorBody {
    #[serde(rename = "__type")]
    error_type: String,
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// A pending-challenge response body parses into a Challenge outcome
    /// with the session token and the published destination
    #[test]
    fn test_challenge_response_deserialization() {
        let body = json!({
            "ChallengeName": "CUSTOM_CHALLENGE",
            "Session": "session-token-1",
            "ChallengeParameters": {"phone": "+*******4567"}
        });

        let response: ChallengeResponseBody =
            serde_json::from_value(body).expect("Failed to deserialize");
        let outcome =
            challenge_outcome("user@example.com", response).expect("Failed to build outcome");

        match outcome {
            InitiateOutcome::Challenge(session) => {
                assert_eq!(session.username(), "user@example.com");
                assert_eq!(session.destination(), Some("+*******4567"));
            }
            other => panic!("Expected Challenge outcome, got {other:?}"),
        }
    }

    /// A response with an authentication result resolves straight to tokens
    #[test]
    fn test_signed_in_response_deserialization() {
        let body = json!({
            "AuthenticationResult": {
                "AccessToken": "at",
                "IdToken": "it",
                "TokenType": "Bearer",
                "ExpiresIn": 3600
            }
        });

        let response: ChallengeResponseBody =
            serde_json::from_value(body).expect("Failed to deserialize");
        let outcome =
            challenge_outcome("user@example.com", response).expect("Failed to build outcome");

        match outcome {
            InitiateOutcome::SignedIn(tokens) => {
                assert_eq!(tokens.access_token, "at");
                assert_eq!(tokens.expires_in, 3600);
            }
            other => panic!("Expected SignedIn outcome, got {other:?}"),
        }
    }

    /// An unexpected challenge name is surfaced as a Service error rather
    /// than silently treated as the custom challenge
    #[test]
    fn test_unexpected_challenge_name() {
        let body = json!({
            "ChallengeName": "SMS_MFA",
            "Session": "session-token-2"
        });

        let response: ChallengeResponseBody =
            serde_json::from_value(body).expect("Failed to deserialize");
        let result = challenge_outcome("user@example.com", response);

        match result {
            Err(IdentityError::Service { code, message }) => {
                assert_eq!(code, "UnexpectedChallenge");
                assert_eq!(message, "SMS_MFA");
            }
            other => panic!("Expected Service error, got {other:?}"),
        }
    }

    /// Service error codes map onto the closed taxonomy, including the
    /// namespaced `prefix#Code` form
    #[test]
    fn test_service_error_mapping() {
        let cases = [
            ("UserNotFoundException", "User not found"),
            ("UsernameExistsException", "User already exists"),
            ("CodeMismatchException", "Code mismatch"),
            ("ExpiredCodeException", "Session expired"),
            ("TooManyRequestsException", "Too many requests"),
        ];
        for (code, display) in cases {
            let mapped = map_service_error(ServiceErrorBody {
                error_type: code.to_string(),
                message: String::new(),
            });
            assert_eq!(mapped.to_string(), display, "code {code}");
        }

        let namespaced = map_service_error(ServiceErrorBody {
            error_type: "com.amazonaws.service#UserNotFoundException".to_string(),
            message: String::new(),
        });
        assert!(matches!(namespaced, IdentityError::UserNotFound));

        let unknown = map_service_error(ServiceErrorBody {
            error_type: "InternalErrorException".to_string(),
            message: "boom".to_string(),
        });
        match unknown {
            IdentityError::Service { code, message } => {
                assert_eq!(code, "InternalErrorException");
                assert_eq!(message, "boom");
            }
            other => panic!("Expected Service variant, got {other:?}"),
        }
    }

    /// Request bodies serialize with the service's PascalCase field names
    #[test]
    fn test_initiate_request_serialization() {
        let mut auth_parameters = HashMap::new();
        auth_parameters.insert("USERNAME".to_string(), "user@example.com".to_string());

        let request = InitiateAuthRequest {
            auth_flow: "CUSTOM_AUTH",
            client_id: "client123",
            auth_parameters,
        };

        let value = serde_json::to_value(&request).expect("Failed to serialize");
        assert_eq!(value["AuthFlow"], "CUSTOM_AUTH");
        assert_eq!(value["ClientId"], "client123");
        assert_eq!(value["AuthParameters"]["USERNAME"], "user@example.com");
    }

    #[test]
    fn test_sign_up_request_skips_missing_secret_hash() {
        let request = SignUpRequest {
            client_id: "client123",
            username: "user@example.com",
            password: "throwaway",
            secret_hash: None,
            user_attributes: vec![AttributeEntry {
                name: "email",
                value: "user@example.com".to_string(),
            }],
        };

        let value = serde_json::to_value(&request).expect("Failed to serialize");
        assert!(value.get("SecretHash").is_none());
        assert_eq!(value["UserAttributes"][0]["Name"], "email");
    }
}
