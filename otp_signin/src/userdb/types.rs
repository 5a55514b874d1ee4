use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::identity::UserAttributes;

/// A user registered in the local user pool
///
/// Users are created either explicitly via the provider's `register`
/// operation or just-in-time when an unknown identifier starts a sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// The sign-in principal: an email address or phone number
    pub identifier: String,
    /// Email attribute, when the identifier classified as an email
    pub email: Option<String>,
    /// Phone attribute, when the identifier classified as a phone number
    pub phone_number: Option<String>,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// When the user account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user from a sign-in identifier and its classified attributes
    pub fn new(id: String, identifier: String, attributes: UserAttributes) -> Self {
        let now = Utc::now();
        Self {
            id,
            identifier,
            email: attributes.email,
            phone_number: attributes.phone_number,
            created_at: now,
            updated_at: now,
        }
    }

    /// The destination a one-time code should be delivered to.
    ///
    /// Prefers the phone attribute (codes go out as SMS first), falling
    /// back to email, then to the raw identifier.
    pub fn code_destination(&self) -> &str {
        self.phone_number
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.identifier)
    }
}
