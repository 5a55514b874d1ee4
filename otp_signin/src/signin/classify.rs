use std::sync::LazyLock;

use regex::Regex;

use crate::identity::UserAttributes;

/// E.164 phone number shape, optional leading plus
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[1-9]\d{1,14}$").expect("Invalid phone number pattern")
});

/// What kind of contact point a sign-in identifier looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Email,
    Phone,
    Other,
}

/// Classify a sign-in identifier. Anything containing `@` is treated as
/// an email address, an E.164 shape as a phone number.
pub fn classify_identifier(identifier: &str) -> IdentifierKind {
    if identifier.contains('@') {
        IdentifierKind::Email
    } else if PHONE_PATTERN.is_match(identifier) {
        IdentifierKind::Phone
    } else {
        IdentifierKind::Other
    }
}

/// Account attributes to record for a just-in-time registration
pub(crate) fn attributes_for(identifier: &str) -> UserAttributes {
    match classify_identifier(identifier) {
        IdentifierKind::Email => UserAttributes {
            email: Some(identifier.to_string()),
            phone_number: None,
        },
        IdentifierKind::Phone => UserAttributes {
            email: None,
            phone_number: Some(identifier.to_string()),
        },
        IdentifierKind::Other => UserAttributes::default(),
    }
}
