//! User identity types shared by the auth flow and the application shell.

use serde::{Deserialize, Serialize};

/// Role a user selected at sign-up, stored by the identity provider
/// as a custom profile attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Guest,
    Provider,
    Hotel,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Guest
    }
}

impl UserRole {
    /// Parse the provider's attribute value. Unknown or missing values
    /// fall back to `Guest` rather than failing the whole session.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("PROVIDER") => UserRole::Provider,
            Some("HOTEL") => UserRole::Hotel,
            _ => UserRole::Guest,
        }
    }

    pub fn as_attribute(&self) -> &'static str {
        match self {
            UserRole::Guest => "GUEST",
            UserRole::Provider => "PROVIDER",
            UserRole::Hotel => "HOTEL",
        }
    }
}

/// Profile of the signed-in user, assembled from provider attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Local preview reference only; never persisted to the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserProfile {
    pub fn new(email: impl Into<String>, display_name: impl Into<String>, role: UserRole) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            role,
            bio: None,
            avatar: None,
        }
    }

    /// Profile completeness is derived from the presence of a bio.
    pub fn is_profile_complete(&self) -> bool {
        self.bio.is_some()
    }
}

/// Session state owned by the application shell.
///
/// Authentication is encoded by the presence of a user profile, so an
/// unauthenticated session can never carry a stale user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl AuthSession {
    pub fn signed_in(user: UserProfile) -> Self {
        Self { user: Some(user) }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_profile_complete(&self) -> bool {
        self.user
            .as_ref()
            .map(UserProfile::is_profile_complete)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_attribute_round_trip() {
        assert_eq!(
            UserRole::from_attribute(Some(UserRole::Hotel.as_attribute())),
            UserRole::Hotel
        );
    }

    #[test]
    fn test_unknown_role_defaults_to_guest() {
        assert_eq!(UserRole::from_attribute(Some("ADMIN")), UserRole::Guest);
        assert_eq!(UserRole::from_attribute(None), UserRole::Guest);
    }

    #[test]
    fn test_role_serializes_screaming_snake() {
        let json = serde_json::to_string(&UserRole::Provider).unwrap();
        assert_eq!(json, "\"PROVIDER\"");
    }

    #[test]
    fn test_signed_out_session_has_no_user() {
        let session = AuthSession::signed_out();
        assert!(!session.is_authenticated());
        assert!(session.user.is_none());
        assert!(!session.is_profile_complete());
    }

    #[test]
    fn test_profile_complete_requires_bio() {
        let mut user = UserProfile::new("a@b.com", "Jane", UserRole::Guest);
        assert!(!user.is_profile_complete());
        user.bio = Some("Avid traveller".to_string());
        assert!(AuthSession::signed_in(user).is_profile_complete());
    }
}
