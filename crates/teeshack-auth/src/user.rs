//! User types.

use serde::{Deserialize, Serialize};
use teeshack_commerce::ids::UserId;

const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

/// The signed-in shopper as the UI sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    /// Display name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserProfile {
    /// Profile with the generated avatar for `name`.
    pub fn new(id: UserId, email: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            avatar: Some(avatar_url(&name)),
            id,
            email: email.into(),
            name,
        }
    }
}

/// An account in the mock directory. Passwords are kept in plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Account {
    pub fn new(
        id: impl Into<UserId>,
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile::new(self.id.clone(), self.email.clone(), self.name.clone())
    }
}

/// Avatar image URL seeded by display name.
pub fn avatar_url(name: &str) -> String {
    let seed: String = name
        .chars()
        .map(|c| if c == ' ' { "%20".to_string() } else { c.to_string() })
        .collect();
    format!("{}{}", AVATAR_BASE_URL, seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_account() {
        let account = Account::new("1", "demo@teeshack.com", "123456", "Usuario Demo");
        let profile = account.profile();

        assert_eq!(profile.id, UserId::new("1"));
        assert_eq!(profile.name, "Usuario Demo");
        assert_eq!(
            profile.avatar.as_deref(),
            Some("https://api.dicebear.com/7.x/avataaars/svg?seed=Usuario%20Demo")
        );
    }

    #[test]
    fn test_profile_json_layout() {
        let profile = UserProfile {
            id: UserId::new("2"),
            email: "admin@teeshack.com".to_string(),
            name: "Administrador".to_string(),
            avatar: None,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "2", "email": "admin@teeshack.com", "name": "Administrador"})
        );
    }
}
