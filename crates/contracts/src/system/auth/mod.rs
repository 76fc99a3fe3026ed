use serde::{Deserialize, Serialize};

use super::prefs::ThemePrefs;
use crate::enums::user_profile::UserProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
    pub prefs: ThemePrefs,
}

/// Ответ `GET /me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: UserInfo,
    pub prefs: ThemePrefs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub nombre_completo: String,
    pub email: String,
    #[serde(default)]
    pub profile: UserProfile,
}

impl UserInfo {
    /// Инициалы для аватара в шапке
    pub fn initials(&self) -> String {
        let from_name: String = self
            .nombre_completo
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(|c| c.to_uppercase())
            .collect();
        if !from_name.is_empty() {
            return from_name;
        }
        self.email
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }

    /// Имя для приветствия: ФИО или email
    pub fn display_name(&self) -> &str {
        if self.nombre_completo.trim().is_empty() {
            &self.email
        } else {
            &self.nombre_completo
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user_id
    pub email: String,
    pub profile: UserProfile,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str) -> UserInfo {
        UserInfo {
            id: "1".into(),
            nombre_completo: name.into(),
            email: email.into(),
            profile: UserProfile::Seller,
        }
    }

    #[test]
    fn initials_from_name_or_email() {
        assert_eq!(user("maría pérez gómez", "m@x.co").initials(), "MP");
        assert_eq!(user("  ", "luis@x.co").initials(), "L");
        assert_eq!(user("", "").initials(), "?");
    }

    #[test]
    fn missing_profile_defaults_to_viewer() {
        let u: UserInfo =
            serde_json::from_str(r#"{"id":"a","nombre_completo":"Ana","email":"a@b.co"}"#)
                .unwrap();
        assert_eq!(u.profile, UserProfile::Viewer);
        assert_eq!(u.display_name(), "Ana");
    }
}
