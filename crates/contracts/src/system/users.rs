use serde::{Deserialize, Serialize};

use crate::enums::user_profile::UserProfile;
use crate::shared::text::fold;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub nombre_completo: String,
    pub email: String,
    pub profile: UserProfile,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
}

impl User {
    /// Поиск по ФИО, email или профилю (без учёта регистра и диакритики)
    pub fn matches(&self, query: &str) -> bool {
        let q = fold(query.trim());
        if q.is_empty() {
            return true;
        }
        fold(&self.nombre_completo).contains(&q)
            || fold(&self.email).contains(&q)
            || self.profile.code().contains(&q)
            || fold(self.profile.display_name()).contains(&q)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub nombre_completo: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub profile: UserProfile,
}

impl CreateUserDto {
    /// Все ошибки формы сразу
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.nombre_completo.trim().is_empty() {
            errors.push("nombre_completo requerido".to_string());
        }
        if !is_valid_email(&self.email) {
            errors.push("email inválido".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(format!(
                "La contraseña debe tener al menos {} caracteres",
                MIN_PASSWORD_LEN
            ));
        }
        errors
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserDto {
    pub nombre_completo: String,
    pub email: String,
    pub profile: UserProfile,
}

impl UpdateUserDto {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.nombre_completo.trim().is_empty() {
            errors.push("nombre_completo requerido".to_string());
        }
        if !is_valid_email(&self.email) {
            errors.push("email inválido".to_string());
        }
        errors
    }
}

/// Базовая проверка: одна `@`, непустые части, точка в домене
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        _ => false,
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("ana@textiles.co"));
        assert!(is_valid_email("  ana@textiles.co "));
        assert!(!is_valid_email("ana@"));
        assert!(!is_valid_email("ana.textiles.co"));
        assert!(!is_valid_email("a@b@c.co"));
        assert!(!is_valid_email("an a@b.co"));
        assert_eq!(normalize_email(" Ana@Textiles.CO "), "ana@textiles.co");
    }

    #[test]
    fn create_requires_long_password() {
        let dto = CreateUserDto {
            nombre_completo: "Ana".into(),
            email: "ana@textiles.co".into(),
            password: "1234567".into(),
            profile: UserProfile::Seller,
        };
        let errors = dto.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("8"));

        let ok = CreateUserDto {
            password: "12345678".into(),
            ..dto
        };
        assert!(ok.validate().is_empty());
    }

    #[test]
    fn search_matches_name_email_and_profile() {
        let u = User {
            id: "1".into(),
            nombre_completo: "José Martínez".into(),
            email: "jose@textiles.co".into(),
            profile: UserProfile::Manager,
            is_active: true,
            created_at: String::new(),
            updated_at: String::new(),
            last_login_at: None,
        };
        assert!(u.matches("martinez"));
        assert!(u.matches("JOSE@"));
        assert!(u.matches("manager"));
        assert!(u.matches("gerente"));
        assert!(u.matches(""));
        assert!(!u.matches("admin"));
    }
}
