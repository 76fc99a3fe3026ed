use serde::{Deserialize, Serialize};

/// Профиль (роль) пользователя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserProfile {
    #[default]
    Viewer,
    Seller,
    Manager,
    Admin,
}

impl UserProfile {
    /// Код профиля (как хранится в БД и передаётся по API)
    pub fn code(&self) -> &'static str {
        match self {
            UserProfile::Viewer => "viewer",
            UserProfile::Seller => "seller",
            UserProfile::Manager => "manager",
            UserProfile::Admin => "admin",
        }
    }

    /// Название для интерфейса
    pub fn display_name(&self) -> &'static str {
        match self {
            UserProfile::Viewer => "Consulta",
            UserProfile::Seller => "Vendedor",
            UserProfile::Manager => "Gerente",
            UserProfile::Admin => "Administrador",
        }
    }

    pub fn all() -> Vec<UserProfile> {
        vec![
            UserProfile::Viewer,
            UserProfile::Seller,
            UserProfile::Manager,
            UserProfile::Admin,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "viewer" => Some(UserProfile::Viewer),
            "seller" => Some(UserProfile::Seller),
            "manager" => Some(UserProfile::Manager),
            "admin" => Some(UserProfile::Admin),
            _ => None,
        }
    }

    /// Вкладка «Usuarios» и список пользователей
    pub fn can_manage_users(&self) -> bool {
        matches!(self, UserProfile::Manager | UserProfile::Admin)
    }

    pub fn can_edit_users(&self) -> bool {
        matches!(self, UserProfile::Admin)
    }

    pub fn can_delete_users(&self) -> bool {
        matches!(self, UserProfile::Admin)
    }

    pub fn can_approve_orders(&self) -> bool {
        matches!(self, UserProfile::Manager | UserProfile::Admin)
    }

    /// Создание заказов, работа с позициями, движения склада
    pub fn can_edit_orders(&self) -> bool {
        !matches!(self, UserProfile::Viewer)
    }

    pub fn can_manage_products(&self) -> bool {
        matches!(self, UserProfile::Manager | UserProfile::Admin)
    }

    /// Может ли пользователь с этим профилем назначить `target` другому пользователю.
    /// Менеджер не выдаёт права администратора.
    pub fn can_assign(&self, target: UserProfile) -> bool {
        match self {
            UserProfile::Admin => true,
            UserProfile::Manager => target != UserProfile::Admin,
            _ => false,
        }
    }

    /// Профили, доступные в форме создания пользователя
    pub fn assignable(&self) -> Vec<UserProfile> {
        UserProfile::all()
            .into_iter()
            .filter(|p| self.can_assign(*p))
            .collect()
    }
}

impl std::fmt::Display for UserProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approve_is_limited_to_manager_and_admin() {
        assert!(!UserProfile::Viewer.can_approve_orders());
        assert!(!UserProfile::Seller.can_approve_orders());
        assert!(UserProfile::Manager.can_approve_orders());
        assert!(UserProfile::Admin.can_approve_orders());
    }

    #[test]
    fn only_admin_deletes_users() {
        for p in UserProfile::all() {
            assert_eq!(p.can_delete_users(), p == UserProfile::Admin);
        }
        assert!(UserProfile::Manager.can_manage_users());
        assert!(!UserProfile::Seller.can_manage_users());
    }

    #[test]
    fn manager_cannot_grant_admin() {
        assert!(!UserProfile::Manager.can_assign(UserProfile::Admin));
        assert!(UserProfile::Manager.can_assign(UserProfile::Seller));
        assert_eq!(UserProfile::Seller.assignable(), Vec::<UserProfile>::new());
        assert_eq!(UserProfile::Admin.assignable().len(), 4);
    }

    #[test]
    fn serde_uses_lowercase_codes() {
        let json = serde_json::to_string(&UserProfile::Manager).unwrap();
        assert_eq!(json, "\"manager\"");
        let back: UserProfile = serde_json::from_str("\"seller\"").unwrap();
        assert_eq!(back, UserProfile::Seller);
        assert_eq!(UserProfile::from_code(" Admin "), Some(UserProfile::Admin));
        assert_eq!(UserProfile::from_code("root"), None);
    }
}
