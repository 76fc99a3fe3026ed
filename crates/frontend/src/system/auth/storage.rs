//! Токен и профиль пользователя в хранилище браузера.
//!
//! «Recordarme» кладёт сессию в localStorage, иначе в sessionStorage
//! (живёт до закрытия вкладки). Чтение проверяет оба хранилища.

use contracts::system::auth::UserInfo;
use web_sys::{window, Storage};

const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "auth_user";

fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

fn get_session_storage() -> Option<Storage> {
    window()?.session_storage().ok()?
}

fn read(key: &str) -> Option<String> {
    [get_local_storage(), get_session_storage()]
        .into_iter()
        .flatten()
        .find_map(|s| s.get_item(key).ok().flatten())
}

/// Save token and user; `remember` selects localStorage over sessionStorage
pub fn save_session(token: &str, user: &UserInfo, remember: bool) {
    let (keep, drop) = if remember {
        (get_local_storage(), get_session_storage())
    } else {
        (get_session_storage(), get_local_storage())
    };
    if let Some(storage) = drop {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
    if let Some(storage) = keep {
        let _ = storage.set_item(TOKEN_KEY, token);
        if let Ok(raw) = serde_json::to_string(user) {
            let _ = storage.set_item(USER_KEY, &raw);
        }
    }
}

/// Get access token
pub fn get_token() -> Option<String> {
    read(TOKEN_KEY).filter(|t| !t.is_empty())
}

pub fn get_user() -> Option<UserInfo> {
    read(USER_KEY).and_then(|raw| serde_json::from_str(&raw).ok())
}

/// Обновляет профиль там же, где лежит токен
pub fn save_user(user: &UserInfo) {
    let Ok(raw) = serde_json::to_string(user) else {
        return;
    };
    for storage in [get_local_storage(), get_session_storage()].into_iter().flatten() {
        if storage.get_item(TOKEN_KEY).ok().flatten().is_some() {
            let _ = storage.set_item(USER_KEY, &raw);
        }
    }
}

/// Clear session from both storages
pub fn clear_session() {
    for storage in [get_local_storage(), get_session_storage()].into_iter().flatten() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}
