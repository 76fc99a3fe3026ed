use contracts::system::prefs::{ThemePrefs, ThemePrefsPatch};
use sea_orm::ConnectionTrait;
use serde_json::Value;

use super::repository;
use crate::shared::error::{ApiError, ApiResult};

/// Настройки пользователя; при первом обращении записываются значения по умолчанию
pub async fn get_or_create<C: ConnectionTrait>(conn: &C, user_id: &str) -> ApiResult<ThemePrefs> {
    if let Some(prefs) = repository::get(conn, user_id).await? {
        return Ok(prefs);
    }
    let prefs = ThemePrefs::default();
    repository::upsert(conn, user_id, &prefs).await?;
    Ok(prefs)
}

/// Частичное обновление поверх сохранённых настроек
pub async fn update<C: ConnectionTrait>(conn: &C, user_id: &str, raw: Value) -> ApiResult<ThemePrefs> {
    let invalid = || ApiError::bad_request("Formato de prefs inválido");
    if !raw.is_object() {
        return Err(invalid());
    }
    let patch: ThemePrefsPatch = serde_json::from_value(raw).map_err(|_| invalid())?;

    let current = get_or_create(conn, user_id).await?;
    let next = current.merged(&patch);
    repository::upsert(conn, user_id, &next).await?;
    tracing::debug!("Prefs updated for user {}", user_id);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::memory_db;
    use contracts::system::prefs::ColorMode;
    use serde_json::json;

    #[tokio::test]
    async fn defaults_are_created_once() {
        let conn = memory_db().await;
        let prefs = get_or_create(&conn, "u1").await.unwrap();
        assert_eq!(prefs, ThemePrefs::default());
        assert!(repository::get(&conn, "u1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_merges_and_normalizes() {
        let conn = memory_db().await;
        let prefs = update(&conn, "u1", json!({"colorMode": "dark", "uiScale": 2.0}))
            .await
            .unwrap();
        assert_eq!(prefs.color_mode, ColorMode::Dark);
        assert_eq!(prefs.ui_scale, 1.3);

        let prefs = update(&conn, "u1", json!({"accent": "neon"})).await.unwrap();
        assert_eq!(prefs.color_mode, ColorMode::Dark);
        assert_eq!(prefs.accent, "teal");
    }

    #[tokio::test]
    async fn non_object_is_rejected() {
        let conn = memory_db().await;
        let err = update(&conn, "u1", json!("dark")).await.unwrap_err();
        assert_eq!(err.to_string(), "Formato de prefs inválido");
    }
}
