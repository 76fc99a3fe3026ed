use anyhow::Result;
use chrono::Utc;
use contracts::system::prefs::ThemePrefs;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

/// Сохранённые настройки темы; битый JSON читается как значения по умолчанию
pub async fn get<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<Option<ThemePrefs>> {
    let row = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT prefs FROM sys_user_prefs WHERE user_id = ?",
            [user_id.into()],
        ))
        .await?;

    match row {
        Some(row) => {
            let raw: String = row.try_get("", "prefs")?;
            let value = serde_json::from_str(&raw).unwrap_or(serde_json::Value::Null);
            Ok(Some(ThemePrefs::from_json(&value)))
        }
        None => Ok(None),
    }
}

pub async fn upsert<C: ConnectionTrait>(conn: &C, user_id: &str, prefs: &ThemePrefs) -> Result<()> {
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sys_user_prefs (user_id, prefs, updated_at) VALUES (?, ?, ?)
         ON CONFLICT(user_id) DO UPDATE SET prefs = excluded.prefs, updated_at = excluded.updated_at",
        [
            user_id.into(),
            serde_json::to_string(prefs)?.into(),
            Utc::now().to_rfc3339().into(),
        ],
    ))
    .await?;
    Ok(())
}
