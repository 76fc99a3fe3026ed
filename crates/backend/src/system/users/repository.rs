use anyhow::{Context, Result};
use contracts::enums::user_profile::UserProfile;
use contracts::system::users::User;
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement};

const USER_COLUMNS: &str =
    "id, nombre_completo, email, profile, is_active, created_at, updated_at, last_login_at";

fn user_from_row(row: &QueryResult) -> Result<User> {
    let profile: String = row.try_get("", "profile")?;
    Ok(User {
        id: row.try_get("", "id")?,
        nombre_completo: row.try_get("", "nombre_completo")?,
        email: row.try_get("", "email")?,
        profile: UserProfile::from_code(&profile).unwrap_or_default(),
        is_active: row.try_get::<i32>("", "is_active")? != 0,
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
        last_login_at: row.try_get("", "last_login_at")?,
    })
}

/// Create user with password hash
pub async fn insert<C: ConnectionTrait>(conn: &C, user: &User, password_hash: &str) -> Result<()> {
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sys_users (id, nombre_completo, email, password_hash, profile, is_active, created_at, updated_at, last_login_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        [
            user.id.clone().into(),
            user.nombre_completo.clone().into(),
            user.email.clone().into(),
            password_hash.to_string().into(),
            user.profile.code().into(),
            (if user.is_active { 1 } else { 0 }).into(),
            user.created_at.clone().into(),
            user.updated_at.clone().into(),
            user.last_login_at.clone().into(),
        ],
    ))
    .await
    .context("Failed to insert user")?;
    Ok(())
}

pub async fn get_by_id<C: ConnectionTrait>(conn: &C, id: &str) -> Result<Option<User>> {
    let row = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!("SELECT {} FROM sys_users WHERE id = ?", USER_COLUMNS),
            [id.into()],
        ))
        .await?;
    row.as_ref().map(user_from_row).transpose()
}

pub async fn get_by_email<C: ConnectionTrait>(conn: &C, email: &str) -> Result<Option<User>> {
    let row = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!("SELECT {} FROM sys_users WHERE email = ?", USER_COLUMNS),
            [email.into()],
        ))
        .await?;
    row.as_ref().map(user_from_row).transpose()
}

/// Пользователь и хеш пароля для входа
pub async fn get_credentials<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<(User, String)>> {
    let row = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!(
                "SELECT {}, password_hash FROM sys_users WHERE email = ?",
                USER_COLUMNS
            ),
            [email.into()],
        ))
        .await?;
    match row {
        Some(row) => {
            let hash: String = row.try_get("", "password_hash")?;
            Ok(Some((user_from_row(&row)?, hash)))
        }
        None => Ok(None),
    }
}

pub async fn list_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<User>> {
    let rows = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!(
                "SELECT {} FROM sys_users ORDER BY lower(nombre_completo), email",
                USER_COLUMNS
            ),
        ))
        .await?;
    rows.iter().map(user_from_row).collect()
}

pub async fn update<C: ConnectionTrait>(conn: &C, user: &User) -> Result<bool> {
    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE sys_users SET nombre_completo = ?, email = ?, profile = ?, is_active = ?, updated_at = ?
             WHERE id = ?",
            [
                user.nombre_completo.clone().into(),
                user.email.clone().into(),
                user.profile.code().into(),
                (if user.is_active { 1 } else { 0 }).into(),
                user.updated_at.clone().into(),
                user.id.clone().into(),
            ],
        ))
        .await
        .context("Failed to update user")?;
    Ok(result.rows_affected() > 0)
}

pub async fn touch_last_login<C: ConnectionTrait>(conn: &C, id: &str, at: &str) -> Result<()> {
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_users SET last_login_at = ? WHERE id = ?",
        [at.into(), id.into()],
    ))
    .await?;
    Ok(())
}

/// Удаляет пользователя вместе с его настройками
pub async fn delete<C: ConnectionTrait>(conn: &C, id: &str) -> Result<bool> {
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "DELETE FROM sys_user_prefs WHERE user_id = ?",
        [id.into()],
    ))
    .await?;
    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "DELETE FROM sys_users WHERE id = ?",
            [id.into()],
        ))
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_users<C: ConnectionTrait>(conn: &C) -> Result<i64> {
    let row = conn
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS cnt FROM sys_users".to_string(),
        ))
        .await?;
    match row {
        Some(row) => Ok(row.try_get("", "cnt")?),
        None => Ok(0),
    }
}
