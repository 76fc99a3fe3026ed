use anyhow::Result;
use contracts::enums::user_profile::UserProfile;
use contracts::system::users::CreateUserDto;
use sea_orm::ConnectionTrait;

use crate::shared::config::AdminConfig;
use crate::system::users::{repository, service};

/// Ensure admin user exists (create if table is empty)
pub async fn ensure_admin_user_exists<C: ConnectionTrait>(conn: &C, admin: &AdminConfig) -> Result<()> {
    let count = repository::count_users(conn).await?;
    if count > 0 {
        return Ok(());
    }

    tracing::info!("No users found. Creating default admin user...");
    let admin_dto = CreateUserDto {
        nombre_completo: admin.nombre_completo.clone(),
        email: admin.email.clone(),
        password: admin.password.clone(),
        profile: UserProfile::Admin,
    };
    let admin_id = service::create(conn, UserProfile::Admin, admin_dto)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot create default admin: {}", e))?;

    tracing::warn!("═══════════════════════════════════════════════");
    tracing::warn!("  Default admin user created!");
    tracing::warn!("  Email: {}", admin.email);
    tracing::warn!("  User ID: {}", admin_id);
    tracing::warn!("  ⚠️  PLEASE CHANGE THE PASSWORD IMMEDIATELY!");
    tracing::warn!("═══════════════════════════════════════════════");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::memory_db;

    #[tokio::test]
    async fn admin_is_created_only_once() {
        let conn = memory_db().await;
        let admin = AdminConfig::default();
        ensure_admin_user_exists(&conn, &admin).await.unwrap();
        ensure_admin_user_exists(&conn, &admin).await.unwrap();

        let users = repository::list_all(&conn).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].profile, UserProfile::Admin);
        assert_eq!(users[0].email, "admin@gestor.local");
    }
}
