use chrono::Utc;
use contracts::enums::user_profile::UserProfile;
use contracts::system::auth::{LoginRequest, LoginResponse, MeResponse, TokenClaims, UserInfo};
use contracts::system::users::{normalize_email, CreateUserDto, UpdateUserDto, User};
use sea_orm::ConnectionTrait;

use super::repository;
use crate::shared::error::{ApiError, ApiResult};
use crate::system::auth::{jwt::JwtKeys, password};
use crate::system::prefs::service as prefs_service;

fn not_found() -> ApiError {
    ApiError::NotFound("Usuario no encontrado".to_string())
}

fn duplicate_email() -> ApiError {
    ApiError::Conflict("El email ya está registrado".to_string())
}

fn to_info(user: &User) -> UserInfo {
    UserInfo {
        id: user.id.clone(),
        nombre_completo: user.nombre_completo.clone(),
        email: user.email.clone(),
        profile: user.profile,
    }
}

/// Verify credentials, stamp last login and issue a token
pub async fn login<C: ConnectionTrait>(
    conn: &C,
    keys: &JwtKeys,
    request: LoginRequest,
) -> ApiResult<LoginResponse> {
    let email = normalize_email(&request.email);
    if email.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Email y contraseña son requeridos"));
    }

    let invalid = || ApiError::Unauthorized("Credenciales inválidas".to_string());
    let (user, hash) = repository::get_credentials(conn, &email)
        .await?
        .ok_or_else(invalid)?;
    if !user.is_active || !password::verify_password(&request.password, &hash) {
        tracing::warn!("Failed login for {}", email);
        return Err(invalid());
    }

    repository::touch_last_login(conn, &user.id, &Utc::now().to_rfc3339()).await?;
    let prefs = prefs_service::get_or_create(conn, &user.id).await?;
    let token = keys.issue(&user.id, &user.email, user.profile)?;
    tracing::info!("User {} logged in ({})", user.email, user.profile.code());

    Ok(LoginResponse {
        token,
        user: to_info(&user),
        prefs,
    })
}

/// Текущий пользователь по токену
pub async fn me<C: ConnectionTrait>(conn: &C, claims: &TokenClaims) -> ApiResult<MeResponse> {
    let user = repository::get_by_id(conn, &claims.sub)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| ApiError::Unauthorized("No autorizado".to_string()))?;
    let prefs = prefs_service::get_or_create(conn, &user.id).await?;
    Ok(MeResponse {
        user: to_info(&user),
        prefs,
    })
}

pub async fn list<C: ConnectionTrait>(conn: &C) -> ApiResult<Vec<User>> {
    Ok(repository::list_all(conn).await?)
}

pub async fn get<C: ConnectionTrait>(conn: &C, id: &str) -> ApiResult<User> {
    repository::get_by_id(conn, id).await?.ok_or_else(not_found)
}

/// Create a new user on behalf of `actor`
pub async fn create<C: ConnectionTrait>(
    conn: &C,
    actor: UserProfile,
    dto: CreateUserDto,
) -> ApiResult<String> {
    if !actor.can_manage_users() || !actor.can_assign(dto.profile) {
        return Err(ApiError::forbidden());
    }
    ApiError::check(dto.validate())?;

    let email = normalize_email(&dto.email);
    if repository::get_by_email(conn, &email).await?.is_some() {
        return Err(duplicate_email());
    }

    let password_hash = password::hash_password(&dto.password)?;
    let now = Utc::now().to_rfc3339();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        nombre_completo: dto.nombre_completo.trim().to_string(),
        email,
        profile: dto.profile,
        is_active: true,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };
    repository::insert(conn, &user, &password_hash).await?;
    tracing::info!("User {} created with profile {}", user.email, user.profile.code());
    Ok(user.id)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    actor: UserProfile,
    id: &str,
    dto: UpdateUserDto,
) -> ApiResult<()> {
    if !actor.can_edit_users() || !actor.can_assign(dto.profile) {
        return Err(ApiError::forbidden());
    }
    ApiError::check(dto.validate())?;

    let mut user = get(conn, id).await?;
    let email = normalize_email(&dto.email);
    if let Some(other) = repository::get_by_email(conn, &email).await? {
        if other.id != user.id {
            return Err(duplicate_email());
        }
    }

    user.nombre_completo = dto.nombre_completo.trim().to_string();
    user.email = email;
    user.profile = dto.profile;
    user.updated_at = Utc::now().to_rfc3339();
    repository::update(conn, &user).await?;
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(conn: &C, actor: &TokenClaims, id: &str) -> ApiResult<()> {
    if !actor.profile.can_delete_users() {
        return Err(ApiError::forbidden());
    }
    if actor.sub == id {
        return Err(ApiError::Conflict(
            "No puedes eliminar tu propio usuario".to_string(),
        ));
    }
    if !repository::delete(conn, id).await? {
        return Err(not_found());
    }
    tracing::info!("User {} deleted by {}", id, actor.email);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::memory_db;

    fn dto(email: &str, profile: UserProfile) -> CreateUserDto {
        CreateUserDto {
            nombre_completo: "Ana Gómez".into(),
            email: email.into(),
            password: "clave-segura".into(),
            profile,
        }
    }

    fn claims(id: &str, profile: UserProfile) -> TokenClaims {
        TokenClaims {
            sub: id.into(),
            email: "x@y.co".into(),
            profile,
            exp: 0,
            iat: 0,
        }
    }

    #[tokio::test]
    async fn login_with_normalized_email() {
        let conn = memory_db().await;
        let id = create(&conn, UserProfile::Admin, dto("Ana@Textiles.co", UserProfile::Seller))
            .await
            .unwrap();
        let keys = JwtKeys::new("test", 1);

        let response = login(
            &conn,
            &keys,
            LoginRequest {
                email: "  ANA@textiles.co ".into(),
                password: "clave-segura".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(response.user.id, id);
        assert_eq!(keys.validate(&response.token).unwrap().profile, UserProfile::Seller);
        assert!(get(&conn, &id).await.unwrap().last_login_at.is_some());

        let bad = login(
            &conn,
            &keys,
            LoginRequest {
                email: "ana@textiles.co".into(),
                password: "incorrecta".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(bad, ApiError::Unauthorized(_)));

        let empty = login(
            &conn,
            &keys,
            LoginRequest {
                email: "".into(),
                password: "".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(empty.to_string(), "Email y contraseña son requeridos");
    }

    #[tokio::test]
    async fn manager_cannot_create_admin_and_emails_are_unique() {
        let conn = memory_db().await;
        let err = create(&conn, UserProfile::Manager, dto("a@b.co", UserProfile::Admin))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        create(&conn, UserProfile::Manager, dto("a@b.co", UserProfile::Seller))
            .await
            .unwrap();
        let dup = create(&conn, UserProfile::Admin, dto("A@B.CO", UserProfile::Viewer))
            .await
            .unwrap_err();
        assert!(matches!(dup, ApiError::Conflict(_)));

        let mut short = dto("c@d.co", UserProfile::Viewer);
        short.password = "corta".into();
        assert!(matches!(
            create(&conn, UserProfile::Admin, short).await,
            Err(ApiError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn update_and_delete_rules() {
        let conn = memory_db().await;
        let id = create(&conn, UserProfile::Admin, dto("a@b.co", UserProfile::Seller))
            .await
            .unwrap();

        update(
            &conn,
            UserProfile::Admin,
            &id,
            UpdateUserDto {
                nombre_completo: "Ana María".into(),
                email: "ana@b.co".into(),
                profile: UserProfile::Manager,
            },
        )
        .await
        .unwrap();
        let user = get(&conn, &id).await.unwrap();
        assert_eq!(user.profile, UserProfile::Manager);
        assert_eq!(user.email, "ana@b.co");

        let own = delete(&conn, &claims(&id, UserProfile::Admin), &id).await.unwrap_err();
        assert!(matches!(own, ApiError::Conflict(_)));
        let by_manager = delete(&conn, &claims("m", UserProfile::Manager), &id)
            .await
            .unwrap_err();
        assert!(matches!(by_manager, ApiError::Forbidden(_)));

        delete(&conn, &claims("root", UserProfile::Admin), &id).await.unwrap();
        assert!(matches!(get(&conn, &id).await, Err(ApiError::NotFound(_))));
        assert!(list(&conn).await.unwrap().is_empty());
    }
}
